//! `stocktake import` command - bulk catalog ingestion

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::Write;
use std::path::PathBuf;

use crate::cli::helpers::locate_workspace;
use crate::cli::GlobalOpts;
use crate::core::StockDb;
use crate::engine::{decode_catalog_bytes, ingest};

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Catalog file (9-column delimited text; UTF-8, UTF-16, or Big5)
    pub file: PathBuf,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;

    if !args.file.exists() {
        return Err(miette::miette!("File not found: {}", args.file.display()));
    }

    let bytes = std::fs::read(&args.file).into_diagnostic()?;

    // Decode fully before touching the store; a decode failure must not
    // leave a half-applied import behind.
    let text = decode_catalog_bytes(&bytes).map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Importing catalog from {}",
            style("→").blue(),
            style(args.file.display()).yellow()
        );
    }

    let mut db = StockDb::open(&workspace)?;
    let quiet = global.quiet;
    let report = ingest(&mut db, &text, |percent| {
        if !quiet {
            print!("\r  {}%", percent);
            let _ = std::io::stdout().flush();
        }
    })?;

    if !global.quiet {
        println!();
    }
    println!(
        "{} Imported {} catalog row(s){}",
        style("✓").green(),
        style(report.rows_imported).cyan(),
        if report.rows_skipped > 0 {
            format!(
                ", skipped {} without a part id",
                style(report.rows_skipped).dim()
            )
        } else {
            String::new()
        }
    );

    Ok(())
}
