//! `stocktake merge` command - reconcile an exported record CSV

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::locate_workspace;
use crate::cli::GlobalOpts;
use crate::core::StockDb;
use crate::engine::merge_records_csv;

#[derive(clap::Args, Debug)]
pub struct MergeArgs {
    /// Exported record CSV from another station
    pub file: PathBuf,
}

pub fn run(args: MergeArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;

    if !args.file.exists() {
        return Err(miette::miette!("File not found: {}", args.file.display()));
    }

    let text = std::fs::read_to_string(&args.file).into_diagnostic()?;

    let mut db = StockDb::open(&workspace)?;
    let outcome = merge_records_csv(&mut db, &text)?;

    println!(
        "{} Merge complete: {} added, {} skipped (already counted or no part id)",
        style("✓").green(),
        style(outcome.added).cyan(),
        style(outcome.skipped).dim()
    );

    Ok(())
}
