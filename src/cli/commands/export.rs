//! `stocktake export` command - write the record log as interchange CSV

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::locate_workspace;
use crate::cli::GlobalOpts;
use crate::core::StockDb;
use crate::engine::export::write_records_csv;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let db = StockDb::open(&workspace)?;

    let records = db.all_records()?;

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path).into_diagnostic()?;
            write_records_csv(file, &records)?;
            if !global.quiet {
                println!(
                    "{} Exported {} record(s) to {}",
                    style("✓").green(),
                    style(records.len()).cyan(),
                    style(path.display()).yellow()
                );
            }
        }
        None => {
            write_records_csv(std::io::stdout().lock(), &records)?;
        }
    }

    Ok(())
}
