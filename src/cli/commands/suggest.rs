//! `stocktake suggest` command - autocomplete candidates for partial input

use console::style;
use miette::Result;

use crate::cli::helpers::{escape_csv, locate_workspace, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::StockDb;
use crate::engine::suggest;

#[derive(clap::Args, Debug)]
pub struct SuggestArgs {
    /// Partial part id or vendor PN (minimum 2 characters)
    pub partial: String,
}

pub fn run(args: SuggestArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let db = StockDb::open(&workspace)?;

    let candidates = suggest(&db, &args.partial)?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&candidates).map_err(|e| miette::miette!("{}", e))?
            );
        }
        OutputFormat::Id => {
            for item in &candidates {
                println!("{}", item.part_id);
            }
        }
        OutputFormat::Csv => {
            println!("part_id,vendor_pn,description");
            for item in &candidates {
                println!(
                    "{},{},{}",
                    escape_csv(&item.part_id),
                    escape_csv(&item.vendor_pn),
                    escape_csv(&item.description)
                );
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            if candidates.is_empty() {
                if !global.quiet {
                    println!("No candidates for '{}'.", style(&args.partial).yellow());
                }
                return Ok(());
            }
            for item in &candidates {
                println!(
                    "{}\t{}\t{}",
                    style(&item.part_id).cyan(),
                    item.vendor_pn,
                    truncate_str(&item.description, 50)
                );
            }
        }
    }

    Ok(())
}
