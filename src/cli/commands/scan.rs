//! `stocktake scan` command - record scanned part identifiers
//!
//! The scanner/manual-entry collaborator is expected to deliver trimmed
//! identifiers and suppress rapid repeats; this command runs the
//! classification state machine per identifier.

use console::style;
use miette::Result;

use crate::cli::helpers::{locate_workspace, resolve_operator, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::{Config, Roster, StockDb};
use crate::engine::{process, related_items, ScanClass};

#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    /// Part identifiers to record
    #[arg(required = true)]
    pub part_ids: Vec<String>,

    /// Record this operator instead of the selected one
    #[arg(long)]
    pub operator: Option<String>,

    /// Also list related catalog items for each scan
    #[arg(long, short = 'r')]
    pub related: bool,
}

pub fn run(args: ScanArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let config = Config::load(Some(&workspace));
    let roster = Roster::load(&workspace);
    let mut db = StockDb::open(&workspace)?;

    let operator = args
        .operator
        .clone()
        .unwrap_or_else(|| resolve_operator(&roster, &config));

    for part_id in &args.part_ids {
        let Some(result) = process(&mut db, &operator, part_id)? else {
            continue;
        };

        let glyph = match result.class {
            ScanClass::Found => style("✓").green(),
            ScanClass::NotFound => style("?").yellow(),
            ScanClass::Duplicate => style("⟳").cyan(),
        };
        println!(
            "{} {}  {}  {}",
            glyph,
            style(&result.record.part_id).bold(),
            result.class,
            style(truncate_str(&result.record.description, 40)).dim()
        );

        if args.related {
            let related = related_items(&db, &result.record, config.match_rule())?;
            if related.is_empty() {
                println!("    no related items");
            } else {
                for item in &related {
                    println!(
                        "    {} {}",
                        style(&item.part_id).cyan(),
                        truncate_str(&item.description, 50)
                    );
                }
            }
        }
    }

    Ok(())
}
