//! `stocktake related` command - related catalog items for a counted part

use console::style;
use miette::Result;

use crate::cli::helpers::{locate_workspace, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, StockDb};
use crate::engine::{related_items, DescriptionRule};

#[derive(clap::Args, Debug)]
pub struct RelatedArgs {
    /// Part id of an already-counted record
    pub part_id: String,

    /// Override the configured description-match rule (prefix, exact)
    #[arg(long)]
    pub rule: Option<String>,
}

pub fn run(args: RelatedArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let config = Config::load(Some(&workspace));
    let db = StockDb::open(&workspace)?;

    let record = db.get_record_by_part(&args.part_id)?.ok_or_else(|| {
        miette::miette!(
            "'{}' has not been counted yet. Scan it first, then look up its family.",
            args.part_id
        )
    })?;

    let rule = match &args.rule {
        Some(s) => s
            .parse::<DescriptionRule>()
            .map_err(|e| miette::miette!("{}", e))?,
        None => config.match_rule(),
    };

    let related = related_items(&db, &record, rule)?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&related).map_err(|e| miette::miette!("{}", e))?
            );
        }
        OutputFormat::Id => {
            for item in &related {
                println!("{}", item.part_id);
            }
        }
        _ => {
            if related.is_empty() {
                println!(
                    "No related items for '{}'.",
                    style(&args.part_id).yellow()
                );
                return Ok(());
            }
            println!(
                "{} related item(s) for '{}':",
                style(related.len()).cyan(),
                style(&args.part_id).yellow()
            );
            for item in &related {
                println!(
                    "  {}  {}  {}",
                    style(&item.part_id).cyan(),
                    item.location,
                    truncate_str(&item.description, 50)
                );
            }
        }
    }

    Ok(())
}
