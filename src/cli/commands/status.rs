//! `stocktake status` command - count-so-far dashboard

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::locate_workspace;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Roster, StockDb};

#[derive(clap::Args, Debug)]
pub struct StatusArgs {}

pub fn run(_args: StatusArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let db = StockDb::open(&workspace)?;
    let roster = Roster::load(&workspace);

    let catalog_count = db.catalog_count()?;
    let record_count = db.record_count()?;
    let by_status = db.record_counts_by_status()?;

    if global.format == OutputFormat::Json {
        let json = serde_json::json!({
            "catalogCount": catalog_count,
            "recordCount": record_count,
            "recordsByStatus": by_status.iter().map(|(s, n)| {
                serde_json::json!({"status": s, "count": n})
            }).collect::<Vec<_>>(),
            "operators": roster.operators,
            "selectedOperator": roster.selected(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json).map_err(|e| miette::miette!("{}", e))?
        );
        return Ok(());
    }

    println!("{}", style("Stock-take status").bold());
    println!();
    println!("  Catalog rows:  {}", style(catalog_count).cyan());
    println!("  Records:       {}", style(record_count).cyan());
    println!(
        "  Operator:      {}",
        roster.selected().unwrap_or("(none selected)")
    );
    println!();

    if !by_status.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Status", "Count"]);
        for (status, count) in &by_status {
            builder.push_record([status.clone(), count.to_string()]);
        }
        let mut table = builder.build();
        table.with(Style::rounded());
        println!("{}", table);
    }

    Ok(())
}
