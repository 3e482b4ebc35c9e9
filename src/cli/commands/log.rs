//! `stocktake log` command - record-log inspection and batch operations

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{escape_csv, format_date_local, locate_workspace, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::StockDb;
use crate::entities::{InventoryRecord, ScanStatus};

#[derive(Subcommand, Debug)]
pub enum LogCommands {
    /// List records, most recent first
    List(ListArgs),

    /// Force a status onto the selected records
    SetStatus(SetStatusArgs),

    /// Delete the selected records
    Delete(DeleteArgs),

    /// Empty the record log (the catalog is untouched)
    Clear(ClearArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status (ok, not-found, checked)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Limit number of rows
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct SetStatusArgs {
    /// New status value (typically: checked)
    pub status: String,

    /// Part ids of the records to update
    #[arg(required = true)]
    pub part_ids: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Part ids of the records to remove
    #[arg(required = true)]
    pub part_ids: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: LogCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        LogCommands::List(args) => run_list(args, global),
        LogCommands::SetStatus(args) => run_set_status(args, global),
        LogCommands::Delete(args) => run_delete(args, global),
        LogCommands::Clear(args) => run_clear(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let db = StockDb::open(&workspace)?;

    let mut records = match &args.status {
        Some(s) => {
            let status: ScanStatus = s.parse().map_err(|e: String| miette::miette!("{}", e))?;
            db.records_with_status(status)?
        }
        None => db.all_records()?,
    };

    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    print_records(&records, global)
}

fn print_records(records: &[InventoryRecord], global: &GlobalOpts) -> Result<()> {
    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(records).map_err(|e| miette::miette!("{}", e))?
            );
        }
        OutputFormat::Id => {
            for record in records {
                println!("{}", record.part_id);
            }
        }
        OutputFormat::Csv => {
            println!("inventory_date,part_id,status,scanned_by,description");
            for record in records {
                println!(
                    "{},{},{},{},{}",
                    format_date_local(record.inventory_date),
                    escape_csv(&record.part_id),
                    record.status,
                    escape_csv(&record.scanned_by),
                    escape_csv(&record.description)
                );
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            if records.is_empty() {
                println!("Record log is empty.");
                return Ok(());
            }

            println!(
                "{:<20} {:<18} {:<10} {:<12} {}",
                style("DATE").bold(),
                style("PART").bold(),
                style("STATUS").bold(),
                style("OPERATOR").bold(),
                style("DESCRIPTION").bold()
            );
            println!("{}", "-".repeat(90));
            for record in records {
                let status_styled = match record.status {
                    ScanStatus::Ok => style(record.status.to_string()).green(),
                    ScanStatus::NotFound => style(record.status.to_string()).yellow(),
                    ScanStatus::Checked => style(record.status.to_string()).cyan(),
                    ScanStatus::Duplicated => style(record.status.to_string()).magenta(),
                };
                println!(
                    "{:<20} {:<18} {:<10} {:<12} {}",
                    format_date_local(record.inventory_date),
                    truncate_str(&record.part_id, 16),
                    status_styled,
                    truncate_str(&record.scanned_by, 10),
                    truncate_str(&record.description, 36)
                );
            }
            println!();
            println!("{} record(s)", style(records.len()).cyan());
        }
    }

    Ok(())
}

fn run_set_status(args: SetStatusArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let mut db = StockDb::open(&workspace)?;

    let status: ScanStatus = args
        .status
        .parse()
        .map_err(|e: String| miette::miette!("{}", e))?;

    let changed = db.set_status_by_parts(&args.part_ids, status)?;
    let missed = args.part_ids.len().saturating_sub(changed);

    println!(
        "{} Updated {} record(s) to {}{}",
        style("✓").green(),
        style(changed).cyan(),
        status,
        if missed > 0 {
            format!(", {} part id(s) not in the log", style(missed).yellow())
        } else {
            String::new()
        }
    );

    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let mut db = StockDb::open(&workspace)?;

    let removed = db.delete_by_parts(&args.part_ids)?;
    println!(
        "{} Removed {} record(s)",
        style("✓").green(),
        style(removed).cyan()
    );

    Ok(())
}

fn run_clear(args: ClearArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let mut db = StockDb::open(&workspace)?;

    let count = db.record_count()?;
    if count == 0 {
        println!("Record log is already empty.");
        return Ok(());
    }

    if !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete all {} record(s)?", count))
            .default(false)
            .interact()
            .map_err(|e| miette::miette!("{}", e))?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    db.clear_records()?;
    println!(
        "{} Cleared {} record(s)",
        style("✓").green(),
        style(count).cyan()
    );

    Ok(())
}
