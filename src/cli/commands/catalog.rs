//! `stocktake catalog` command - parts-master queries

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{escape_csv, locate_workspace, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::StockDb;
use crate::entities::MasterItem;

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// Show one catalog item by part id
    Show(ShowArgs),

    /// Substring search over part id, vendor PN, and description
    Search(SearchArgs),

    /// Print the catalog row count
    Count,

    /// Remove every catalog row (records are untouched)
    Clear(ClearArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Part id to look up
    pub part_id: String,
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Search term
    pub term: String,

    /// Limit number of results
    #[arg(long, short = 'n', default_value = "50")]
    pub limit: usize,
}

#[derive(clap::Args, Debug)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: CatalogCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CatalogCommands::Show(args) => run_show(args, global),
        CatalogCommands::Search(args) => run_search(args, global),
        CatalogCommands::Count => run_count(global),
        CatalogCommands::Clear(args) => run_clear(args, global),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let db = StockDb::open(&workspace)?;

    let item = db
        .get(&args.part_id)?
        .ok_or_else(|| miette::miette!("'{}' is not in the catalog", args.part_id))?;

    if global.format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&item).map_err(|e| miette::miette!("{}", e))?
        );
        return Ok(());
    }

    let field = |label: &str, value: &str| {
        if !value.is_empty() {
            println!("{:<14} {}", style(label).bold(), value);
        }
    };
    field("Part ID", &item.part_id);
    field("Vendor SN", &item.vendor_sn);
    field("Project", &item.project);
    field("Class", &item.class);
    field("Location", &item.location);
    field("Vendor", &item.vendor);
    field("Vendor PN", &item.vendor_pn);
    field("Customer PN", &item.customer_pn);
    field("Description", &item.description);

    Ok(())
}

fn run_search(args: SearchArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let db = StockDb::open(&workspace)?;

    // Full-scan predicate filter; fine at the catalog sizes this targets
    let needle = args.term.to_lowercase();
    let mut hits = db.filter(|item: &MasterItem| {
        item.part_id.to_lowercase().contains(&needle)
            || item.vendor_pn.to_lowercase().contains(&needle)
            || item.description.to_lowercase().contains(&needle)
    })?;
    hits.truncate(args.limit);

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&hits).map_err(|e| miette::miette!("{}", e))?
            );
        }
        OutputFormat::Id => {
            for item in &hits {
                println!("{}", item.part_id);
            }
        }
        OutputFormat::Csv => {
            println!("part_id,vendor_pn,location,description");
            for item in &hits {
                println!(
                    "{},{},{},{}",
                    escape_csv(&item.part_id),
                    escape_csv(&item.vendor_pn),
                    escape_csv(&item.location),
                    escape_csv(&item.description)
                );
            }
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            if hits.is_empty() {
                println!("No catalog items match '{}'.", style(&args.term).yellow());
                return Ok(());
            }
            for item in &hits {
                println!(
                    "{}\t{}\t{}",
                    style(&item.part_id).cyan(),
                    item.location,
                    truncate_str(&item.description, 50)
                );
            }
            println!();
            println!("{} item(s)", style(hits.len()).cyan());
        }
    }

    Ok(())
}

fn run_count(global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let db = StockDb::open(&workspace)?;
    println!("{}", db.catalog_count()?);
    Ok(())
}

fn run_clear(args: ClearArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let mut db = StockDb::open(&workspace)?;

    let count = db.catalog_count()?;
    if count == 0 {
        println!("Catalog is already empty.");
        return Ok(());
    }

    if !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete all {} catalog row(s)?", count))
            .default(false)
            .interact()
            .map_err(|e| miette::miette!("{}", e))?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    db.clear_catalog()?;
    println!(
        "{} Cleared {} catalog row(s)",
        style("✓").green(),
        style(count).cyan()
    );

    Ok(())
}
