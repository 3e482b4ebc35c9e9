//! `stocktake init` command - create a new workspace

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::core::{Roster, StockDb, Workspace};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    pub path: Option<PathBuf>,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from("."));

    let workspace = Workspace::init(&path).map_err(|e| miette::miette!("{}", e))?;

    // Create the empty store and roster up front so every later command
    // finds consistent state
    StockDb::open(&workspace)?;
    Roster::default()
        .save(&workspace)
        .map_err(|e| miette::miette!("failed to write operator roster: {}", e))?;

    println!(
        "{} Initialized stock-take workspace at {}",
        style("✓").green(),
        style(workspace.root().display()).cyan()
    );
    println!();
    println!("Next steps:");
    println!("  stocktake operator add <name>   add yourself to the roster");
    println!("  stocktake import catalog.csv    load the parts master");
    println!("  stocktake scan <part-id>        start counting");

    Ok(())
}
