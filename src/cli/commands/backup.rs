//! `stocktake backup` / `stocktake restore` commands - whole-state snapshots

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::locate_workspace;
use crate::cli::GlobalOpts;
use crate::core::{Roster, StockDb};
use crate::engine::{backup, parse_snapshot, restore};

#[derive(clap::Args, Debug)]
pub struct BackupArgs {
    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct RestoreArgs {
    /// Snapshot document produced by `stocktake backup`
    pub file: PathBuf,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run_backup(args: BackupArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let db = StockDb::open(&workspace)?;
    let roster = Roster::load(&workspace);

    let json = backup(&db, &roster)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &json).into_diagnostic()?;
            println!(
                "{} Snapshot written to {}",
                style("✓").green(),
                style(path.display()).yellow()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

pub fn run_restore(args: RestoreArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;

    if !args.file.exists() {
        return Err(miette::miette!("File not found: {}", args.file.display()));
    }

    let json = std::fs::read_to_string(&args.file).into_diagnostic()?;

    // Full parse up front: a malformed snapshot must abort before any
    // mutation lands.
    let snapshot = parse_snapshot(&json).map_err(|e| miette::miette!("{}", e))?;

    if !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt("Restore replaces the whole record log. Continue?")
            .default(false)
            .interact()
            .map_err(|e| miette::miette!("{}", e))?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let mut db = StockDb::open(&workspace)?;
    let mut roster = Roster::load(&workspace);

    let outcome = restore(&mut db, &mut roster, snapshot)?;

    if outcome.users_replaced {
        roster
            .save(&workspace)
            .map_err(|e| miette::miette!("failed to write operator roster: {}", e))?;
    }

    println!(
        "{} Restore complete: {} record(s){}",
        style("✓").green(),
        style(outcome.records_replaced.unwrap_or(0)).cyan(),
        if outcome.users_replaced {
            ", operator roster replaced"
        } else {
            ""
        }
    );

    Ok(())
}
