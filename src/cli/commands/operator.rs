//! `stocktake operator` command - roster, selection, and the gate flag

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::locate_workspace;
use crate::cli::GlobalOpts;
use crate::core::{Roster, Workspace};

#[derive(Subcommand, Debug)]
pub enum OperatorCommands {
    /// List operators on the roster
    List,

    /// Add an operator
    Add(AddArgs),

    /// Remove an operator
    Remove(RemoveArgs),

    /// Select the operator recorded on new scans
    Select(SelectArgs),

    /// Mark the operator gate as passed
    Login,

    /// Clear the gate flag
    Logout,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Operator name
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Operator name
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct SelectArgs {
    /// Operator name (omit to pick interactively)
    pub name: Option<String>,
}

pub fn run(cmd: OperatorCommands, global: &GlobalOpts) -> Result<()> {
    let workspace = locate_workspace(global.workspace.as_deref())?;
    let mut roster = Roster::load(&workspace);

    match cmd {
        OperatorCommands::List => {
            if roster.operators.is_empty() {
                println!("Roster is empty. Add one with: stocktake operator add <name>");
                return Ok(());
            }
            for name in &roster.operators {
                let marker = if roster.selected() == Some(name.as_str()) {
                    style("*").green().to_string()
                } else {
                    " ".to_string()
                };
                println!("{} {}", marker, name);
            }
            Ok(())
        }
        OperatorCommands::Add(args) => {
            if !roster.add(&args.name) {
                return Err(miette::miette!("'{}' is already on the roster", args.name));
            }
            save(&roster, &workspace)?;
            println!("{} Added operator {}", style("✓").green(), style(&args.name).cyan());
            Ok(())
        }
        OperatorCommands::Remove(args) => {
            if !roster.remove(&args.name) {
                return Err(miette::miette!("'{}' is not on the roster", args.name));
            }
            save(&roster, &workspace)?;
            println!("{} Removed operator {}", style("✓").green(), style(&args.name).cyan());
            Ok(())
        }
        OperatorCommands::Select(args) => {
            let name = match args.name {
                Some(name) => name,
                None => pick_interactively(&roster)?,
            };
            roster
                .select(&name)
                .map_err(|e| miette::miette!("{}", e))?;
            save(&roster, &workspace)?;
            println!("{} Selected operator {}", style("✓").green(), style(&name).cyan());
            Ok(())
        }
        OperatorCommands::Login => {
            roster.authenticated = true;
            save(&roster, &workspace)?;
            println!("{} Gate passed", style("✓").green());
            Ok(())
        }
        OperatorCommands::Logout => {
            roster.authenticated = false;
            save(&roster, &workspace)?;
            println!("{} Gate cleared", style("✓").green());
            Ok(())
        }
    }
}

fn pick_interactively(roster: &Roster) -> Result<String> {
    use dialoguer::{theme::ColorfulTheme, Select};

    if roster.operators.is_empty() {
        return Err(miette::miette!(
            "Roster is empty. Add one with: stocktake operator add <name>"
        ));
    }

    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select operator")
        .items(&roster.operators)
        .default(0)
        .interact()
        .map_err(|e| miette::miette!("{}", e))?;

    Ok(roster.operators[idx].clone())
}

fn save(roster: &Roster, workspace: &Workspace) -> Result<()> {
    roster
        .save(workspace)
        .map_err(|e| miette::miette!("failed to write operator roster: {}", e))
}
