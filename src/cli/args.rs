//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    backup::{BackupArgs, RestoreArgs},
    catalog::CatalogCommands,
    completions::CompletionsArgs,
    export::ExportArgs,
    import::ImportArgs,
    init::InitArgs,
    log::LogCommands,
    merge::MergeArgs,
    operator::OperatorCommands,
    related::RelatedArgs,
    scan::ScanArgs,
    status::StatusArgs,
    suggest::SuggestArgs,
};

#[derive(Parser)]
#[command(name = "stocktake")]
#[command(author, version, about = "Offline warehouse stock-take toolkit")]
#[command(
    long_about = "A CLI for physical inventory counts against a pre-loaded parts catalog: \
                  bulk catalog ingestion, scan classification, related-item lookup, and \
                  count reconciliation - all offline."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Workspace root (default: auto-detect by finding .stocktake/)
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new stock-take workspace
    Init(InitArgs),

    /// Import a catalog file, replacing the parts master
    Import(ImportArgs),

    /// Record one or more scanned part identifiers
    Scan(ScanArgs),

    /// Autocomplete catalog candidates for a partial identifier
    Suggest(SuggestArgs),

    /// List catalog items related to a counted part
    Related(RelatedArgs),

    /// Inspect and manage the record log
    #[command(subcommand)]
    Log(LogCommands),

    /// Export the record log as CSV
    Export(ExportArgs),

    /// Merge an exported record CSV into the log
    Merge(MergeArgs),

    /// Write a snapshot of records and operators
    Backup(BackupArgs),

    /// Replace records and operators from a snapshot
    Restore(RestoreArgs),

    /// Query the parts catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Manage the operator roster
    #[command(subcommand)]
    Operator(OperatorCommands),

    /// Show the count-so-far dashboard
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Just part ids, one per line
    Id,
}
