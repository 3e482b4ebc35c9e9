use clap::Parser;
use miette::Result;
use stocktake::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => stocktake::cli::commands::init::run(args),
        Commands::Import(args) => stocktake::cli::commands::import::run(args, &global),
        Commands::Scan(args) => stocktake::cli::commands::scan::run(args, &global),
        Commands::Suggest(args) => stocktake::cli::commands::suggest::run(args, &global),
        Commands::Related(args) => stocktake::cli::commands::related::run(args, &global),
        Commands::Log(cmd) => stocktake::cli::commands::log::run(cmd, &global),
        Commands::Export(args) => stocktake::cli::commands::export::run(args, &global),
        Commands::Merge(args) => stocktake::cli::commands::merge::run(args, &global),
        Commands::Backup(args) => stocktake::cli::commands::backup::run_backup(args, &global),
        Commands::Restore(args) => stocktake::cli::commands::backup::run_restore(args, &global),
        Commands::Catalog(cmd) => stocktake::cli::commands::catalog::run(cmd, &global),
        Commands::Operator(cmd) => stocktake::cli::commands::operator::run(cmd, &global),
        Commands::Status(args) => stocktake::cli::commands::status::run(args, &global),
        Commands::Completions(args) => stocktake::cli::commands::completions::run(args),
    }
}
