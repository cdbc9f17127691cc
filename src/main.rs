use clap::Parser;
use miette::Result;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use jcl::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
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

    // A .env in the working directory may carry JIRA_* settings
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    // RUST_LOG wins over -v/-q
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("jcl={}", cli.global.log_level()).to_lowercase()));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, "ignoring unreadable .env file");
        }
    }

    match cli.command {
        Commands::Filters(args) => jcl::cli::commands::filters::run(args, &cli.global),
        Commands::Boards(args) => jcl::cli::commands::boards::run(args, &cli.global),
        Commands::Auth => jcl::cli::commands::auth::run(&cli.global),
        Commands::Completions(args) => jcl::cli::commands::completions::run(args),
    }
}
