//! loglayout -- render structured log events as paginated HTML tables.

use clap::Parser;

use loglayout_cli::cli::{Cli, Commands};
use loglayout_cli::commands::{self, load_config};
use loglayout_cli::error::CliError;
use loglayout_cli::logging::init_tracing;
use loglayout_cli::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Logging starts even when the config is invalid; commands report the details.
    let general = load_config(&cli.config)
        .await
        .map(|config| config.general)
        .unwrap_or_default();
    if let Err(e) = init_tracing(&general, cli.log_level.as_deref()) {
        eprintln!("warning: {e}");
    }

    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Render(args) => commands::render::execute(args, &cli.config, &writer).await,
        Commands::Columns(args) => commands::columns::execute(args, &writer),
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}
