// Binary entry point for gcreds-cli

mod args;
mod client;
mod commands;
mod config;
mod constants;
mod output;

use anyhow::Result;
use args::{Cli, CliConfig};
use clap::Parser;
use commands::Commands;
use output::OutputLevel;

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

/// Parse CLI arguments, load configuration and dispatch to the requested
/// sub-command.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let cli_config = CliConfig::load();

    let output_level = if cli.quiet {
        OutputLevel::Quiet
    } else if cli.verbose {
        OutputLevel::Verbose
    } else {
        OutputLevel::Normal
    };

    match &cli.command {
        Commands::Login(args) => args.run(output_level, &cli_config, &cli).await?,
        Commands::Refresh(args) => args.run(output_level, &cli_config, &cli).await?,
        Commands::Logout(args) => args.run(output_level, &cli_config, &cli).await?,
        Commands::Status(args) => args.run(output_level, &cli_config, &cli).await?,
        Commands::Exec(args) => args.run(output_level, &cli_config, &cli).await?,
    }

    Ok(())
}

/// Send tracing output to stderr, honoring RUST_LOG when set.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "gcreds_cli=debug,gcreds_core=debug"
    } else {
        "gcreds_cli=warn,gcreds_core=warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
