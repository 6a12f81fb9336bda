use anyhow::{Context, Result};
use clap::Args;
use gcreds_core::GOOGLE_APPLICATION_CREDENTIALS_ENV;

use crate::args::{Cli, CliConfig};
use crate::client;
use crate::output::OutputLevel;

#[derive(Args)]
pub struct ExecArgs {
    /// Give up when no sign-in redirect arrives within this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Command to run with credentials available in the environment
    #[arg(required = true, last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl ExecArgs {
    pub async fn run(
        &self,
        _output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        let flow = client::build_flow(cli, cli_config, self.timeout)?;
        flow.ensure_valid_credentials()
            .await
            .context("Failed to prepare credentials")?;

        let credentials_path = cli_config.credentials_path(cli);
        let (program, args) = match self.command.split_first() {
            Some(split) => split,
            None => anyhow::bail!("No command given after --"),
        };

        // stdio is inherited, so the child owns the terminal until it exits
        let status = tokio::process::Command::new(program)
            .args(args)
            .env(GOOGLE_APPLICATION_CREDENTIALS_ENV, &credentials_path)
            .status()
            .await
            .with_context(|| format!("Failed to run {program}"))?;

        std::process::exit(status.code().unwrap_or(1));
    }
}
