use anyhow::{Context, Result};
use clap::Args;

use crate::args::{Cli, CliConfig};
use crate::client;
use crate::output::{self, OutputLevel};

#[derive(Args)]
pub struct RefreshArgs {
    /// Give up when no sign-in redirect arrives within this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl RefreshArgs {
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        let flow = client::build_flow(cli, cli_config, self.timeout)?;

        flow.ensure_valid_credentials()
            .await
            .context("Failed to refresh credentials")?;

        output::success("Credentials are ready", output_level);
        Ok(())
    }
}
