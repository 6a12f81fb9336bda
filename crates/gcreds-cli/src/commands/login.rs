use anyhow::{Context, Result};
use clap::Args;

use crate::args::{Cli, CliConfig};
use crate::client;
use crate::output::{self, OutputLevel};

#[derive(Args)]
pub struct LoginArgs {
    /// Give up when no sign-in redirect arrives within this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl LoginArgs {
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        let flow = client::build_flow(cli, cli_config, self.timeout)?;

        flow.login().await.context("Failed to complete sign-in")?;

        output::success("Signed in; credentials stored", output_level);
        Ok(())
    }
}
