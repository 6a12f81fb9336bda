use anyhow::Result;
use clap::Args;
use gcreds_core::{CredentialStore, CredentialsStatus};

use crate::args::{Cli, CliConfig};
use crate::output::{self, OutputLevel};

#[derive(Args)]
pub struct LogoutArgs {}

impl LogoutArgs {
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        let store = CredentialStore::new(cli_config.credentials_path(cli));

        match store.status() {
            CredentialsStatus::Absent => {
                output::note("No stored credentials to remove", output_level);
            }
            _ => {
                store.delete()?;
                output::success("Stored credentials removed", output_level);
            }
        }

        Ok(())
    }
}
