use anyhow::Result;
use clap::Args;
use gcreds_core::{CredentialStore, CredentialsStatus};

use crate::args::{Cli, CliConfig};
use crate::output::{self, OutputLevel};

#[derive(Args)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Report the credential file state. Never touches the network.
    pub async fn run(
        &self,
        output_level: OutputLevel,
        cli_config: &CliConfig,
        cli: &Cli,
    ) -> Result<()> {
        let path = cli_config.credentials_path(cli);
        let store = CredentialStore::new(&path);

        match store.status() {
            CredentialsStatus::Absent => {
                output::note("No stored credentials", output_level);
                output::hint(
                    &format!("Run {} to sign in", output::format_command("gcreds login")),
                    output_level,
                );
            }
            CredentialsStatus::Invalid => {
                output::warning(
                    &format!("Credential file at {} cannot be read", path.display()),
                    output_level,
                );
                output::hint(
                    &format!("Run {} to replace it", output::format_command("gcreds login")),
                    output_level,
                );
            }
            CredentialsStatus::Present {
                has_refresh_token: true,
            } => {
                output::success(&format!("Credentials stored at {}", path.display()), output_level);
            }
            CredentialsStatus::Present {
                has_refresh_token: false,
            } => {
                output::warning("Stored credentials carry no refresh token", output_level);
                output::hint(
                    &format!(
                        "Run {} to sign in again",
                        output::format_command("gcreds login")
                    ),
                    output_level,
                );
            }
        }

        Ok(())
    }
}
