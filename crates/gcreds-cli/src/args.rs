use etcetera::BaseStrategy;
use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;
use crate::config::{self, Config};
use crate::constants::{BINARY_NAME, CREDENTIALS_FILE_NAME};

// Example strings for after_long_help
const CLI_EXAMPLES: &str = r#"EXAMPLES:
  gcreds login                             # Sign in with Google and store credentials
  gcreds refresh                           # Make sure stored credentials still work
  gcreds status                            # Inspect the credential file
  gcreds exec -- gsutil ls gs://my-bucket  # Run a command with credentials in the environment
  gcreds logout                            # Delete stored credentials"#;

pub struct CliConfig {
    pub config_base_path: PathBuf,
    pub data_base_path: PathBuf,
    pub config: Config,
}

impl CliConfig {
    pub fn load() -> Self {
        let strategy = etcetera::choose_base_strategy().unwrap();

        let config_base_path = strategy.config_dir().join(BINARY_NAME);
        let data_base_path = strategy.data_dir().join(BINARY_NAME);

        let config = config::Config::load(&config_base_path).unwrap();

        Self {
            config_base_path,
            data_base_path,
            config,
        }
    }

    /// Where the credential file lives, after every override is applied.
    ///
    /// Precedence: `--credentials-file`, then the config file, then
    /// `credentials.json` under the data directory.
    pub fn credentials_path(&self, cli: &Cli) -> PathBuf {
        cli.credentials_file
            .clone()
            .or_else(|| self.config.credentials_file.clone())
            .unwrap_or_else(|| self.data_base_path.join(CREDENTIALS_FILE_NAME))
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(about = "Manage Google user credentials for command-line tools")]
#[command(name = BINARY_NAME)]
#[command(after_long_help = CLI_EXAMPLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// OAuth client id; overrides the config file
    #[arg(long, env = "GCREDS_CLIENT_ID", global = true, value_name = "ID")]
    pub client_id: Option<String>,

    /// OAuth client secret; overrides the config file
    #[arg(
        long,
        env = "GCREDS_CLIENT_SECRET",
        global = true,
        value_name = "SECRET",
        hide_env_values = true
    )]
    pub client_secret: Option<String>,

    /// Credential file path; overrides the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub credentials_file: Option<PathBuf>,

    /// Verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Quiet output (only show errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}
