use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_FILE_NAME;

#[derive(Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// OAuth client id of the registered application
    pub client_id: Option<String>,
    /// OAuth client secret; for installed applications this value is not
    /// actually confidential
    pub client_secret: Option<String>,
    /// Where the credential file lives, overriding the data directory
    pub credentials_file: Option<PathBuf>,
    /// Scopes to request instead of the built-in defaults
    pub scopes: Option<Vec<String>>,
}

impl Config {
    pub fn load(base_path: &Path) -> Result<Config> {
        let config_path = base_path.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            // Create default config
            let default_config = Config::default();
            default_config.save(base_path)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    pub fn save(&self, base_path: &Path) -> Result<()> {
        let config_path = base_path.join(CONFIG_FILE_NAME);

        // Create directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }
}
