//! Builds the core flow from CLI arguments and configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use gcreds_core::{ClientId, ClientSecret, OAuthAppConfig, OAuthFlow};

use crate::args::{Cli, CliConfig};

/// Resolve the OAuth application settings from flags, environment and the
/// config file.
pub fn oauth_app_config(cli: &Cli, cli_config: &CliConfig) -> Result<OAuthAppConfig> {
    let client_id = cli
        .client_id
        .clone()
        .or_else(|| cli_config.config.client_id.clone())
        .context(
            "No OAuth client id configured. Pass --client-id or set client_id in config.toml",
        )?;

    let client_secret = cli
        .client_secret
        .clone()
        .or_else(|| cli_config.config.client_secret.clone())
        .context(
            "No OAuth client secret configured. Pass --client-secret or set client_secret in config.toml",
        )?;

    Ok(OAuthAppConfig::new(
        ClientId::new(client_id),
        ClientSecret::new(client_secret),
        cli_config.credentials_path(cli),
    ))
}

/// Build the flow with every CLI override applied.
pub fn build_flow(
    cli: &Cli,
    cli_config: &CliConfig,
    timeout_secs: Option<u64>,
) -> Result<OAuthFlow> {
    let config = oauth_app_config(cli, cli_config)?;
    tracing::debug!(path = %config.credentials_file().display(), "using credential file");

    let mut flow = OAuthFlow::new(config);
    if let Some(scopes) = &cli_config.config.scopes {
        flow = flow.with_scopes(scopes.iter().cloned());
    }
    if let Some(secs) = timeout_secs {
        flow = flow.with_redirect_timeout(Duration::from_secs(secs));
    }

    Ok(flow)
}
