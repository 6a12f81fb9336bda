//! Interactive sign-in and credential maintenance for Google user accounts.
//!
//! [`OAuthFlow`] ties the other modules together: it keeps the credential
//! file usable via [`OAuthFlow::ensure_valid_credentials`], runs the
//! browser-based authorization when a refresh token is missing or rejected,
//! and persists what the token endpoint hands back. Only the refresh token
//! ever reaches disk.

use std::io;
use std::time::Duration;

use crate::authorize::{GOOGLE_AUTH_URL, build_authorization_url};
use crate::error::AuthError;
use crate::listener::RedirectListener;
use crate::pkce::{CsrfState, PkceChallenge};
use crate::store::{CredentialStore, StoredCredentials};
use crate::token::{GOOGLE_TOKEN_URL, TokenClient};
use crate::types::{OAuthAppConfig, TokenPair};

/// Scopes requested when none are configured: identity plus read/write
/// access to Cloud Storage.
pub const DEFAULT_SCOPES: &[&str] = &[
    "openid",
    "profile",
    "https://www.googleapis.com/auth/devstorage.read_write",
];

/// Hands an authorization URL to the user's browser.
///
/// The default launcher opens the system browser; tests substitute a
/// closure that plays the provider's redirect back at the listener.
pub type BrowserLauncher = Box<dyn Fn(&str) -> io::Result<()> + Send + Sync>;

/// The full authorization and refresh flow for one OAuth application.
pub struct OAuthFlow {
    config: OAuthAppConfig,
    store: CredentialStore,
    token_client: TokenClient,
    scopes: Vec<String>,
    redirect_timeout: Option<Duration>,
    browser: BrowserLauncher,
}

impl OAuthFlow {
    /// Create a flow against the fixed Google endpoints with the default
    /// scopes, an unbounded redirect wait, and the system browser.
    pub fn new(config: OAuthAppConfig) -> Self {
        let store = CredentialStore::new(config.credentials_file());
        Self {
            config,
            store,
            token_client: TokenClient::new(GOOGLE_TOKEN_URL),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            redirect_timeout: None,
            browser: Box::new(|url| webbrowser::open(url)),
        }
    }

    /// Replace the default scope set.
    pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Bound the wait for the browser redirect. Without a bound the flow
    /// waits until the redirect arrives or the process is interrupted.
    pub fn with_redirect_timeout(mut self, timeout: Duration) -> Self {
        self.redirect_timeout = Some(timeout);
        self
    }

    /// Replace the browser launcher.
    pub fn with_browser(mut self, browser: BrowserLauncher) -> Self {
        self.browser = browser;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_client = TokenClient::new(token_url);
        self
    }

    /// Make sure the credential file holds a refresh token the provider
    /// accepts.
    ///
    /// The ladder:
    /// 1. No usable file, or a stored refresh token that is empty: run the
    ///    interactive login.
    /// 2. Stored refresh token accepted by the token endpoint: done.
    /// 3. Refresh rejected by the provider, or an empty access token comes
    ///    back: run the interactive login.
    ///
    /// Transport and parse failures during refresh propagate; only a
    /// provider rejection falls back to a fresh login.
    pub async fn ensure_valid_credentials(&self) -> Result<(), AuthError> {
        let Some(credentials) = self.store.read() else {
            tracing::debug!("no stored credentials, starting interactive login");
            return self.login_interactive().await;
        };

        let refresh_token = credentials.refresh_token();
        if refresh_token.as_str().is_empty() {
            tracing::debug!("stored refresh token is empty, starting interactive login");
            return self.login_interactive().await;
        }

        match self
            .token_client
            .refresh_access_token(&self.config, refresh_token)
            .await
        {
            Ok(access_token) if !access_token.as_str().is_empty() => {
                tracing::debug!("stored refresh token accepted");
                Ok(())
            }
            Ok(_) => {
                tracing::warn!("token endpoint returned an empty access token, re-running login");
                self.login_interactive().await
            }
            Err(err) if err.is_refresh_recoverable() => {
                tracing::warn!(%err, "refresh rejected, re-running login");
                self.login_interactive().await
            }
            Err(err) => Err(err),
        }
    }

    /// Run the interactive login unconditionally, replacing any stored
    /// credentials.
    pub async fn login(&self) -> Result<(), AuthError> {
        // A fresh consent must not inherit anything from the old file
        self.store.delete()?;
        self.login_interactive().await
    }

    /// Delete the credential file. Succeeds when there is nothing to delete.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.delete()
    }

    async fn login_interactive(&self) -> Result<(), AuthError> {
        let pair = self.authorize_interactive().await?;
        // Only the refresh token is persisted; access tokens never reach disk
        let credentials = StoredCredentials::authorized_user(
            self.config.client_id().clone(),
            self.config.client_secret().clone(),
            pair.refresh_token,
        );
        self.store.write(&credentials)?;
        tracing::debug!("interactive login complete, credentials persisted");
        Ok(())
    }

    /// One authorization attempt: listener up, browser out, redirect back,
    /// code exchanged.
    async fn authorize_interactive(&self) -> Result<TokenPair, AuthError> {
        let pkce = PkceChallenge::generate();
        let state = CsrfState::generate();

        let listener = RedirectListener::bind()?;
        let redirect_uri = listener.redirect_uri();

        let auth_url = build_authorization_url(
            GOOGLE_AUTH_URL,
            self.config.client_id(),
            &redirect_uri,
            &self.scopes,
            &state,
            &pkce,
        );

        println!("Opening browser to sign in with Google...");
        if let Err(err) = (self.browser)(&auth_url) {
            tracing::warn!(%err, "could not open a browser");
            println!("Could not open a browser automatically.");
            println!("Visit this URL to continue signing in:\n\n{auth_url}\n");
        }
        println!("Waiting for the sign-in redirect...");

        let params = listener.wait(self.redirect_timeout)?;
        let code = params.validate(&state)?;

        self.token_client
            .exchange_code(&self.config, &code, &pkce, &redirect_uri)
            .await
    }
}
