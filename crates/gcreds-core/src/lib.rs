//! # gcreds-core - Google user-credential flows
//!
//! Library crate behind the `gcreds` CLI. It runs the browser-based
//! OAuth 2.0 authorization-code flow with PKCE for Google accounts and
//! maintains the application-default-credentials file that the Google
//! client libraries consume.
//!
//! ## Features
//!
//! - **PKCE and anti-CSRF state** - every attempt uses fresh single-use
//!   secrets; the verifier only ever travels in the code-exchange request
//! - **Loopback redirect listener** - serves exactly one redirect on an
//!   OS-assigned port, acknowledges the browser, then releases the port
//! - **Refresh-first maintenance** - [`OAuthFlow::ensure_valid_credentials`]
//!   refreshes a stored token when it can and falls back to a fresh sign-in
//!   when the provider rejects it
//! - **Atomic credential store** - temp-file-and-rename writes, owner-only
//!   permissions, the fixed `authorized_user` schema
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gcreds_core::{ClientId, ClientSecret, OAuthAppConfig, OAuthFlow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OAuthAppConfig::new(
//!         ClientId::new("1234.apps.googleusercontent.com"),
//!         ClientSecret::new("not-actually-a-secret"),
//!         "/home/me/.config/gcreds/credentials.json",
//!     );
//!
//!     // Refreshes the stored credentials, or walks the user through a
//!     // browser sign-in when there is nothing usable on disk.
//!     OAuthFlow::new(config).ensure_valid_credentials().await?;
//!     Ok(())
//! }
//! ```

pub mod authorize;
pub mod error;
pub mod flow;
pub mod listener;
pub mod pkce;
pub mod redirect;
pub mod store;
pub mod token;
pub mod types;

#[cfg(test)]
mod test_support;

pub use authorize::GOOGLE_AUTH_URL;
pub use error::AuthError;
pub use flow::{BrowserLauncher, DEFAULT_SCOPES, OAuthFlow};
pub use listener::RedirectListener;
pub use pkce::{CsrfState, PkceChallenge};
pub use redirect::RedirectParams;
pub use store::{
    CredentialStore, CredentialsStatus, GOOGLE_APPLICATION_CREDENTIALS_ENV, StoredCredentials,
};
pub use token::{GOOGLE_TOKEN_URL, TokenClient};
pub use types::{
    AccessToken, AuthorizationCode, ClientId, ClientSecret, OAuthAppConfig, RedirectUri,
    RefreshToken, TokenPair,
};
