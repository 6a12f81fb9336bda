//! Value types shared across the authorization flow.
//!
//! Every OAuth value gets its own newtype with an explicit accessor so a
//! refresh token can never be passed where an authorization code is expected.
//! Secret-bearing types redact their `Debug` output; tokens must never end up
//! in logs or error messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

macro_rules! value_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

macro_rules! redact_debug {
    ($name:ident) => {
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "(<redacted>)"))
            }
        }
    };
}

value_newtype! {
    /// OAuth client identifier issued by the provider console.
    ClientId
}
value_newtype! {
    /// OAuth client secret paired with the client identifier.
    ClientSecret
}
value_newtype! {
    /// Long-lived token exchanged for fresh access tokens.
    RefreshToken
}
value_newtype! {
    /// Short-lived bearer token. Held in memory only, never persisted.
    AccessToken
}
value_newtype! {
    /// Single-use code returned by the authorization redirect.
    AuthorizationCode
}

redact_debug!(ClientId);
redact_debug!(ClientSecret);
redact_debug!(RefreshToken);
redact_debug!(AccessToken);
redact_debug!(AuthorizationCode);

/// Loopback URI the provider redirects the browser back to.
///
/// Always `http://127.0.0.1:<port>/` with a port picked fresh per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectUri(String);

impl RedirectUri {
    pub fn loopback(port: u16) -> Self {
        Self(format!("http://127.0.0.1:{port}/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The two tokens returned by a successful authorization-code exchange.
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

/// Registered OAuth application plus the credential file it maintains.
///
/// Built once, read-only afterwards. Callers pass this value into every
/// operation that needs it; there is no global configuration.
#[derive(Clone)]
pub struct OAuthAppConfig {
    client_id: ClientId,
    client_secret: ClientSecret,
    credentials_file: PathBuf,
}

impl OAuthAppConfig {
    pub fn new(
        client_id: ClientId,
        client_secret: ClientSecret,
        credentials_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            credentials_file: credentials_file.into(),
        }
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    pub fn credentials_file(&self) -> &Path {
        &self.credentials_file
    }
}

impl fmt::Debug for OAuthAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthAppConfig")
            .field("credentials_file", &self.credentials_file)
            .finish_non_exhaustive()
    }
}
