use std::path::PathBuf;
use thiserror::Error;

/// Error type for the authorization and credential-maintenance flow.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The provider (or the user at the consent screen) declined the request.
    #[error("authorization denied by provider: {0}")]
    AuthorizationDenied(String),

    /// The redirect request was missing required query parameters.
    #[error("malformed authorization redirect: code or state parameter missing")]
    MalformedRedirect,

    /// The state echoed back by the provider did not match the one we sent.
    #[error("state token mismatch in authorization redirect")]
    StateMismatch,

    /// A bounded redirect wait expired before the browser came back.
    #[error("timed out waiting for the authorization redirect")]
    RedirectTimeout,

    /// The token endpoint answered with a non-success status.
    ///
    /// Recoverable for the refresh path (the orchestrator falls back to an
    /// interactive login); terminal for the code-exchange path.
    #[error("token endpoint rejected the request: HTTP {status}: {body}")]
    ProviderRejected { status: u16, body: String },

    /// Transport-level failure talking to the token endpoint.
    #[error("network error during token request")]
    Network(#[from] reqwest::Error),

    /// The token endpoint returned 2xx but the body did not parse.
    #[error("unparsable token endpoint response")]
    TokenResponse(#[from] serde_json::Error),

    /// The loopback listener could not be set up or serviced.
    #[error("loopback redirect listener failed")]
    Listener(#[source] std::io::Error),

    /// Writing or deleting the credential file failed.
    ///
    /// Reads never produce this; an unreadable file reads as "no credentials".
    #[error("credential store operation failed for {path}")]
    Store {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl AuthError {
    /// Create a provider rejection from an HTTP status and response body.
    pub fn provider_rejected(status: u16, body: impl Into<String>) -> Self {
        Self::ProviderRejected {
            status,
            body: body.into(),
        }
    }

    /// Create a listener error from an I/O failure.
    pub fn listener(source: std::io::Error) -> Self {
        Self::Listener(source)
    }

    /// Create a credential store error.
    pub fn store(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Store {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Whether a failed refresh should fall back to an interactive login
    /// instead of failing the whole operation.
    pub fn is_refresh_recoverable(&self) -> bool {
        matches!(self, Self::ProviderRejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_rejected_display_carries_status_and_body() {
        let err = AuthError::provider_rejected(400, "invalid_grant");
        let rendered = err.to_string();
        assert!(rendered.contains("400"));
        assert!(rendered.contains("invalid_grant"));
    }

    #[test]
    fn test_only_provider_rejection_is_refresh_recoverable() {
        assert!(AuthError::provider_rejected(401, "").is_refresh_recoverable());
        assert!(!AuthError::StateMismatch.is_refresh_recoverable());
        assert!(!AuthError::RedirectTimeout.is_refresh_recoverable());
        assert!(
            !AuthError::store("/tmp/adc.json", std::io::Error::other("disk full"))
                .is_refresh_recoverable()
        );
    }
}
