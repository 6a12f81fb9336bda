//! Parsing and validation of the authorization redirect.
//!
//! The loopback listener hands the raw request target over; this module pulls
//! out the query parameters and decides whether the attempt produced a usable
//! authorization code.

use serde::Deserialize;

use crate::error::AuthError;
use crate::pkce::CsrfState;
use crate::types::AuthorizationCode;

/// Query parameters the provider may attach to the redirect.
///
/// All optional; anything the provider adds beyond these is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl RedirectParams {
    /// Extract redirect parameters from an HTTP request target such as
    /// `/?code=abc&state=xyz`.
    ///
    /// A target without a query string, or one that fails to decode, yields
    /// all-`None` params; validation then reports the redirect as malformed.
    pub fn from_request_target(target: &str) -> Self {
        let query = target.splitn(2, '?').nth(1).unwrap_or("");
        serde_urlencoded::from_str(query).unwrap_or_default()
    }

    /// Decide whether this redirect carries a usable authorization code.
    ///
    /// Checks run in a fixed order:
    /// 1. an `error` parameter wins over everything else,
    /// 2. a missing `code` or `state` makes the redirect malformed,
    /// 3. a `state` that is not exactly the one we sent is rejected,
    /// 4. only then is the code accepted.
    pub fn validate(&self, expected_state: &CsrfState) -> Result<AuthorizationCode, AuthError> {
        if let Some(error) = &self.error {
            return Err(AuthError::AuthorizationDenied(error.clone()));
        }

        let (code, state) = match (&self.code, &self.state) {
            (Some(code), Some(state)) => (code, state),
            _ => return Err(AuthError::MalformedRedirect),
        };

        if state != expected_state.as_str() {
            return Err(AuthError::StateMismatch);
        }

        Ok(AuthorizationCode::new(code.clone()))
    }
}
