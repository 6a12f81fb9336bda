//! PKCE (Proof Key for Code Exchange) and anti-CSRF state generation.
//!
//! Implements RFC 7636 for the authorization code flow. Both values are drawn
//! fresh from the OS CSPRNG for every attempt and never reused.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes behind a verifier or state token.
const TOKEN_BYTES: usize = 32;

/// Base64url-encode 32 fresh random bytes, without padding.
fn random_data_base64url() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// PKCE challenge pair consisting of verifier and challenge.
#[derive(Debug, Clone)]
pub struct PkceChallenge {
    /// The code verifier (sent with the token request)
    pub verifier: String,
    /// The code challenge (sent with the authorization request)
    pub challenge: String,
}

impl PkceChallenge {
    /// Generate a new PKCE challenge pair.
    ///
    /// Creates a 32-byte random code verifier and derives the S256 challenge
    /// from its ASCII form.
    pub fn generate() -> Self {
        let verifier = random_data_base64url();

        // Code challenge: base64url(sha256(verifier))
        let mut hasher = Sha256::new();
        hasher.update(verifier.as_bytes());
        let hash = hasher.finalize();
        let challenge = URL_SAFE_NO_PAD.encode(hash);

        Self { verifier, challenge }
    }

    /// Get the challenge method (always "S256").
    pub fn method(&self) -> &'static str {
        "S256"
    }
}

/// Random state token tying an authorization redirect to the attempt that
/// requested it.
///
/// The provider echoes it back unchanged; the validator requires an exact
/// match before the authorization code is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfState(String);

impl CsrfState {
    /// Generate a new state token from 32 random bytes.
    pub fn generate() -> Self {
        Self(random_data_base64url())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
impl CsrfState {
    /// Fixed state value for validator tests.
    pub(crate) fn fixed(value: &str) -> Self {
        Self(value.to_string())
    }
}
