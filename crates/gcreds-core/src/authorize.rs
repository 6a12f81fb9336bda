//! Authorization request construction.

use crate::pkce::{CsrfState, PkceChallenge};
use crate::types::{ClientId, RedirectUri};

/// Google's OAuth 2.0 authorization endpoint.
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Build the URL the browser is sent to for the consent screen.
///
/// Carries the challenge, never the verifier; the verifier only travels in
/// the later code-exchange request.
pub fn build_authorization_url(
    auth_url: &str,
    client_id: &ClientId,
    redirect_uri: &RedirectUri,
    scopes: &[String],
    state: &CsrfState,
    pkce: &PkceChallenge,
) -> String {
    let scope = scopes.join(" ");

    format!(
        "{}?response_type=code&scope={}&redirect_uri={}&client_id={}&state={}&code_challenge={}&code_challenge_method={}",
        auth_url,
        urlencoding::encode(&scope),
        urlencoding::encode(redirect_uri.as_str()),
        urlencoding::encode(client_id.as_str()),
        urlencoding::encode(state.as_str()),
        urlencoding::encode(&pkce.challenge),
        pkce.method()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_authorization_url() {
        let pkce = PkceChallenge::generate();
        let state = CsrfState::fixed("test-state");
        let redirect_uri = RedirectUri::loopback(49152);
        let client_id = ClientId::new("client-123.apps.googleusercontent.com");
        let scopes = vec!["openid".to_string(), "profile".to_string()];

        let url = build_authorization_url(
            GOOGLE_AUTH_URL,
            &client_id,
            &redirect_uri,
            &scopes,
            &state,
            &pkce,
        );

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=openid%20profile"));
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A49152%2F"));
        assert!(url.contains("client_id=client-123.apps.googleusercontent.com"));
        assert!(url.contains("state=test-state"));
        assert!(url.contains(&format!("code_challenge={}", pkce.challenge)));
        assert!(url.contains("code_challenge_method=S256"));
    }

    #[test]
    fn test_authorization_url_never_carries_verifier() {
        let pkce = PkceChallenge::generate();
        let state = CsrfState::fixed("s");
        let redirect_uri = RedirectUri::loopback(50000);
        let client_id = ClientId::new("id");

        let url = build_authorization_url(
            GOOGLE_AUTH_URL,
            &client_id,
            &redirect_uri,
            &["openid".to_string()],
            &state,
            &pkce,
        );

        assert!(!url.contains(&pkce.verifier));
    }
}
