//! Token endpoint client.
//!
//! One form-encoded POST pattern, two grant types: `authorization_code` with
//! the PKCE verifier, and `refresh_token`. The endpoint answers with JSON; a
//! non-success status is a typed, recoverable outcome rather than a fault.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::pkce::PkceChallenge;
use crate::types::{
    AccessToken, AuthorizationCode, OAuthAppConfig, RedirectUri, RefreshToken, TokenPair,
};

/// Google's OAuth 2.0 token endpoint, shared by both grant types.
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Code-exchange request body.
#[derive(Serialize)]
struct CodeExchangeRequest<'a> {
    grant_type: &'static str,
    code: &'a str,
    redirect_uri: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    code_verifier: &'a str,
}

/// Refresh request body. No verifier; PKCE only covers the initial exchange.
#[derive(Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
}

/// Successful code-exchange response. Anything else in the body is ignored.
#[derive(Deserialize)]
struct CodeExchangeResponse {
    access_token: AccessToken,
    refresh_token: RefreshToken,
}

/// Successful refresh response. The provider does not rotate refresh tokens
/// on this path, so only the access token is read.
#[derive(Deserialize)]
struct RefreshResponse {
    access_token: AccessToken,
}

/// HTTP client for the token endpoint.
pub struct TokenClient {
    http: reqwest::Client,
    token_url: String,
}

impl TokenClient {
    pub fn new(token_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_url: token_url.into(),
        }
    }

    /// Exchange an authorization code (plus its PKCE verifier) for a token
    /// pair.
    pub async fn exchange_code(
        &self,
        config: &OAuthAppConfig,
        code: &AuthorizationCode,
        pkce: &PkceChallenge,
        redirect_uri: &RedirectUri,
    ) -> Result<TokenPair, AuthError> {
        tracing::debug!("exchanging authorization code for tokens");

        let request = CodeExchangeRequest {
            grant_type: "authorization_code",
            code: code.as_str(),
            redirect_uri: redirect_uri.as_str(),
            client_id: config.client_id().as_str(),
            client_secret: config.client_secret().as_str(),
            code_verifier: &pkce.verifier,
        };

        let body = self.post_form(&request).await?;
        let response: CodeExchangeResponse = serde_json::from_str(&body)?;

        Ok(TokenPair {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        })
    }

    /// Trade a stored refresh token for a fresh access token.
    pub async fn refresh_access_token(
        &self,
        config: &OAuthAppConfig,
        refresh_token: &RefreshToken,
    ) -> Result<AccessToken, AuthError> {
        tracing::debug!("refreshing access token");

        let request = RefreshRequest {
            grant_type: "refresh_token",
            client_id: config.client_id().as_str(),
            client_secret: config.client_secret().as_str(),
            refresh_token: refresh_token.as_str(),
        };

        let body = self.post_form(&request).await?;
        let response: RefreshResponse = serde_json::from_str(&body)?;

        Ok(response.access_token)
    }

    /// POST a form-encoded body and return the response text, turning any
    /// non-success status into [`AuthError::ProviderRejected`].
    async fn post_form<T: Serialize>(&self, request: &T) -> Result<String, AuthError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "token endpoint rejected the request");
            return Err(AuthError::provider_rejected(status.as_u16(), body));
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockTokenEndpoint;
    use crate::types::{ClientId, ClientSecret};

    fn test_config() -> OAuthAppConfig {
        OAuthAppConfig::new(
            ClientId::new("test-client-id"),
            ClientSecret::new("test-client-secret"),
            "/tmp/unused-credentials.json",
        )
    }

    #[tokio::test]
    async fn test_exchange_code_posts_form_and_parses_tokens() {
        let server = MockTokenEndpoint::serve(vec![(
            200,
            r#"{"access_token": "at-1", "refresh_token": "rt-1", "expires_in": 3599}"#.to_string(),
        )]);

        let client = TokenClient::new(server.url.clone());
        let pkce = PkceChallenge::generate();
        let pair = client
            .exchange_code(
                &test_config(),
                &AuthorizationCode::new("the-code"),
                &pkce,
                &RedirectUri::loopback(49152),
            )
            .await
            .unwrap();

        assert_eq!(pair.access_token.as_str(), "at-1");
        assert_eq!(pair.refresh_token.as_str(), "rt-1");

        let requests = server.finish();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert!(request.starts_with("POST /token"));
        assert!(request.contains("application/x-www-form-urlencoded"));
        assert!(request.contains("grant_type=authorization_code"));
        assert!(request.contains("code=the-code"));
        assert!(request.contains("client_id=test-client-id"));
        assert!(request.contains("client_secret=test-client-secret"));
        assert!(request.contains(&format!("code_verifier={}", pkce.verifier)));
        // The challenge never travels in the exchange request
        assert!(!request.contains(&pkce.challenge));
    }

    #[tokio::test]
    async fn test_refresh_posts_refresh_grant() {
        let server = MockTokenEndpoint::serve(vec![(
            200,
            r#"{"access_token": "at-2", "expires_in": 3599, "scope": "openid"}"#.to_string(),
        )]);

        let client = TokenClient::new(server.url.clone());
        let token = client
            .refresh_access_token(&test_config(), &RefreshToken::new("rt-stored"))
            .await
            .unwrap();

        assert_eq!(token.as_str(), "at-2");

        let requests = server.finish();
        assert!(requests[0].contains("grant_type=refresh_token"));
        assert!(requests[0].contains("refresh_token=rt-stored"));
        assert!(!requests[0].contains("code_verifier"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_provider_rejection() {
        let server =
            MockTokenEndpoint::serve(vec![(400, r#"{"error": "invalid_grant"}"#.to_string())]);

        let client = TokenClient::new(server.url.clone());
        let result = client
            .refresh_access_token(&test_config(), &RefreshToken::new("rt-revoked"))
            .await;

        match result {
            Err(AuthError::ProviderRejected { status, body }) => {
                assert_eq!(status, 400);
                assert!(body.contains("invalid_grant"));
            }
            other => panic!("expected ProviderRejected, got {other:?}"),
        }

        server.finish();
    }

    #[tokio::test]
    async fn test_unparsable_success_body_is_token_response_error() {
        let server = MockTokenEndpoint::serve(vec![(200, "not json at all".to_string())]);

        let client = TokenClient::new(server.url.clone());
        let result = client
            .refresh_access_token(&test_config(), &RefreshToken::new("rt"))
            .await;

        assert!(matches!(result, Err(AuthError::TokenResponse(_))));
        server.finish();
    }

    #[tokio::test]
    async fn test_exchange_requires_refresh_token_in_response() {
        // A code-exchange answer without a refresh token is unusable
        let server =
            MockTokenEndpoint::serve(vec![(200, r#"{"access_token": "at-only"}"#.to_string())]);

        let client = TokenClient::new(server.url.clone());
        let result = client
            .exchange_code(
                &test_config(),
                &AuthorizationCode::new("c"),
                &PkceChallenge::generate(),
                &RedirectUri::loopback(49153),
            )
            .await;

        assert!(matches!(result, Err(AuthError::TokenResponse(_))));
        server.finish();
    }
}
