//! Token session for the notes admin API.

use std::fmt;
use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::error::parse_api_error;
use crate::util::is_http_url;

/// Opaque credential attached to authenticated requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value for authenticated requests.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Token {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Token").field(&"[REDACTED]").finish()
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token endpoint: {0}")]
    InvalidConfiguration(String),
    #[error("Token request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Token API error: {0}")]
    Api(String),
    #[error("Token response did not include a token")]
    MissingToken,
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Lazily-acquired, process-wide token session.
///
/// Clones share one cell: the first successful exchange stores the token and
/// every later call reuses it without network I/O. A failed exchange leaves
/// the cell unset, so the next dependent operation triggers a fresh exchange;
/// nothing retries on its own. A held token is never refreshed or
/// invalidated, so once it goes stale server-side every subsequent call
/// fails for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    endpoint: String,
    client: Client,
    token: Arc<OnceCell<Token>>,
}

impl AuthSession {
    pub fn new(endpoint: impl Into<String>) -> AuthResult<Self> {
        let endpoint = endpoint.into();
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "token endpoint must not be empty".to_string(),
            ));
        }
        if !is_http_url(endpoint) {
            return Err(AuthError::InvalidConfiguration(
                "token endpoint must include http:// or https://".to_string(),
            ));
        }

        Ok(Self {
            endpoint: endpoint.to_string(),
            client: Client::builder().build()?,
            token: Arc::new(OnceCell::new()),
        })
    }

    /// The token currently held, without performing any I/O.
    #[must_use]
    pub fn current_token(&self) -> Option<Token> {
        self.token.get().cloned()
    }

    /// Return the held token, exchanging for one first if absent.
    ///
    /// Concurrent callers before any token exists coalesce into a single
    /// issuance request.
    pub async fn acquire(&self) -> AuthResult<Token> {
        self.token
            .get_or_try_init(|| self.exchange())
            .await
            .map(Clone::clone)
    }

    async fn exchange(&self) -> AuthResult<Token> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }

        let payload = response.json::<TokenResponse>().await?;
        let token = payload
            .token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        tracing::debug!("acquired notes API token");
        Ok(Token(token))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_endpoints() {
        assert!(AuthSession::new("  ").is_err());
        assert!(AuthSession::new("example.com/auth_token/").is_err());
        assert!(AuthSession::new("https://example.com/rna/auth_token/").is_ok());
    }

    #[test]
    fn current_token_is_none_before_exchange() {
        let session = AuthSession::new("https://example.com/rna/auth_token/").unwrap();
        assert!(session.current_token().is_none());
    }

    #[test]
    fn token_debug_redacts_value() {
        let token = Token("secret-token".to_string());
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn token_header_value_uses_token_scheme() {
        let token = Token("abc123".to_string());
        assert_eq!(token.header_value(), "Token abc123");
    }

    #[test]
    fn token_response_tolerates_missing_field() {
        let payload: TokenResponse = serde_json::from_str("{}").unwrap();
        assert!(payload.token.is_none());
    }
}
