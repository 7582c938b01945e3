//! Error types for relnotes-core

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::auth::AuthError;

/// Result type alias using relnotes-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in relnotes-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization failure
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success response from the notes API
    #[error("Notes API error: {0}")]
    Api(String),

    /// Token session failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid endpoint configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A remove control name that does not map to a rendered row
    #[error("Unknown remove control: {0}")]
    UnknownControl(String),

    /// The note is not part of the current view
    #[error("Note not found in the current view: {0}")]
    NoteNotFound(String),
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

/// Condense an API error response into a single displayable line.
pub(crate) fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.detail.or(payload.message).or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = crate::util::compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_api_error_prefers_detail_field() {
        let message = parse_api_error(
            StatusCode::FORBIDDEN,
            r#"{"detail": "Authentication credentials were not provided."}"#,
        );
        assert_eq!(
            message,
            "Authentication credentials were not provided. (403)"
        );
    }

    #[test]
    fn parse_api_error_falls_back_to_body_text() {
        let message = parse_api_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(message, "upstream down (502)");
    }

    #[test]
    fn parse_api_error_handles_empty_body() {
        let message = parse_api_error(StatusCode::NOT_FOUND, "");
        assert_eq!(message, "HTTP 404");
    }
}
