//! Error types for the loan advisor service.
//!
//! The conversation core is total and has no errors of its own. These cover
//! the service shell: configuration, the sentiment client, and the HTTP API.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Sentiment analysis client errors.
#[derive(Debug, thiserror::Error)]
pub enum SentimentError {
    #[error("Sentiment request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Sentiment service returned {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("Invalid response from sentiment service: {reason}")]
    InvalidResponse { reason: String },

    #[error("Sentiment request timed out after {timeout:?}")]
    Timeout { timeout: Duration },
}

/// Errors returned to HTTP clients as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
