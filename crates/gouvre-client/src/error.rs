//! Client error types

use crate::types::ApiError;
use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure: DNS, connect, timeout or reading the body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a failure status.
    ///
    /// Displays as the raw response body so callers see exactly what the
    /// server said, JSON envelope or not.
    #[error("{body}")]
    Api { status: StatusCode, body: String },

    /// A success response carried a body that is not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request body could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The configured endpoint is not a usable base URL
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ClientError {
    /// HTTP status of an API failure
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Raw response body of an API failure
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Parse the body of an API failure as the server's error envelope.
    ///
    /// Returns `None` for non-API errors and for bodies of another shape.
    pub fn api_error(&self) -> Option<ApiError> {
        self.body().and_then(|body| serde_json::from_str(body).ok())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Check if the server rejected the bearer token or a secret
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}
