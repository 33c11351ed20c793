//! Error types for the Dubilist API client.

use thiserror::Error;

/// Result type for Dubilist API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Dubilist API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configuration error (missing base URL, invalid content type)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response or a `success: false` envelope)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response shape)
    #[error("parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// HTTP status of an API-level failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403 responses, which usually mean a missing or
    /// expired bearer token.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}
