//! Client error types

use std::fmt;

use shared::error::ApiResponse;
use thiserror::Error;

/// Error body returned by the server (`ApiResponse` envelope)
///
/// Non-JSON bodies (e.g. axum extractor rejections) keep the raw text as the
/// message and have no code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: Option<u16>,
    pub message: String,
}

impl ErrorBody {
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str::<ApiResponse<serde_json::Value>>(text) {
            Ok(envelope) => Self {
                code: envelope.code,
                message: envelope.message,
            },
            Err(_) => Self {
                code: None,
                message: text.trim().to_string(),
            },
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (code {})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(ErrorBody),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(ErrorBody),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(ErrorBody),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(ErrorBody),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(ErrorBody),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Server error code, when the server sent one
    pub fn code(&self) -> Option<u16> {
        self.body().and_then(|b| b.code)
    }

    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            ClientError::Unauthorized(b)
            | ClientError::Forbidden(b)
            | ClientError::NotFound(b)
            | ClientError::Validation(b)
            | ClientError::Internal(b) => Some(b),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
