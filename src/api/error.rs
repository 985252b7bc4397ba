//! Error types for the course API

use thiserror::Error;

/// Errors that can occur when talking to the course API
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Token missing, expired, or rejected
    #[error("Not authorized")]
    Unauthorized,

    /// Course does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ApiError {
    /// Check if this error is worth retrying by the user
    pub fn is_recoverable(&self) -> bool {
        match self {
            ApiError::RequestError(_) => true,
            ApiError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Check if this error requires a new token
    pub fn requires_reauth(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::Status { status: 403, .. })
    }

    /// What the user can do about this error, if anything
    pub fn hint(&self) -> Option<&'static str> {
        if self.requires_reauth() {
            Some("set COURSEWALK_TOKEN or pass --token")
        } else if self.is_recoverable() {
            Some("try again later")
        } else {
            None
        }
    }

    /// Error text with the hint appended
    pub fn user_message(&self) -> String {
        match self.hint() {
            Some(hint) => format!("{} ({})", self, hint),
            None => self.to_string(),
        }
    }
}
