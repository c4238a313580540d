//! Error types for memoir-api

use thiserror::Error;

/// Result type alias using memoir-api Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the diary backend
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (connection, DNS, protocol)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend returned a non-success status
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid base URL or other client configuration problem
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create a status error, truncating long response bodies.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let mut message = body.into();
        if message.chars().count() > 200 {
            message = message.chars().take(200).collect::<String>() + "...";
        }
        Self::Status { status, message }
    }

    /// Whether this failure came from the network rather than the backend.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_truncates_long_bodies() {
        let body = "x".repeat(500);
        let e = Error::status(500, body);
        match e {
            Error::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message.chars().count(), 203); // 200 chars + "..."
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[test]
    fn test_status_keeps_short_bodies() {
        let e = Error::status(404, "not found");
        match e {
            Error::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "not found");
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[test]
    fn test_is_transport() {
        assert!(!Error::status(500, "boom").is_transport());
        assert!(!Error::UnexpectedResponse("shape".into()).is_transport());
    }
}
