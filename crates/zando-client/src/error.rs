//! Internal error types for zando-client.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for zando-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for zando-client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("API rejected the request with status {0}")]
    Status(StatusCode),
    /// The login response carried no `set-cookie` header.
    #[error("missing set-cookie header in login response")]
    MissingAuthCookie,
    /// The login response cookies carried no `accessToken` field.
    #[error("accessToken missing from login response cookies")]
    MissingAccessToken,
    /// Response body failed to deserialize.
    #[error("deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` if the failure was a client-side timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Returns `true` if the failure happened while connecting.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect())
    }

    /// Returns the response status, if the API answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status) => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}
