//! Server error types.

use std::io;

use thiserror::Error;

/// Result type for server operations.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;

/// Error type for server startup and runtime failures.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Runtime server error.
    #[error("Runtime error: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Determines if this error is potentially recoverable.
    ///
    /// Recoverable errors might succeed if retried or if the environment
    /// changes (different port, wait for the resource).
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Bind { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::PermissionDenied
                    | io::ErrorKind::AddrInUse
                    | io::ErrorKind::AddrNotAvailable
            ),
            Self::Runtime(err) => matches!(
                err.kind(),
                io::ErrorKind::PermissionDenied
                    | io::ErrorKind::Interrupted
                    | io::ErrorKind::TimedOut
                    | io::ErrorKind::ConnectionRefused
            ),
        }
    }

    /// Provides a human-readable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Bind { source, .. } => match source.kind() {
                io::ErrorKind::PermissionDenied => {
                    Some("Try using a port above 1024 or run with appropriate privileges")
                }
                io::ErrorKind::AddrInUse => Some(
                    "The port is already in use. Try a different port or stop the conflicting service",
                ),
                io::ErrorKind::AddrNotAvailable => {
                    Some("The address is not available. Check network interface configuration")
                }
                _ => Some("Check network configuration and firewall settings"),
            },
            Self::Runtime(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_in_use_is_recoverable() {
        let error = ServerError::Bind {
            address: "127.0.0.1:3000".to_owned(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };

        assert!(error.is_recoverable());
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn generic_runtime_error_is_not_recoverable() {
        let error = ServerError::Runtime(io::Error::other("boom"));
        assert!(!error.is_recoverable());
        assert!(error.suggestion().is_none());
    }
}
