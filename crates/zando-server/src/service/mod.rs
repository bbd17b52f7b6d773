//! Service configuration and application state.

mod config;
mod state;

use thiserror::Error;

pub use self::config::{ServiceConfig, ServiceConfigBuilder, SessionCookieOptions};
pub use self::state::ServiceState;

/// Result type alias for service setup operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors raised while building the service from its configuration.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The configured API endpoint is not a valid URL.
    #[error("invalid API endpoint `{endpoint}`: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
    /// The API client could not be constructed.
    #[error("failed to create API client: {0}")]
    Client(#[from] zando_client::Error),
}
