//! HTTP server startup with graceful shutdown.

mod error;
mod shutdown;

/// Tracing target for server startup events.
pub const TRACING_TARGET_STARTUP: &str = "zando_cli::server::startup";

/// Tracing target for server shutdown events.
pub const TRACING_TARGET_SHUTDOWN: &str = "zando_cli::server::shutdown";

use axum::Router;
pub use error::{Result, ServerError};
use shutdown::shutdown_signal;
use tokio::net::TcpListener;

use crate::config::ServerConfig;

/// Binds the configured address and serves the router until shutdown.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server
/// encounters a fatal error during operation.
pub async fn serve(app: Router, config: ServerConfig) -> Result<()> {
    let addr = config.server_addr();

    let listener = TcpListener::bind(addr).await.map_err(|source| {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            addr = %addr,
            error = %source,
            "Failed to bind to address"
        );
        ServerError::Bind {
            address: addr.to_string(),
            source,
        }
    })?;

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        addr = %addr,
        "Server is ready and listening for connections"
    );

    if config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_STARTUP,
            "Server is bound to all interfaces. Ensure firewall rules are properly configured."
        );
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_SHUTDOWN,
                error = %err,
                "Server encountered an error"
            );
            ServerError::Runtime(err)
        })?;

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        drain_timeout_secs = config.shutdown_timeout,
        "Server shut down gracefully"
    );
    Ok(())
}
