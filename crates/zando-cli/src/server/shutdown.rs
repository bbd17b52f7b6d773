//! Shutdown signal handling.

use std::future::pending;

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix;

use super::TRACING_TARGET_SHUTDOWN;

/// Resolves once the process receives SIGINT (Ctrl+C) or, on Unix, SIGTERM.
///
/// Handed to `axum::serve` as the graceful-shutdown trigger: when it resolves
/// the server stops accepting connections and drains in-flight requests. If a
/// signal handler cannot be installed the error is logged and that signal is
/// simply never acted on; the server does not shut down spuriously.
pub async fn shutdown_signal() {
    let interrupt = async {
        match ctrl_c().await {
            Ok(()) => log_signal("SIGINT"),
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_SHUTDOWN,
                    error = %error,
                    "Cannot listen for Ctrl+C"
                );
                pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                log_signal("SIGTERM");
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_SHUTDOWN,
                    error = %error,
                    "Cannot listen for SIGTERM"
                );
                pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        () = interrupt => {},
        () = terminate => {},
    }
}

fn log_signal(signal: &str) {
    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        signal,
        "Shutdown signal received, draining in-flight requests"
    );
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn stays_pending_until_a_signal_arrives() {
        let shutdown = tokio::time::timeout(Duration::from_millis(50), shutdown_signal()).await;
        assert!(shutdown.is_err(), "no signal was sent, must still be waiting");
    }
}
