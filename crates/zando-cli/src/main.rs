#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use zando_server::handler::routes;
use zando_server::middleware::{RouterObservabilityExt, RouterRecoveryExt};
use zando_server::service::ServiceState;

use crate::config::{Cli, ServerConfig};

/// Tracing target for application startup.
pub const TRACING_TARGET_STARTUP: &str = "zando_cli::startup";

/// Tracing target for application shutdown.
pub const TRACING_TARGET_SHUTDOWN: &str = "zando_cli::shutdown";

/// Tracing target for configuration loading.
pub const TRACING_TARGET_CONFIG: &str = "zando_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    log_startup_info();

    cli.validate().context("invalid configuration")?;
    cli.log();

    let service_config = cli.gateway.to_service_config()?;
    let state = ServiceState::from_config(&service_config)
        .context("failed to initialize gateway state")?;

    let router = create_router(state, &cli.server);
    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs and tracing spans
/// 3. Routes (innermost) - actual request handlers
fn create_router(state: ServiceState, server: &ServerConfig) -> Router {
    routes(state)
        .with_observability()
        .with_recovery(server.request_timeout())
}

/// Initializes tracing with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Logs startup information.
fn log_startup_info() {
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting zando gateway"
    );

    tracing::debug!(
        target: TRACING_TARGET_STARTUP,
        pid = process::id(),
        arch = std::env::consts::ARCH,
        os = std::env::consts::OS,
        "build information"
    );
}
