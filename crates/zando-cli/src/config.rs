//! CLI configuration management.
//!
//! Two configuration groups:
//!
//! ```text
//! Cli
//! ├── server:  ServerConfig   # Host, port, shutdown
//! └── gateway: GatewayConfig  # Zando API endpoint, timeouts, cookies
//! ```
//!
//! All options can be provided via CLI arguments or environment variables.
//! Use `--help` to see the full list.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::{Args, Parser};
use serde::{Deserialize, Serialize};
use zando_server::service::ServiceConfig;

use crate::TRACING_TARGET_CONFIG;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "zando")]
#[command(about = "Zando gym-membership gateway")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// External Zando API and session cookie configuration.
    #[clap(flatten)]
    pub gateway: GatewayConfig,
}

impl Cli {
    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.gateway
            .validate()
            .context("invalid gateway configuration")?;
        Ok(())
    }

    /// Logs configuration at startup (no sensitive information).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            host = %self.server.host,
            port = self.server.port,
            request_timeout_secs = self.server.request_timeout,
            shutdown_timeout_secs = self.server.shutdown_timeout,
            "Server configuration loaded"
        );
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            api_endpoint = %self.gateway.api_endpoint,
            api_timeout_secs = self.gateway.api_timeout,
            secure_cookies = !self.gateway.insecure_cookies,
            "Gateway configuration loaded"
        );
    }
}

/// HTTP server configuration.
///
/// # Environment Variables
///
/// - `HOST` - Server host address (default: 127.0.0.1)
/// - `PORT` - Server port (default: 3000, valid range: 1024-65535)
/// - `REQUEST_TIMEOUT` - Request processing timeout in seconds (default: 30)
/// - `SHUTDOWN_TIMEOUT` - Graceful shutdown timeout in seconds (default: 30)
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Host address to bind the server to.
    ///
    /// Use "127.0.0.1" for localhost only, "0.0.0.0" for all interfaces.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// TCP port number for the server to listen on.
    ///
    /// Must be in the range 1024-65535. Ports below 1024 require root
    /// privileges.
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Maximum time in seconds to wait for a request to complete.
    ///
    /// Requests exceeding this timeout are terminated with a JSON error
    /// response. Valid range: 1-300 seconds.
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Maximum time in seconds to wait for graceful shutdown.
    ///
    /// During shutdown, the server stops accepting new connections and waits
    /// up to this duration for in-flight requests. Valid range: 1-300.
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 30)]
    pub shutdown_timeout: u64,
}

/// Default host address for development.
fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

impl ServerConfig {
    /// Validates all configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if the port is privileged or a timeout is outside
    /// its valid range.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.port < 1024 {
            return Err(anyhow!(
                "Port {} is below 1024. Use ports 1024-65535 to avoid requiring root privileges.",
                self.port
            ));
        }

        if self.request_timeout == 0 || self.request_timeout > 300 {
            return Err(anyhow!(
                "Request timeout {} seconds is invalid. Must be between 1 and 300 seconds.",
                self.request_timeout
            ));
        }

        if self.shutdown_timeout == 0 || self.shutdown_timeout > 300 {
            return Err(anyhow!(
                "Shutdown timeout {} seconds is invalid. Must be between 1 and 300 seconds.",
                self.shutdown_timeout
            ));
        }

        Ok(())
    }

    /// Returns the complete socket address for server binding.
    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns the request processing timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Returns whether the server is configured to bind to all interfaces.
    #[must_use]
    pub const fn binds_to_all_interfaces(&self) -> bool {
        match self.host {
            IpAddr::V4(addr) => addr.is_unspecified(),
            IpAddr::V6(addr) => addr.is_unspecified(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: 3000,
            request_timeout: 30,
            shutdown_timeout: 30,
        }
    }
}

/// Gateway configuration: the external Zando API and session cookies.
///
/// # Environment Variables
///
/// - `API_ENDPOINT` - Base URL of the Zando API (default: http://localhost:8080/)
/// - `API_TIMEOUT` - Upstream request timeout in seconds (default: 30)
/// - `INSECURE_COOKIES` - Drop the `Secure` cookie attribute (default: off)
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct GatewayConfig {
    /// Base URL of the external Zando API.
    #[arg(long, env = "API_ENDPOINT", default_value = "http://localhost:8080/")]
    pub api_endpoint: String,

    /// Maximum time in seconds to wait for an upstream API response.
    ///
    /// Valid range: 1-300 seconds.
    #[arg(long, env = "API_TIMEOUT", default_value_t = 30)]
    pub api_timeout: u64,

    /// Drops the `Secure` attribute from the session cookie.
    ///
    /// Only for plain-HTTP development setups; browsers will not send the
    /// cookie over HTTP otherwise.
    #[arg(long, env = "INSECURE_COOKIES")]
    #[serde(default)]
    pub insecure_cookies: bool,
}

impl GatewayConfig {
    /// Validates all configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an absolute URL or the
    /// timeout is outside its valid range.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.api_endpoint.starts_with("http://") && !self.api_endpoint.starts_with("https://") {
            return Err(anyhow!(
                "API endpoint {:?} is invalid. Must be an absolute http(s) URL.",
                self.api_endpoint
            ));
        }

        if self.api_timeout == 0 || self.api_timeout > 300 {
            return Err(anyhow!(
                "API timeout {} seconds is invalid. Must be between 1 and 300 seconds.",
                self.api_timeout
            ));
        }

        Ok(())
    }

    /// Builds the service configuration consumed by the gateway state.
    pub fn to_service_config(&self) -> anyhow::Result<ServiceConfig> {
        ServiceConfig::builder()
            .with_api_endpoint(self.api_endpoint.as_str())
            .with_request_timeout_secs(self.api_timeout)
            .with_secure_cookies(!self.insecure_cookies)
            .build()
            .context("failed to build service configuration")
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "http://localhost:8080/".to_owned(),
            api_timeout: 30,
            insecure_cookies: false,
        }
    }
}
