//! App [`state`] configuration.
//!
//! [`state`]: crate::service::ServiceState

use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use url::Url;
use zando_client::{ApiClient, ApiConfig};

use crate::service::{Result, ServiceError};

/// Default values for configuration options.
mod defaults {
    /// Default Zando API endpoint for development.
    pub const API_ENDPOINT: &str = "http://localhost:8080/";

    /// Default timeout for upstream API requests in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Session cookies require HTTPS unless explicitly relaxed.
    pub const SECURE_COOKIES: bool = true;
}

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[must_use = "config does nothing unless you use it"]
#[builder(pattern = "owned", setter(into, strip_option, prefix = "with"))]
pub struct ServiceConfig {
    /// Base URL of the external Zando API.
    #[builder(default = "defaults::API_ENDPOINT.to_string()")]
    pub api_endpoint: String,

    /// Timeout for upstream API requests in seconds.
    #[builder(default = "defaults::REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,

    /// Whether the session cookie carries the `Secure` attribute.
    ///
    /// Disable only for plain-HTTP development setups.
    #[builder(default = "defaults::SECURE_COOKIES")]
    pub secure_cookies: bool,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Creates the client for the external Zando API.
    pub fn connect_api(&self) -> Result<ApiClient> {
        let base_url =
            Url::parse(&self.api_endpoint).map_err(|source| ServiceError::InvalidEndpoint {
                endpoint: self.api_endpoint.clone(),
                source,
            })?;

        let api_config = ApiConfig::default()
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(self.request_timeout_secs));

        Ok(ApiClient::new(api_config)?)
    }

    /// Returns the session cookie attributes derived from this configuration.
    pub fn cookie_options(&self) -> SessionCookieOptions {
        SessionCookieOptions {
            secure: self.secure_cookies,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_endpoint: defaults::API_ENDPOINT.to_string(),
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            secure_cookies: defaults::SECURE_COOKIES,
        }
    }
}

/// Attributes applied to the `accessToken` session cookie.
///
/// The cookie is always HTTP-only and scoped to `/`; its lifetime is bounded
/// by the token's own `exp` claim, so no `Max-Age` is set.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookieOptions {
    /// Whether to set the `Secure` attribute.
    pub secure: bool,
}
