//! Configuration for the Zando API client.

use std::time::Duration;

use url::Url;

/// Default timeout for API requests: 30 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default API endpoint for local development.
const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Configuration for the Zando API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the Zando API.
    pub base_url: Url,
    /// Default timeout for API requests.
    pub timeout: Duration,
    /// User-Agent header to send with requests.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: Self::default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Returns the default development endpoint.
    fn default_base_url() -> Url {
        Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("zando-gateway/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Creates a new configuration with the specified base URL.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Creates a new configuration with the specified timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates a new configuration with the specified user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }

    /// Returns the effective user agent, using default if empty.
    pub fn effective_user_agent(&self) -> String {
        if self.user_agent.is_empty() {
            Self::default_user_agent()
        } else {
            self.user_agent.clone()
        }
    }
}
