//! Application state and dependency injection.

use zando_client::ApiClient;

use crate::service::{Result, ServiceConfig, SessionCookieOptions};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    api_client: ApiClient,
    cookie_options: SessionCookieOptions,
}

impl ServiceState {
    /// Initializes application state from configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self {
            api_client: config.connect_api()?,
            cookie_options: config.cookie_options(),
        })
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(api_client: ApiClient);
impl_di!(cookie_options: SessionCookieOptions);
