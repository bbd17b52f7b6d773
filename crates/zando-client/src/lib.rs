//! HTTP client for the external Zando fitness API.
//!
//! The gateway holds no state of its own: every page is rendered from data the
//! Zando API returns. This crate wraps that API with a typed [`ApiClient`],
//! including the credential exchange that trades an email/password pair for an
//! opaque [`AccessToken`].
//!
//! # Example
//!
//! ```rust,ignore
//! use zando_client::{ApiClient, ApiConfig, Credentials};
//!
//! let client = ApiClient::new(ApiConfig::default())?;
//!
//! let credentials = Credentials::new("jane@example.com", "hunter2!A");
//! let Some(token) = client.authenticate(&credentials).await else {
//!     return Err("authentication failed".into());
//! };
//!
//! let classes = client.classes(Some(&token)).await?;
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod client;
mod config;
mod credentials;
mod error;
mod types;

pub use crate::client::{ApiClient, TRACING_TARGET};
pub use crate::config::ApiConfig;
pub use crate::credentials::{AccessToken, Credentials};
pub use crate::error::{Error, Result};
pub use crate::types::{
    FitnessClass, Member, MemberBooking, Membership, NewBooking, NewRegistration, Person, Product,
};
