//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Routes fall into three rings: public (login, registration, catalog data),
//! session-gated (classes, bookings, the member's own profile) and
//! admin-gated (member and product administration). The guards are applied
//! as route layers, so every handler behind them can extract the [`Session`]
//! from the request extensions without re-decoding the token.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler
//! [`Session`]: crate::extract::Session

mod admin;
mod authentication;
mod catalog;
mod classes;
mod error;
mod monitors;
mod profile;
mod registration;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};

pub use crate::handler::error::{Error, ErrorKind, ErrorResponse, Result, ValidationErrorDetail};
use crate::middleware::{require_admin, require_session};
use crate::service::ServiceState;

/// Tracing target for upstream API failures.
const TRACING_TARGET_UPSTREAM: &str = "zando_server::handler::upstream";

/// Maps an upstream API failure onto the gateway's error type.
///
/// Everything the Zando API refuses or fails to answer degrades to a
/// retryable gateway error, except upstream 404/409 which keep their meaning.
pub(crate) fn upstream(error: zando_client::Error) -> Error<'static> {
    tracing::error!(
        target: TRACING_TARGET_UPSTREAM,
        error = %error,
        timeout = error.is_timeout(),
        connect = error.is_connect(),
        "Zando API call failed"
    );

    match error.status() {
        Some(StatusCode::NOT_FOUND) => ErrorKind::NotFound.into_error(),
        Some(StatusCode::CONFLICT) => ErrorKind::Conflict.into_error(),
        _ => ErrorKind::BadGateway.into_error(),
    }
}

#[inline]
async fn fallback_handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Routes gated on an `ADMIN` session.
fn admin_routes() -> Router<ServiceState> {
    Router::new()
        .route("/admin/members", get(admin::list_members))
        .route("/admin/products", get(admin::list_products))
        .route("/admin/products/{id}", delete(admin::delete_product))
        .route_layer(from_fn(require_admin))
}

/// Routes gated on any valid session.
fn session_routes() -> Router<ServiceState> {
    Router::new()
        .route("/classes", get(classes::upcoming_classes))
        .route("/bookings", post(classes::book_class))
        .route("/user/info", get(profile::member_profile))
        .merge(admin_routes())
        .route_layer(from_fn(require_session))
}

/// Routes reachable without a session.
fn public_routes() -> Router<ServiceState> {
    Router::new()
        .route("/", get(monitors::service_info))
        .route("/health", get(monitors::service_info))
        .route("/login", post(authentication::login))
        .route("/logout", post(authentication::logout))
        .route("/register", post(registration::register))
        .route("/memberships", get(catalog::memberships))
        .route("/products", get(catalog::products))
}

/// Returns the complete gateway [`Router`] with state applied.
pub fn routes(state: ServiceState) -> Router {
    Router::new()
        .merge(session_routes())
        .merge(public_routes())
        .fallback(fallback_handler)
        .with_state(state)
}
