//! Middleware for `axum::Router` and HTTP request processing.

mod observability;
mod recovery;
mod session;

pub use observability::RouterObservabilityExt;
pub use recovery::RouterRecoveryExt;
pub use session::{require_admin, require_session};

/// Tracing target for the session guards.
pub const TRACING_TARGET_GUARD: &str = "zando_server::middleware::session";
