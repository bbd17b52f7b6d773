//! Session and role guards for page routes.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::extract::Session;
use crate::middleware::TRACING_TARGET_GUARD;

/// Requires a valid, unexpired session to proceed with the request.
///
/// The [`Session`] extractor rejects requests without a decodable, future-dated
/// access token; its rejection renders as a `303` redirect to `/login`. The
/// projected session is cached in the request extensions, so handlers behind
/// this guard extract it without decoding the token again.
pub async fn require_session(_session: Session, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// Requires the session to belong to an administrator.
///
/// Signed-in users without the `ADMIN` role are sent back to the home page;
/// signed-out users are handled by the [`Session`] extractor as in
/// [`require_session`].
pub async fn require_admin(session: Session, request: Request, next: Next) -> Response {
    if !session.is_admin() {
        tracing::debug!(
            target: TRACING_TARGET_GUARD,
            user_id = session.user_id,
            role = %session.role,
            "Non-admin session on an admin route, redirecting home"
        );
        return Redirect::to("/").into_response();
    }

    next.run(request).await
}
