//! Member profile handler.

use axum::Json;
use axum::extract::State;
use zando_client::{ApiClient, Member};

use crate::extract::Session;
use crate::handler::{Result, upstream};

/// Returns the signed-in user's member record (`GET /user/info`).
///
/// The upstream lookup is keyed by the session's `userId` claim; the session
/// is the only place that id may come from.
pub(crate) async fn member_profile(
    session: Session,
    State(api_client): State<ApiClient>,
) -> Result<Json<Member>> {
    let member = api_client
        .member(session.user_id, Some(&session.access_token()))
        .await
        .map_err(upstream)?;

    Ok(Json(member))
}
