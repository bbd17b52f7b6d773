//! Class schedule and booking handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use jiff::Zoned;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use validator::Validate;
use zando_client::{ApiClient, FitnessClass, NewBooking};

use crate::extract::Session;
use crate::handler::{ErrorKind, Result, upstream};

/// Tracing target for class and booking operations.
const TRACING_TARGET: &str = "zando_server::handler::classes";

/// View data for the classes page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClassesPage {
    /// Member id of the caller; absent for accounts without a member record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i64>,
    pub classes: Vec<FitnessClass>,
}

/// Request payload for booking a class.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingRequest {
    #[validate(range(min = 1, message = "Invalid class id"))]
    pub class_id: i64,
}

/// Returns `true` when the class is scheduled strictly after `today`.
///
/// `ScheduleDate` is an ISO date, sometimes with a time suffix; only the date
/// part matters here. Unparseable dates are dropped rather than shown.
fn is_upcoming(class: &FitnessClass, today: Date) -> bool {
    class
        .schedule_date
        .get(..10)
        .and_then(|date| date.parse::<Date>().ok())
        .is_some_and(|date| date > today)
}

/// Lists upcoming classes for the signed-in user (`GET /classes`).
///
/// The upstream endpoint returns past classes too; they are filtered out
/// here until the API accepts a date parameter.
pub(crate) async fn upcoming_classes(
    session: Session,
    State(api_client): State<ApiClient>,
) -> Result<Json<ClassesPage>> {
    let classes = api_client
        .classes(Some(&session.access_token()))
        .await
        .map_err(upstream)?;

    let today = Zoned::now().date();
    let classes: Vec<_> = classes
        .into_iter()
        .filter(|class| is_upcoming(class, today))
        .collect();

    Ok(Json(ClassesPage {
        member_id: session.member_id,
        classes,
    }))
}

/// Books a class for the signed-in member (`POST /bookings`).
///
/// Sessions without a `memberId` claim (admins, say) have no member record
/// to book against and are refused outright.
pub(crate) async fn book_class(
    session: Session,
    State(api_client): State<ApiClient>,
    Json(request): Json<BookingRequest>,
) -> Result<StatusCode> {
    request.validate()?;

    let Some(member_id) = session.member_id else {
        return Err(ErrorKind::Forbidden.with_message("Only members can book classes"));
    };

    let booking = NewBooking::confirmed(request.class_id, member_id, Zoned::now().date());
    api_client
        .create_booking(&booking, Some(&session.access_token()))
        .await
        .map_err(upstream)?;

    tracing::info!(
        target: TRACING_TARGET,
        member_id,
        class_id = request.class_id,
        "Class booked"
    );

    Ok(StatusCode::CREATED)
}
