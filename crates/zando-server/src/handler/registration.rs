//! Member registration handler.
//!
//! Validation happens here, before anything leaves the gateway: a payload
//! that fails a field rule is answered with a 400 and the upstream API is
//! never called. The rules mirror the registration form contract.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use jiff::Zoned;
use jiff::civil::Date;
use serde::Deserialize;
use validator::{Validate, ValidationError};
use zando_client::{ApiClient, NewRegistration};

use crate::handler::{Result, upstream};

/// Tracing target for registration operations.
const TRACING_TARGET: &str = "zando_server::handler::registration";

/// Minimum and maximum age accepted at registration, in whole years.
const MIN_AGE: i16 = 16;
const MAX_AGE: i16 = 100;

/// Special characters accepted in passwords.
const PASSWORD_SPECIAL: &str = "@$!%*?&#^";

/// Request payload for member registration.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    pub last_name: String,
    #[validate(
        email(message = "Invalid email address"),
        length(min = 5, max = 50, message = "Email must be between 5 and 50 characters")
    )]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(min = 5, message = "Address must be at least 5 characters"))]
    pub address: String,
    #[validate(custom(function = "validate_date_of_birth"))]
    pub date_of_birth: String,
    #[validate(length(min = 1, message = "Please select a membership type"))]
    pub membership_id: String,
    #[validate(length(min = 5, message = "Emergency contact must be at least 5 characters"))]
    pub emergency_contact: String,
    pub image: Option<String>,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

impl From<RegisterRequest> for NewRegistration {
    fn from(request: RegisterRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            date_of_birth: request.date_of_birth,
            membership_id: request.membership_id,
            emergency_contact: request.emergency_contact,
            image: request.image,
            password: request.password,
        }
    }
}

/// Validates an E.164-style phone number: optional `+`, leading digit 1-9,
/// 2 to 15 digits in total.
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let valid = (2..=15).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0');

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("Invalid phone number".into()))
    }
}

/// Validates the applicant's age from the date of birth.
///
/// Whole calendar years only, matching the registration form: someone whose
/// birthday is later this year still counts the full year difference.
fn validate_date_of_birth(date_of_birth: &str) -> Result<(), ValidationError> {
    let out_of_range =
        || ValidationError::new("date_of_birth").with_message("You must be between 16 and 100 years old".into());

    let birth_date: Date = date_of_birth.parse().map_err(|_| out_of_range())?;
    let age = Zoned::now().date().year() - birth_date.year();

    if (MIN_AGE..=MAX_AGE).contains(&age) {
        Ok(())
    } else {
        Err(out_of_range())
    }
}

/// Validates password strength: 8 to 20 characters with at least one
/// uppercase letter, one lowercase letter, one digit and one special
/// character.
fn validate_password(password: &str) -> Result<(), ValidationError> {
    let fail = |message: &'static str| {
        ValidationError::new("password").with_message(message.into())
    };

    if password.chars().count() < 8 {
        return Err(fail("Password must be at least 8 characters"));
    }
    if password.chars().count() > 20 {
        return Err(fail("Password must be less than 20 characters"));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(fail("Password must contain at least one uppercase letter"));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(fail("Password must contain at least one lowercase letter"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(fail("Password must contain at least one number"));
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL.contains(c)) {
        return Err(fail("Password must contain at least one special character"));
    }

    Ok(())
}

/// Registers a new member (`POST /register`).
pub(crate) async fn register(
    State(api_client): State<ApiClient>,
    Json(request): Json<RegisterRequest>,
) -> Result<StatusCode> {
    request.validate()?;

    let registration = NewRegistration::from(request);
    api_client.register(&registration).await.map_err(upstream)?;

    tracing::info!(
        target: TRACING_TARGET,
        email = %registration.email,
        "Registration forwarded"
    );

    Ok(StatusCode::OK)
}
