//! Serialized error bodies.

use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Validation error details for field-specific errors.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorDetail {
    /// Field name that failed validation.
    pub field: String,
    /// Error code for the validation failure.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP error response representation.
///
/// Deliberately generic: credential rejections and malformed tokens must be
/// indistinguishable to the client, so the body never says which one it was.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse<'a> {
    /// The error name/type identifier.
    pub name: Cow<'a, str>,
    /// User-facing error message safe for client display.
    pub message: Cow<'a, str>,
    /// Validation error details for field-specific errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<Vec<ValidationErrorDetail>>,

    /// HTTP status code (not serialized in JSON).
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "Invalid request data.",
        StatusCode::BAD_REQUEST,
    );
    pub const CONFLICT: Self =
        Self::new("conflict", "Resource state conflict.", StatusCode::CONFLICT);
    pub const EXPIRED_AUTH_TOKEN: Self = Self::new(
        "expired_auth_token",
        "Session has expired.",
        StatusCode::UNAUTHORIZED,
    );
    pub const FORBIDDEN: Self = Self::new("forbidden", "Access denied.", StatusCode::FORBIDDEN);
    pub const MALFORMED_AUTH_TOKEN: Self = Self::new(
        "malformed_auth_token",
        "Malformed auth token.",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_AUTH_TOKEN: Self = Self::new(
        "missing_auth_token",
        "Missing auth token.",
        StatusCode::UNAUTHORIZED,
    );
    pub const NOT_FOUND: Self =
        Self::new("not_found", "Resource not found.", StatusCode::NOT_FOUND);
    pub const UNAUTHORIZED: Self = Self::new(
        "unauthorized",
        "Authentication failed.",
        StatusCode::UNAUTHORIZED,
    );

    // 5xx Server Errors
    pub const BAD_GATEWAY: Self = Self::new(
        "bad_gateway",
        "The service is temporarily unavailable. Please try again.",
        StatusCode::BAD_GATEWAY,
    );
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Internal server error.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    /// Creates a new response with the given name, message and status.
    const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            validation: None,
            status,
        }
    }

    /// Overrides the user-facing message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches field-level validation details.
    pub fn with_validation(mut self, validation: Vec<ValidationErrorDetail>) -> Self {
        self.validation = Some(validation);
        self
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_not_serialized() {
        let body = serde_json::to_value(ErrorResponse::BAD_GATEWAY).expect("serializes");
        assert_eq!(body["name"], "bad_gateway");
        assert!(body.get("status").is_none());
        assert!(body.get("validation").is_none());
    }

    #[test]
    fn validation_details_are_serialized_when_present() {
        let response = ErrorResponse::BAD_REQUEST.with_validation(vec![ValidationErrorDetail {
            field: "email".into(),
            code: "email".into(),
            message: "Invalid email address".into(),
        }]);

        let body = serde_json::to_value(response).expect("serializes");
        assert_eq!(body["validation"][0]["field"], "email");
    }
}
