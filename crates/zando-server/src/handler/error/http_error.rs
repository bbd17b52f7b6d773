//! HTTP error handling with builder pattern for dynamic error responses.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use validator::ValidationErrors;

use crate::handler::error::response::{ErrorResponse, ValidationErrorDetail};

/// The error type for HTTP handlers in the gateway.
///
/// Carries an [`ErrorKind`] plus optional message/context overrides. How it
/// renders depends on the kind: session-token failures redirect the browser
/// to `/login`, everything else serializes the JSON error body.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    message: Option<Cow<'a, str>>,
    context: Option<Cow<'a, str>>,
    validation: Option<Vec<ValidationErrorDetail>>,
}

impl Error<'static> {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            context: None,
            validation: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Sets a custom user-facing message for the error.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Attaches internal context, kept out of the response body.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the custom message if present.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the context if present.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl Default for Error<'static> {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug_struct = f.debug_struct("Error");
        debug_struct
            .field("kind", &self.kind)
            .field("status", &self.kind.status_code());

        if let Some(ref message) = self.message {
            debug_struct.field("message", message);
        }
        if let Some(ref context) = self.context {
            debug_struct.field("context", context);
        }

        debug_struct.finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        let message = self.message.as_deref().unwrap_or(response.message.as_ref());

        write!(f, "{} ({}): {}", response.name, response.status, message)?;
        if let Some(ref context) = self.context {
            write!(f, " - {context}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        // Session-token failures are page-level "you are signed out" states,
        // not API errors; the browser gets sent to the login page.
        if let Some(target) = self.kind.redirect_target() {
            return Redirect::to(target).into_response();
        }

        let mut response = self.kind.response();
        if let Some(message) = self.message {
            response = response.with_message(message);
        }
        if let Some(validation) = self.validation {
            response = response.with_validation(validation);
        }

        response.into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    code: error.code.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {field}")),
                })
            })
            .collect();

        Self {
            kind: ErrorKind::BadRequest,
            message: None,
            context: None,
            validation: Some(details),
        }
    }
}

/// A specialized [`Result`] type for HTTP handler operations.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Enumeration of the error kinds this gateway produces.
///
/// Each variant corresponds to a specific HTTP outcome. The auth-token
/// variants do not serialize at all: they redirect to the login page.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // 4xx Client Errors
    /// 400 Bad Request - Invalid request data
    BadRequest,
    /// Redirect to `/login` - No access token cookie
    MissingAuthToken,
    /// Redirect to `/login` - Access token failed to decode
    MalformedAuthToken,
    /// Redirect to `/login` - Access token past its expiry
    ExpiredAuthToken,
    /// 401 Unauthorized - Credentials rejected
    Unauthorized,
    /// 403 Forbidden - Signed in but not allowed
    Forbidden,
    /// 404 Not Found - Resource not found
    NotFound,
    /// 409 Conflict - Conflicting resource state
    Conflict,

    // 5xx Server Errors
    /// 502 Bad Gateway - The Zando API is unreachable or misbehaving
    BadGateway,
    /// 500 Internal Server Error - Unexpected server error
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Converts this error kind into a full [`Error`].
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    /// Creates an [`Error`] with the specified message.
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    /// Creates an [`Error`] with the specified context.
    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    /// Returns the redirect target for kinds that render as redirects.
    #[inline]
    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            Self::MissingAuthToken | Self::MalformedAuthToken | Self::ExpiredAuthToken => {
                Some("/login")
            }
            _ => None,
        }
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the response representation of this error kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::MissingAuthToken => ErrorResponse::MISSING_AUTH_TOKEN,
            Self::MalformedAuthToken => ErrorResponse::MALFORMED_AUTH_TOKEN,
            Self::ExpiredAuthToken => ErrorResponse::EXPIRED_AUTH_TOKEN,
            Self::Unauthorized => ErrorResponse::UNAUTHORIZED,
            Self::Forbidden => ErrorResponse::FORBIDDEN,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::Conflict => ErrorResponse::CONFLICT,
            Self::BadGateway => ErrorResponse::BAD_GATEWAY,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.into_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn default_error_is_internal() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_builder_chaining() {
        let error = ErrorKind::NotFound
            .with_message("Member not found")
            .with_context("user id 42");

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("Member not found"));
        assert_eq!(error.context(), Some("user id 42"));
    }

    #[test]
    fn std_fmt_display() {
        let error = ErrorKind::BadGateway.with_context("connect timeout");
        let display = format!("{error}");
        assert!(display.contains("bad_gateway"));
        assert!(display.contains("502"));
        assert!(display.contains("connect timeout"));
    }

    #[test]
    fn token_kinds_redirect_to_login() {
        for kind in [
            ErrorKind::MissingAuthToken,
            ErrorKind::MalformedAuthToken,
            ErrorKind::ExpiredAuthToken,
        ] {
            let response = kind.into_response();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            let location = response
                .headers()
                .get(axum::http::header::LOCATION)
                .and_then(|v| v.to_str().ok());
            assert_eq!(location, Some("/login"));
        }
    }

    #[test]
    fn non_token_kinds_serialize_json() {
        let response = ErrorKind::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(
            response
                .headers()
                .get(axum::http::header::LOCATION)
                .is_none()
        );
    }

    #[test]
    fn validation_errors_become_bad_request() {
        #[derive(Validate)]
        struct Payload {
            #[validate(email(message = "Invalid email address"))]
            email: String,
        }

        let payload = Payload {
            email: "nope".to_owned(),
        };
        let errors = payload.validate().expect_err("email is invalid");

        let error = Error::from(errors);
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
