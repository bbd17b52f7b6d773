//! [`Error`], [`ErrorKind`] and [`Result`] for HTTP handlers.

mod http_error;
mod response;

pub use http_error::{Error, ErrorKind, Result};
pub use response::{ErrorResponse, ValidationErrorDetail};
