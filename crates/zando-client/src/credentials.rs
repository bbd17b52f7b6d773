//! Credentials and access tokens for the Zando API.

use std::fmt;

use serde::Serialize;

/// An email/password pair submitted once per login attempt.
///
/// Credentials are transient: they are serialized into the login request body
/// and dropped. They are never persisted or logged.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Email address of the account.
    pub email: String,
    /// Password of the account.
    pub password: String,
}

impl Credentials {
    /// Creates a new credential pair.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An opaque signed token issued by the Zando API.
///
/// The gateway never constructs or mutates tokens; it extracts them from the
/// login response and forwards them as `Authorization: Bearer` headers. The
/// embedded claims are decoded by the server crate, not here.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the raw token string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_secrets() {
        let credentials = Credentials::new("jane@example.com", "hunter2!A");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("jane@example.com"));
        assert!(!debug.contains("hunter2"));

        let token = AccessToken::new("eyJhbGciOi.payload.sig");
        assert_eq!(format!("{token:?}"), "AccessToken(<redacted>)");
    }
}
