//! Session projection from the access-token cookie.
//!
//! The Zando API issues an opaque JWT on login; the gateway stores it in an
//! HTTP-only `accessToken` cookie and, on every request that needs auth
//! context, projects its claims into a [`Session`]. The projection is pure:
//! given the same token and clock, it always yields the same session.
//!
//! # Trust model
//!
//! The token signature is *not* re-verified here. The Zando API is the sole
//! issuer and validates the token again on every data call this gateway
//! forwards, so the payload is trusted structurally (a tampered token buys an
//! attacker nothing but an upstream 401). Expiry *is* enforced locally, with
//! zero leeway: a token one second past `exp` is treated as signed out.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use derive_more::Deref;
use jiff::Timestamp;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use zando_client::AccessToken;

use crate::handler::{Error, ErrorKind, Result};

/// Name of the cookie carrying the access token.
pub const SESSION_COOKIE: &str = "accessToken";

/// Tracing target for session extraction.
pub const TRACING_TARGET_SESSION: &str = "zando_server::extract::session";

/// Coarse permission tag embedded in the token's `role` claim.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Member,
    /// Any role value this gateway does not know. Preserved rather than
    /// rejected so new upstream roles degrade to "signed in, not admin".
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Returns `true` for the administrator role.
    #[inline]
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Claims embedded in a Zando access token.
///
/// This is a bit-exact contract with the external issuer:
/// `{ userId, email, name, role, memberId?, exp }` with `exp` in unix seconds.
/// `memberId` is only present for accounts that are gym members; admins have
/// no member record and the claim stays absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Absent when the account has no member record. Never defaulted to zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i64>,
    /// Expiration time as a unix timestamp in seconds.
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl SessionClaims {
    /// Decodes the claims out of a raw token string.
    ///
    /// Signature validation is disabled (see the module docs for the trust
    /// model); `exp` is validated by the decoder with zero leeway.
    ///
    /// # Errors
    ///
    /// Returns the decoder's error for malformed tokens, missing claims and
    /// expired tokens.
    pub fn decode(token: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<Self>(token, &DecodingKey::from_secret(&[]), &validation)?;
        Ok(token_data.claims)
    }

    /// Checks if the token has expired based on current UTC time.
    ///
    /// `exp` must be strictly in the future for the claims to be valid.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now().as_second()
    }
}

/// Request-scoped projection of the access token.
///
/// Dereferences to [`SessionClaims`] and retains the raw token so downstream
/// API calls can reuse it as an `Authorization: Bearer` credential. Created
/// per request, never stored.
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct Session {
    #[deref]
    claims: SessionClaims,
    token: String,
}

impl Session {
    /// Projects a session out of a raw token string.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::ExpiredAuthToken`] when `exp` is not in the future.
    /// - [`ErrorKind::MalformedAuthToken`] for anything that fails to decode.
    ///
    /// Both render as a redirect to `/login`: an expired or undecodable token
    /// is indistinguishable from "signed out" as far as the user is concerned.
    pub fn from_token(token: &str) -> Result<Self> {
        let claims = SessionClaims::decode(token).map_err(|error| {
            use jsonwebtoken::errors::ErrorKind as JwtError;
            match error.kind() {
                JwtError::ExpiredSignature => {
                    tracing::debug!(
                        target: TRACING_TARGET_SESSION,
                        "Access token expired, treating as signed out"
                    );
                    ErrorKind::ExpiredAuthToken.into_error()
                }
                _ => {
                    tracing::warn!(
                        target: TRACING_TARGET_SESSION,
                        error = %error,
                        "Access token failed to decode, treating as signed out"
                    );
                    ErrorKind::MalformedAuthToken.into_error()
                }
            }
        })?;

        // The decoder already validated `exp > now`; this re-check closes the
        // boundary case `exp == now`, which must count as expired.
        if claims.is_expired() {
            return Err(ErrorKind::ExpiredAuthToken.into_error());
        }

        Ok(Self {
            claims,
            token: token.to_owned(),
        })
    }

    /// Returns the decoded claims.
    #[inline]
    #[must_use]
    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }

    /// Returns the raw token for reuse as a bearer credential.
    #[inline]
    #[must_use]
    pub fn access_token(&self) -> AccessToken {
        AccessToken::new(self.token.clone())
    }

    /// Returns `true` when the session belongs to an administrator.
    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.claims.role.is_admin()
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Cached by the session guard; later extractions reuse the projection.
        if let Some(session) = parts.extensions.get::<Self>() {
            return Ok(session.clone());
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            tracing::debug!(
                target: TRACING_TARGET_SESSION,
                "No access token cookie, treating as signed out"
            );
            return Err(ErrorKind::MissingAuthToken.into_error());
        };

        let session = Self::from_token(cookie.value())?;
        parts.extensions.insert(session.clone());
        Ok(session)
    }
}

impl<S> OptionalFromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <Self as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(session) => Ok(Some(session)),
            Err(_) => Ok(None),
        }
    }
}
