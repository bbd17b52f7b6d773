//! Authentication handlers: sign-in and sign-out.
//!
//! Sign-in performs the credential exchange against the external Zando API
//! and, on success, persists the returned access token as an HTTP-only
//! `accessToken` cookie. All failure modes (rejected credentials, missing
//! token in the upstream response, network errors) collapse into one
//! generic 401 so the response leaks nothing about which part failed.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};
use validator::Validate;
use zando_client::{AccessToken, ApiClient, Credentials};

use crate::extract::{Role, SESSION_COOKIE, Session, SessionClaims};
use crate::handler::{ErrorKind, Result};
use crate::service::SessionCookieOptions;

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "zando_server::handler::authentication";

/// Request payload for login.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest {
    /// Email address of the account.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password of the account.
    pub password: String,
}

/// Response returned after successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionResponse {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i64>,
}

impl From<&SessionClaims> for SessionResponse {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email.clone(),
            name: claims.name.clone(),
            role: claims.role,
            member_id: claims.member_id,
        }
    }
}

/// Builds the HTTP-only session cookie carrying the access token.
fn session_cookie(token: AccessToken, options: SessionCookieOptions) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.into_inner()))
        .path("/")
        .http_only(true)
        .secure(options.secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Exchanges credentials for a session (`POST /login`).
pub(crate) async fn login(
    State(api_client): State<ApiClient>,
    State(cookie_options): State<SessionCookieOptions>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    request.validate()?;

    let credentials = Credentials::new(&request.email, &request.password);
    let Some(token) = api_client.authenticate(&credentials).await else {
        // Already logged with detail by the client; the caller only learns
        // that authentication failed.
        return Err(ErrorKind::Unauthorized.with_message("Invalid email or password"));
    };

    // Project the token immediately so a token the issuer mints broken or
    // pre-expired never becomes a cookie.
    let session = Session::from_token(token.as_str()).map_err(|error| {
        tracing::error!(
            target: TRACING_TARGET,
            error = %error,
            "Zando API issued a token this gateway cannot project"
        );
        ErrorKind::Unauthorized.into_error()
    })?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = session.user_id,
        role = %session.role,
        "Login succeeded"
    );

    let jar = jar.add(session_cookie(token, cookie_options));
    Ok((jar, Json(SessionResponse::from(session.claims()))))
}

/// Clears the session cookie (`POST /logout`).
pub(crate) async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");
    (jar.remove(removal), StatusCode::NO_CONTENT)
}
