//! Shared helpers: a stub Zando API and session-token forging.

use axum::Router;
use axum_test::TestServer;
use jiff::Timestamp;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use zando_server::handler::routes;
use zando_server::service::{ServiceConfig, ServiceState};

/// Serves the given router on an ephemeral local port and returns its base URL.
pub async fn spawn_upstream(router: Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{addr}/"))
}

/// Builds a gateway test server pointed at the given upstream endpoint.
pub fn gateway(api_endpoint: &str) -> anyhow::Result<TestServer> {
    let config = ServiceConfig::builder()
        .with_api_endpoint(api_endpoint)
        .with_secure_cookies(false)
        .build()?;
    let state = ServiceState::from_config(&config)?;
    Ok(TestServer::new(routes(state))?)
}

/// Builds a gateway whose upstream is unreachable; for tests that must not
/// depend on (or must fail without) the external API.
pub fn gateway_without_upstream() -> anyhow::Result<TestServer> {
    gateway("http://127.0.0.1:9/")
}

/// Forges a Zando-style access token. The gateway does not verify signatures,
/// so any signing key will do.
pub fn forge_token(
    user_id: i64,
    role: &str,
    member_id: Option<i64>,
    expires_in_secs: i64,
) -> String {
    let mut claims = serde_json::json!({
        "userId": user_id,
        "email": "user@example.com",
        "name": "Test User",
        "role": role,
        "exp": Timestamp::now().as_second() + expires_in_secs,
    });
    if let Some(member_id) = member_id {
        claims["memberId"] = member_id.into();
    }

    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(b"upstream-signing-secret");
    encode(&header, &claims, &key).expect("token encodes")
}

/// Formats a `Cookie` request header value carrying the session token.
pub fn session_cookie(token: &str) -> String {
    format!("accessToken={token}")
}
