//! Zando API client implementation using reqwest.

use std::sync::Arc;

use reqwest::header::{HeaderMap, SET_COOKIE};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::credentials::{AccessToken, Credentials};
use crate::error::{Error, Result};
use crate::types::{FitnessClass, Member, Membership, NewBooking, NewRegistration, Product};

/// Tracing target for API client operations.
pub const TRACING_TARGET: &str = "zando_client::api";

/// Cookie name under which the API returns the access token.
const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Inner client that holds the HTTP client and configuration.
struct ApiClientInner {
    http: Client,
    config: ApiConfig,
}

impl std::fmt::Debug for ApiClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Client for the external Zando fitness API.
///
/// Cheap to clone; all clones share one connection pool. Calls that act on
/// behalf of a signed-in user take an optional [`AccessToken`] and attach it
/// as an `Authorization: Bearer` header.
#[derive(Clone, Debug)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl ApiClient {
    /// Creates a new API client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(config: ApiConfig) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            timeout_ms = config.effective_timeout().as_millis(),
            "Creating Zando API client"
        );

        let http = Client::builder()
            .timeout(config.effective_timeout())
            .user_agent(config.effective_user_agent())
            .build()?;

        let inner = ApiClientInner { http, config };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a new API client with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ApiConfig::default())
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Resolves an endpoint URL below the configured base.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.config.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Starts a request, attaching the bearer token when one is supplied.
    fn request(&self, method: Method, url: Url, token: Option<&AccessToken>) -> RequestBuilder {
        let mut builder = self.inner.http.request(method, url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token.as_str());
        }
        builder
    }

    /// Maps non-success statuses to [`Error::Status`].
    fn expect_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Error::Status(status))
        }
    }

    /// Checks the status and decodes the JSON body.
    ///
    /// Decode failures surface as [`Error::Serde`], distinct from transport
    /// errors; an API that answers 200 with a body this client cannot read is
    /// a different failure than one that does not answer at all.
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = Self::expect_success(response)?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Exchanges credentials for an access token.
    ///
    /// Sends `POST /login` and extracts the `accessToken` cookie from the
    /// response headers. Every failure mode collapses to `None`: a rejected
    /// login, a missing cookie and a network error are indistinguishable to
    /// the caller and only show up in the logs.
    pub async fn authenticate(&self, credentials: &Credentials) -> Option<AccessToken> {
        match self.try_login(credentials).await {
            Ok(token) => {
                tracing::debug!(target: TRACING_TARGET, "Credential exchange succeeded");
                Some(token)
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    timeout = error.is_timeout(),
                    connect = error.is_connect(),
                    "Credential exchange failed"
                );
                None
            }
        }
    }

    async fn try_login(&self, credentials: &Credentials) -> Result<AccessToken> {
        let response = self
            .request(Method::POST, self.endpoint(&["login"]), None)
            .json(credentials)
            .send()
            .await?;
        let response = Self::expect_success(response)?;

        access_token_from_headers(response.headers())
    }

    /// Fetches all scheduled classes (`GET /classes`).
    pub async fn classes(&self, token: Option<&AccessToken>) -> Result<Vec<FitnessClass>> {
        let response = self
            .request(Method::GET, self.endpoint(&["classes"]), token)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Fetches the membership tiers (`GET /memberships`).
    pub async fn memberships(&self) -> Result<Vec<Membership>> {
        let response = self
            .request(Method::GET, self.endpoint(&["memberships"]), None)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Fetches a single member by user id (`GET /members/{id}`).
    pub async fn member(&self, user_id: i64, token: Option<&AccessToken>) -> Result<Member> {
        let id = user_id.to_string();
        let response = self
            .request(Method::GET, self.endpoint(&["members", &id]), token)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Fetches all members (`GET /members`).
    pub async fn members(&self, token: Option<&AccessToken>) -> Result<Vec<Member>> {
        let response = self
            .request(Method::GET, self.endpoint(&["members"]), token)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Fetches all shop products (`GET /products`).
    pub async fn products(&self, token: Option<&AccessToken>) -> Result<Vec<Product>> {
        let response = self
            .request(Method::GET, self.endpoint(&["products"]), token)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Deletes a product (`DELETE /products/{id}`).
    pub async fn delete_product(&self, product_id: i64, token: Option<&AccessToken>) -> Result<()> {
        let id = product_id.to_string();
        let response = self
            .request(Method::DELETE, self.endpoint(&["products", &id]), token)
            .send()
            .await?;
        Self::expect_success(response)?;
        Ok(())
    }

    /// Books a class for a member (`POST /bookings`).
    pub async fn create_booking(
        &self,
        booking: &NewBooking,
        token: Option<&AccessToken>,
    ) -> Result<()> {
        let response = self
            .request(Method::POST, self.endpoint(&["bookings"]), token)
            .json(booking)
            .send()
            .await?;
        Self::expect_success(response)?;
        Ok(())
    }

    /// Registers a new member (`POST /register`).
    pub async fn register(&self, registration: &NewRegistration) -> Result<()> {
        let response = self
            .request(Method::POST, self.endpoint(&["register"]), None)
            .json(registration)
            .send()
            .await?;
        Self::expect_success(response)?;
        Ok(())
    }
}

/// Extracts the access token from the `set-cookie` headers of a login response.
fn access_token_from_headers(headers: &HeaderMap) -> Result<AccessToken> {
    let mut cookies = headers.get_all(SET_COOKIE).iter().peekable();
    if cookies.peek().is_none() {
        return Err(Error::MissingAuthCookie);
    }

    cookies
        .filter_map(|value| value.to_str().ok())
        .find_map(parse_access_token_cookie)
        .map(AccessToken::new)
        .ok_or(Error::MissingAccessToken)
}

/// Parses one `set-cookie` value and returns the token if it carries the
/// `accessToken` pair. Attributes after the first `;` are ignored.
fn parse_access_token_cookie(raw: &str) -> Option<String> {
    let pair = raw.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    if name.trim() == ACCESS_TOKEN_COOKIE && !value.is_empty() {
        Some(value.trim().to_owned())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};

    use super::*;

    #[test]
    fn parses_access_token_pair() {
        let token = parse_access_token_cookie("accessToken=abc.def.ghi; Path=/; HttpOnly");
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn ignores_other_cookies_and_empty_values() {
        assert_eq!(parse_access_token_cookie("sessionId=xyz; Path=/"), None);
        assert_eq!(parse_access_token_cookie("accessToken=; Path=/"), None);
        assert_eq!(parse_access_token_cookie("not-a-cookie"), None);
    }

    #[test]
    fn missing_set_cookie_header_is_an_error() {
        let headers = HeaderMap::new();
        assert!(matches!(
            access_token_from_headers(&headers),
            Err(Error::MissingAuthCookie)
        ));
    }

    #[test]
    fn missing_token_field_is_an_error() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("sessionId=xyz"));
        assert!(matches!(
            access_token_from_headers(&headers),
            Err(Error::MissingAccessToken)
        ));
    }

    #[test]
    fn finds_token_among_multiple_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("theme=dark; Path=/"));
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("accessToken=abc.def.ghi; HttpOnly; Secure"),
        );

        let token = access_token_from_headers(&headers).expect("token is present");
        assert_eq!(token.as_str(), "abc.def.ghi");
    }

    #[test]
    fn decode_failures_map_to_the_serde_variant() {
        let decode_error = serde_json::from_slice::<Vec<Membership>>(b"<html>oops</html>")
            .expect_err("invalid JSON");

        let error = Error::from(decode_error);
        assert!(matches!(error, Error::Serde(_)));
        assert_eq!(error.status(), None);
    }

    #[test]
    fn endpoint_joins_segments_below_base() {
        let config = ApiConfig::default()
            .with_base_url(Url::parse("http://api.zando.fit/v1/").expect("valid URL"));
        let client = ApiClient::new(config).expect("client builds");

        let url = client.endpoint(&["members", "42"]);
        assert_eq!(url.as_str(), "http://api.zando.fit/v1/members/42");
    }
}
