//! End-to-end tests for the session gate and the page routes behind it.

mod common;

use axum::extract::Path;
use axum::http::header::{AUTHORIZATION, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use jiff::{ToSpan, Zoned};

use crate::common::{forge_token, gateway, gateway_without_upstream, session_cookie, spawn_upstream};

fn cookie_value(token: &str) -> HeaderValue {
    HeaderValue::from_str(&session_cookie(token)).expect("valid header value")
}

fn sample_member(member_id: i64, person_id: i64) -> serde_json::Value {
    serde_json::json!({
        "MemberID": member_id,
        "PersonID": person_id,
        "MembershipID": 2,
        "JoinDate": "2025-02-01",
        "EmergencyContact": "Jo Doe +4512345678",
        "membership": null,
        "person": {
            "PersonID": person_id,
            "FirstName": "Jane",
            "LastName": "Doe",
            "Email": "jane@example.com",
            "Phone": "+4512345678",
            "Address": "Main Street 1",
            "DateOfBirth": "1990-05-01",
            "Role": "MEMBER",
            "ImageUrl": null
        },
        "memberBookings": [],
        "payments": []
    })
}

fn sample_product(product_id: i64) -> serde_json::Value {
    serde_json::json!({
        "ProductID": product_id,
        "ProductName": "Protein Bar",
        "Description": "Chocolate",
        "Price": "3.50",
        "StockQuantity": 120,
        "CategoryID": 1,
        "PaymentID": null
    })
}

fn sample_class(class_id: i64, schedule_date: &str) -> serde_json::Value {
    serde_json::json!({
        "ClassID": class_id,
        "ClassName": "Yoga",
        "Description": "Morning flow",
        "ClassType": "Yoga",
        "Duration": 60,
        "MaxParticipants": 20,
        "EmployeeID": 3,
        "CenterID": 1,
        "ScheduleDate": schedule_date,
        "StartTime": "08:00",
        "EndTime": "09:00"
    })
}

#[tokio::test]
async fn unauthenticated_classes_redirects_to_login() -> anyhow::Result<()> {
    let server = gateway_without_upstream()?;

    let response = server.get("/classes").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION),
        Some(&HeaderValue::from_static("/login"))
    );
    Ok(())
}

#[tokio::test]
async fn expired_token_redirects_to_login() -> anyhow::Result<()> {
    let server = gateway_without_upstream()?;
    // Expired one second ago; every other claim is pristine.
    let token = forge_token(42, "MEMBER", Some(7), -1);

    let response = server
        .get("/classes")
        .add_header(COOKIE, cookie_value(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION),
        Some(&HeaderValue::from_static("/login"))
    );
    Ok(())
}

#[tokio::test]
async fn garbage_token_redirects_to_login() -> anyhow::Result<()> {
    let server = gateway_without_upstream()?;

    let response = server
        .get("/user/info")
        .add_header(COOKIE, cookie_value("not-a-jwt"))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION),
        Some(&HeaderValue::from_static("/login"))
    );
    Ok(())
}

#[tokio::test]
async fn non_admin_is_redirected_from_admin_routes() -> anyhow::Result<()> {
    let server = gateway_without_upstream()?;
    let token = forge_token(42, "MEMBER", Some(7), 3600);

    let response = server
        .get("/admin/products")
        .add_header(COOKIE, cookie_value(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION),
        Some(&HeaderValue::from_static("/"))
    );
    Ok(())
}

#[tokio::test]
async fn admin_products_pass_through() -> anyhow::Result<()> {
    let upstream = Router::new().route(
        "/products",
        get(|| async { Json(serde_json::json!([sample_product(11)])) }),
    );
    let endpoint = spawn_upstream(upstream).await?;
    let server = gateway(&endpoint)?;
    let token = forge_token(1, "ADMIN", None, 3600);

    let response = server
        .get("/admin/products")
        .add_header(COOKIE, cookie_value(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body[0]["ProductID"], 11);
    Ok(())
}

#[tokio::test]
async fn admin_members_pass_through() -> anyhow::Result<()> {
    let upstream = Router::new().route(
        "/members",
        get(|| async { Json(serde_json::json!([sample_member(7, 12)])) }),
    );
    let endpoint = spawn_upstream(upstream).await?;
    let server = gateway(&endpoint)?;
    let token = forge_token(1, "ADMIN", None, 3600);

    let response = server
        .get("/admin/members")
        .add_header(COOKIE, cookie_value(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body[0]["MemberID"], 7);
    Ok(())
}

#[tokio::test]
async fn login_sets_session_cookie_that_passes_the_gate() -> anyhow::Result<()> {
    let issued_token = forge_token(42, "ADMIN", None, 3600);
    let cookie = format!("accessToken={issued_token}; Path=/; HttpOnly");
    let upstream = Router::new()
        .route(
            "/login",
            post(move || async move { (StatusCode::OK, [(SET_COOKIE, cookie)], "ok") }),
        )
        .route(
            "/classes",
            get(|| async { Json(serde_json::json!([])) }),
        );
    let endpoint = spawn_upstream(upstream).await?;
    let server = gateway(&endpoint)?;

    let response = server
        .post("/login")
        .json(&serde_json::json!({
            "email": "admin@zando.fit",
            "password": "Sup3rSecret!"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(set_cookie.starts_with("accessToken="));
    assert!(set_cookie.contains("HttpOnly"));

    let body: serde_json::Value = response.json();
    assert_eq!(body["userId"], 42);
    assert_eq!(body["role"], "ADMIN");
    assert!(body.get("memberId").is_none());

    // The cookie the gateway just issued must pass the session gate.
    let response = server
        .get("/classes")
        .add_header(COOKIE, cookie_value(&issued_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn login_without_upstream_cookie_fails() -> anyhow::Result<()> {
    let upstream = Router::new().route("/login", post(|| async { (StatusCode::OK, "ok") }));
    let endpoint = spawn_upstream(upstream).await?;
    let server = gateway(&endpoint)?;

    let response = server
        .post("/login")
        .json(&serde_json::json!({
            "email": "jane@example.com",
            "password": "Sup3rSecret!"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
    Ok(())
}

#[tokio::test]
async fn login_with_rejected_credentials_fails() -> anyhow::Result<()> {
    let upstream = Router::new().route(
        "/login",
        post(|| async { (StatusCode::UNAUTHORIZED, "bad credentials") }),
    );
    let endpoint = spawn_upstream(upstream).await?;
    let server = gateway(&endpoint)?;

    let response = server
        .post("/login")
        .json(&serde_json::json!({
            "email": "jane@example.com",
            "password": "wrong"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn classes_filters_past_and_exposes_member_id() -> anyhow::Result<()> {
    let future = Zoned::now().date().saturating_add(7.days()).to_string();
    let upstream = Router::new().route(
        "/classes",
        get(move || async move {
            Json(serde_json::json!([
                sample_class(1, "2020-01-01"),
                sample_class(2, &future),
            ]))
        }),
    );
    let endpoint = spawn_upstream(upstream).await?;
    let server = gateway(&endpoint)?;
    let token = forge_token(42, "MEMBER", Some(7), 3600);

    let response = server
        .get("/classes")
        .add_header(COOKIE, cookie_value(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["memberId"], 7);
    let classes = body["classes"].as_array().expect("classes array");
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0]["ClassID"], 2);
    Ok(())
}

#[tokio::test]
async fn booking_requires_member_record() -> anyhow::Result<()> {
    let server = gateway_without_upstream()?;
    // Admins have no memberId claim and cannot book.
    let token = forge_token(1, "ADMIN", None, 3600);

    let response = server
        .post("/bookings")
        .add_header(COOKIE, cookie_value(&token))
        .json(&serde_json::json!({ "classId": 3 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn booking_forwards_member_and_class() -> anyhow::Result<()> {
    let upstream = Router::new().route(
        "/bookings",
        post(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body["ClassID"], 3);
            assert_eq!(body["MemberID"], 7);
            assert_eq!(body["Status"], "Confirmed");
            StatusCode::CREATED
        }),
    );
    let endpoint = spawn_upstream(upstream).await?;
    let server = gateway(&endpoint)?;
    let token = forge_token(42, "MEMBER", Some(7), 3600);

    let response = server
        .post("/bookings")
        .add_header(COOKIE, cookie_value(&token))
        .json(&serde_json::json!({ "classId": 3 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn user_info_passes_session_user_id_and_bearer_upstream() -> anyhow::Result<()> {
    let token = forge_token(42, "MEMBER", Some(7), 3600);
    let expected_auth = format!("Bearer {token}");
    let upstream = Router::new().route(
        "/members/{id}",
        get(move |Path(id): Path<i64>, headers: HeaderMap| async move {
            let auth = headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            if auth != expected_auth {
                return StatusCode::UNAUTHORIZED.into_response();
            }
            Json(sample_member(7, id)).into_response()
        }),
    );
    let endpoint = spawn_upstream(upstream).await?;
    let server = gateway(&endpoint)?;

    let response = server
        .get("/user/info")
        .add_header(COOKIE, cookie_value(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["MemberID"], 7);
    assert_eq!(body["PersonID"], 42);
    Ok(())
}

#[tokio::test]
async fn register_rejects_invalid_payload_without_upstream_call() -> anyhow::Result<()> {
    let server = gateway_without_upstream()?;

    let response = server
        .post("/register")
        .json(&serde_json::json!({
            "firstName": "J",
            "lastName": "Doe",
            "email": "bad",
            "phone": "12",
            "address": "x",
            "dateOfBirth": "2020-01-01",
            "membershipId": "",
            "emergencyContact": "x",
            "password": "weak"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["validation"].as_array().is_some_and(|v| !v.is_empty()));
    Ok(())
}

#[tokio::test]
async fn upstream_outage_is_a_gateway_error() -> anyhow::Result<()> {
    // Nothing is listening on the configured upstream port.
    let server = gateway_without_upstream()?;
    let token = forge_token(42, "MEMBER", Some(7), 3600);

    let response = server
        .get("/classes")
        .add_header(COOKIE, cookie_value(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    Ok(())
}

#[tokio::test]
async fn upstream_garbage_body_is_a_gateway_error() -> anyhow::Result<()> {
    // 200 with an unreadable body must degrade the same way an outage does.
    let upstream = Router::new().route("/classes", get(|| async { "<html>oops</html>" }));
    let endpoint = spawn_upstream(upstream).await?;
    let server = gateway(&endpoint)?;
    let token = forge_token(42, "MEMBER", Some(7), 3600);

    let response = server
        .get("/classes")
        .add_header(COOKIE, cookie_value(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    Ok(())
}

#[tokio::test]
async fn logout_clears_session_cookie() -> anyhow::Result<()> {
    let server = gateway_without_upstream()?;

    let response = server.post("/logout").await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(set_cookie.starts_with("accessToken="));
    assert!(set_cookie.contains("Max-Age=0"));
    Ok(())
}

#[tokio::test]
async fn public_routes_need_no_session() -> anyhow::Result<()> {
    let upstream = Router::new().route(
        "/memberships",
        get(|| async {
            Json(serde_json::json!([{
                "MembershipID": 2,
                "MembershipName": "Gold",
                "PricePerMonth": "49.00",
                "AccessLevel": "Full",
                "Duration": "12 months",
                "MaxClassBookings": 10,
                "Description": "All access"
            }]))
        }),
    );
    let endpoint = spawn_upstream(upstream).await?;
    let server = gateway(&endpoint)?;

    let response = server.get("/memberships").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    Ok(())
}
