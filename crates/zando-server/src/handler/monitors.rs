//! Liveness and service info handlers.

use axum::Json;
use serde::Serialize;

/// Basic service identification, also the landing response for `/`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

/// Reports the gateway as alive (`GET /` and `GET /health`).
pub(crate) async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}
