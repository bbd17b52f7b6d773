//! Admin panel handlers for members and products.
//!
//! All routes here sit behind the admin guard; the handlers only do the
//! upstream plumbing.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use zando_client::{ApiClient, Member, Product};

use crate::extract::Session;
use crate::handler::{Result, upstream};

/// Tracing target for admin operations.
const TRACING_TARGET: &str = "zando_server::handler::admin";

/// Lists all gym members (`GET /admin/members`).
pub(crate) async fn list_members(
    session: Session,
    State(api_client): State<ApiClient>,
) -> Result<Json<Vec<Member>>> {
    let members = api_client
        .members(Some(&session.access_token()))
        .await
        .map_err(upstream)?;

    Ok(Json(members))
}

/// Lists all shop products (`GET /admin/products`).
pub(crate) async fn list_products(
    session: Session,
    State(api_client): State<ApiClient>,
) -> Result<Json<Vec<Product>>> {
    let products = api_client
        .products(Some(&session.access_token()))
        .await
        .map_err(upstream)?;

    Ok(Json(products))
}

/// Deletes a product (`DELETE /admin/products/{id}`).
pub(crate) async fn delete_product(
    session: Session,
    State(api_client): State<ApiClient>,
    Path(product_id): Path<i64>,
) -> Result<StatusCode> {
    api_client
        .delete_product(product_id, Some(&session.access_token()))
        .await
        .map_err(upstream)?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = session.user_id,
        product_id,
        "Product deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
