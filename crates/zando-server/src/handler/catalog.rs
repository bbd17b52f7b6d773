//! Public catalog handlers: membership tiers and shop products.

use axum::Json;
use axum::extract::State;
use zando_client::{ApiClient, Membership, Product};

use crate::handler::{Result, upstream};

/// Lists the membership tiers (`GET /memberships`).
///
/// Public: the registration page needs this before an account exists.
pub(crate) async fn memberships(
    State(api_client): State<ApiClient>,
) -> Result<Json<Vec<Membership>>> {
    let memberships = api_client.memberships().await.map_err(upstream)?;
    Ok(Json(memberships))
}

/// Lists the shop products (`GET /products`).
pub(crate) async fn products(State(api_client): State<ApiClient>) -> Result<Json<Vec<Product>>> {
    let products = api_client.products(None).await.map_err(upstream)?;
    Ok(Json(products))
}
