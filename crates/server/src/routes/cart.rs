//! Cart route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use clementine_core::PublicId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::cart::CartService;
use crate::state::AppState;

/// Add-to-cart payload.
#[derive(Debug, Deserialize)]
pub struct AddItem {
    pub product_id: PublicId,
    pub quantity: u32,
}

/// Remove-from-cart payload.
#[derive(Debug, Deserialize)]
pub struct RemoveItem {
    pub product_id: PublicId,
}

/// Add a quantity of a product to the signed-in user's cart.
///
/// Repeated adds for the same product merge into one line.
#[instrument(skip(state, user, payload), fields(user = %user.public_id))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<AddItem>,
) -> Result<impl IntoResponse> {
    let cart = CartService::new(state.pool());
    cart.add_item(user.id, payload.product_id, payload.quantity)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Remove a product's line from the signed-in user's cart.
#[instrument(skip(state, user, payload), fields(user = %user.public_id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<RemoveItem>,
) -> Result<impl IntoResponse> {
    let cart = CartService::new(state.pool());
    cart.remove_item(user.id, payload.product_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the signed-in user's cart contents.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let cart = CartService::new(state.pool());
    let lines = cart.get_cart(user.id).await?;

    Ok(Json(lines))
}

/// Check whether (and how much of) a product is in the user's cart.
pub async fn contains(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<PublicId>,
) -> Result<impl IntoResponse> {
    let cart = CartService::new(state.pool());
    let quantity = cart.quantity_of(user.id, product_id).await?;

    Ok(Json(json!({
        "in_cart": quantity.is_some(),
        "quantity": quantity.unwrap_or(0),
    })))
}
