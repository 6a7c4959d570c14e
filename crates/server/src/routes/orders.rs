//! Checkout and order history route handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::OrderLineItem;
use crate::services::checkout::CheckoutService;
use crate::state::AppState;

/// Checkout payload: the client's cart snapshot plus the payment reference.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub line_items: Vec<OrderLineItem>,
    pub payment_reference: String,
}

/// Convert the signed-in user's cart into an immutable order.
#[instrument(skip(state, user, payload), fields(user = %user.public_id))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<CheckoutRequest>,
) -> Result<impl IntoResponse> {
    let service = CheckoutService::new(state.pool());
    let order_id = service
        .checkout(user.id, &payload.line_items, &payload.payment_reference)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "order_id": order_id }))))
}

/// Get the signed-in user's order history, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let service = CheckoutService::new(state.pool());
    let orders = service.list_orders(user.id).await?;

    Ok(Json(orders))
}
