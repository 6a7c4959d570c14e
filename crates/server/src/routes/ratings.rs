//! Rating route handlers.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use clementine_core::PublicId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::rating::RatingService;
use crate::state::AppState;

/// Rating payload.
#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub value: i16,
}

/// Rate a product 1-5 and return its new average.
///
/// A repeat rating from the same account overwrites the previous one.
#[instrument(skip(state, user, payload), fields(user = %user.public_id, product = %product_id))]
pub async fn rate(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<PublicId>,
    Json(payload): Json<RateRequest>,
) -> Result<impl IntoResponse> {
    let service = RatingService::new(state.pool());
    let average = service.rate(user.id, product_id, payload.value).await?;

    Ok(Json(json!({ "average": average })))
}
