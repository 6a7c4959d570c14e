//! Comment route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use clementine_core::PublicId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::comments::CommentService;
use crate::state::AppState;

/// New comment payload.
#[derive(Debug, Deserialize)]
pub struct NewComment {
    pub body: String,
}

/// Get a product's comment thread, oldest first.
pub async fn list(
    State(state): State<AppState>,
    Path(product_id): Path<PublicId>,
) -> Result<impl IntoResponse> {
    let service = CommentService::new(state.pool());
    let comments = service.list(product_id).await?;

    Ok(Json(comments))
}

/// Add a comment and return the refreshed thread.
#[instrument(skip(state, user, payload), fields(user = %user.public_id, product = %product_id))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<PublicId>,
    Json(payload): Json<NewComment>,
) -> Result<impl IntoResponse> {
    let service = CommentService::new(state.pool());
    let comments = service.add(user.id, product_id, &payload.body).await?;

    Ok((StatusCode::CREATED, Json(comments)))
}
