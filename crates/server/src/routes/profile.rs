//! Profile route handlers.

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::routes::auth::AccountResponse;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Profile update payload.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    pub phone: String,
    pub address: String,
}

/// Get the signed-in account's details.
pub async fn show(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    Json(AccountResponse::from(user))
}

/// Update the signed-in account's phone and address.
#[instrument(skip(state, user, payload), fields(user = %user.public_id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(payload): Json<ProfileUpdate>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    let updated = auth
        .update_profile(user.id, &payload.phone, &payload.address)
        .await?;

    Ok(Json(AccountResponse::from(updated)))
}
