//! Auth route handlers: register, login, logout, account deletion.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use clementine_core::{DisplayColor, Email, PublicId, Role};

use crate::error::Result;
use crate::middleware::{RequireAuth, clear_session_cookies, session_cookies};
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration and login payload.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Account details as exposed over the API.
///
/// Carries the opaque public ID, never the internal sequence number.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub user_id: PublicId,
    pub email: Email,
    pub color: DisplayColor,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for AccountResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.public_id,
            email: user.email,
            color: user.color,
            role: user.role,
            phone: user.phone,
            address: user.address,
            created_at: user.created_at,
        }
    }
}

/// Register a new account and sign it in.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    let user = auth.register(&payload.email, &payload.password).await?;

    let token = state.signer().issue(user.public_id, &user.email)?;
    let cookies = session_cookies(&token, &user.email);

    Ok((
        StatusCode::CREATED,
        AppendHeaders(cookies),
        Json(AccountResponse::from(user)),
    ))
}

/// Authenticate and sign in.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    let user = auth.authenticate(&payload.email, &payload.password).await?;

    let token = state.signer().issue(user.public_id, &user.email)?;
    let cookies = session_cookies(&token, &user.email);

    tracing::info!(user = %user.public_id, "signed in");

    Ok((AppendHeaders(cookies), Json(AccountResponse::from(user))))
}

/// Sign out by clearing the session cookies.
///
/// Tokens are stateless, so there is nothing to revoke server-side; the
/// cleared cookie is the whole logout.
pub async fn logout() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, AppendHeaders(clear_session_cookies()))
}

/// Delete the signed-in account and clear the session.
#[instrument(skip(state, user), fields(user = %user.public_id))]
pub async fn delete_account(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let auth = AuthService::new(state.pool());
    auth.delete_account(user.id).await?;

    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders(clear_session_cookies()),
    ))
}
