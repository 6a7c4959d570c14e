//! Authentication middleware and extractors.
//!
//! Sessions are a signed token in an `HttpOnly` cookie. The server keeps no
//! session state: verifying the token's signature and expiry is the whole
//! check, and logout is the client deleting its cookie.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use clementine_core::Email;

use crate::services::auth::{AuthError, AuthService};
use crate::services::token::{TOKEN_VALIDITY_HOURS, TokenError};
use crate::state::AppState;

/// Name of the `HttpOnly` cookie carrying the signed session token.
pub const TOKEN_COOKIE: &str = "token";

/// Name of the script-readable cookie carrying the signed-in email.
pub const EMAIL_COOKIE: &str = "email";

/// Extractor that requires a signed-in user.
///
/// Verifies the session token cookie and resolves the account it names.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub crate::models::User);

/// Error returned when authentication is required but missing or invalid.
pub enum AuthRejection {
    /// No token cookie on the request.
    MissingToken,
    /// The token failed verification.
    InvalidToken(TokenError),
    /// The token verified but its account no longer exists.
    UnknownAccount,
    /// Account lookup failed.
    Internal,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Authentication required".to_owned(),
            ),
            Self::InvalidToken(TokenError::Expired) => (
                StatusCode::UNAUTHORIZED,
                "expired",
                "Session expired, please sign in again".to_owned(),
            ),
            Self::InvalidToken(_) | Self::UnknownAccount => (
                StatusCode::UNAUTHORIZED,
                "invalid_signature",
                "Session is invalid, please sign in again".to_owned(),
            ),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "Internal server error".to_owned(),
            ),
        };

        let body = json!({ "code": code, "message": message });
        (status, Json(body)).into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token =
            cookie_value(parts, TOKEN_COOKIE).ok_or(AuthRejection::MissingToken)?;

        let claims = state
            .signer()
            .verify(&token)
            .map_err(AuthRejection::InvalidToken)?;

        let auth = AuthService::new(state.pool());
        let user = auth.get_by_public_id(claims.sub).await.map_err(|e| match e {
            AuthError::NotFound => AuthRejection::UnknownAccount,
            other => {
                tracing::error!(error = %other, "account lookup failed during auth");
                AuthRejection::Internal
            }
        })?;

        Ok(Self(user))
    }
}

/// Pull one cookie's value out of the request's `Cookie` headers.
///
/// Values are percent-decoded, undoing the encoding applied by
/// [`session_cookies`].
fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key.trim() != name {
                return None;
            }
            urlencoding::decode(value.trim())
                .ok()
                .map(std::borrow::Cow::into_owned)
        })
        .next()
}

/// Build the `Set-Cookie` headers for a fresh sign-in.
///
/// The token cookie is `HttpOnly` so scripts can never read it; the email
/// cookie is readable so the client can show who is signed in. Both are
/// `SameSite=Strict` and expire with the token.
///
/// The email value is percent-encoded: addresses may contain cookie
/// delimiters like `;` and `=`, which would otherwise truncate the value.
/// [`cookie_value`] decodes on the way back in.
#[must_use]
pub fn session_cookies(token: &str, email: &Email) -> [(header::HeaderName, HeaderValue); 2] {
    let max_age = TOKEN_VALIDITY_HOURS * 3600;
    let email = urlencoding::encode(email.as_str());
    [
        set_cookie(format!(
            "{TOKEN_COOKIE}={token}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=Strict"
        )),
        set_cookie(format!(
            "{EMAIL_COOKIE}={email}; Path=/; Max-Age={max_age}; SameSite=Strict"
        )),
    ]
}

/// Build the `Set-Cookie` headers that clear the session cookies (logout).
#[must_use]
pub fn clear_session_cookies() -> [(header::HeaderName, HeaderValue); 2] {
    [
        set_cookie(format!(
            "{TOKEN_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Strict"
        )),
        set_cookie(format!("{EMAIL_COOKIE}=; Path=/; Max-Age=0; SameSite=Strict")),
    ]
}

fn set_cookie(value: String) -> (header::HeaderName, HeaderValue) {
    // Token values are base64url and email values are percent-encoded, so
    // the cookie line is always visible ASCII.
    let value = HeaderValue::from_str(&value).expect("cookie line is not valid header text");
    (header::SET_COOKIE, value)
}
