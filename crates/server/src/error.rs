//! Unified error handling.
//!
//! Provides a unified `AppError` type that maps every service error to an
//! HTTP status and a JSON body with a stable machine-readable `code`. All
//! route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::services::checkout::CheckoutError;
use crate::services::comments::CommentError;
use crate::services::rating::RatingError;
use crate::services::token::TokenError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Token issuance or verification failed.
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout operation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Rating operation failed.
    #[error("Rating error: {0}")]
    Rating(#[from] RatingError),

    /// Comment operation failed.
    #[error("Comment error: {0}")]
    Comment(#[from] CommentError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::NotFound => StatusCode::UNAUTHORIZED,
                AuthError::AlreadyExists => StatusCode::CONFLICT,
                AuthError::WeakPassword(_) | AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                AuthError::PasswordHash | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Token(err) => match err {
                TokenError::Expired | TokenError::InvalidSignature | TokenError::Malformed(_) => {
                    StatusCode::UNAUTHORIZED
                }
                TokenError::Creation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Cart(err) => match err {
                CartError::InvalidQuantity => StatusCode::BAD_REQUEST,
                CartError::ProductNotFound | CartError::LineNotFound => StatusCode::NOT_FOUND,
                CartError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart
                | CheckoutError::InvalidPaymentReference
                | CheckoutError::InvalidLineItem(_) => StatusCode::BAD_REQUEST,
                CheckoutError::AccountNotFound => StatusCode::NOT_FOUND,
                CheckoutError::Transaction(_) | CheckoutError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Rating(err) => match err {
                RatingError::OutOfRange => StatusCode::BAD_REQUEST,
                RatingError::ProductNotFound => StatusCode::NOT_FOUND,
                RatingError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Comment(err) => match err {
                CommentError::InvalidBody => StatusCode::BAD_REQUEST,
                CommentError::ProductNotFound => StatusCode::NOT_FOUND,
                CommentError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable machine-readable code for this error.
    fn code(&self) -> &'static str {
        match self {
            Self::Database(_) | Self::Internal(_) => "internal",
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::NotFound => "invalid_credentials",
                AuthError::AlreadyExists => "conflict",
                AuthError::WeakPassword(_) | AuthError::InvalidEmail(_) => "validation",
                AuthError::PasswordHash | AuthError::Repository(_) => "internal",
            },
            Self::Token(err) => match err {
                TokenError::Expired => "expired",
                TokenError::InvalidSignature | TokenError::Malformed(_) => "invalid_signature",
                TokenError::Creation(_) => "internal",
            },
            Self::Cart(err) => match err {
                CartError::InvalidQuantity => "validation",
                CartError::ProductNotFound | CartError::LineNotFound => "not_found",
                CartError::Repository(_) => "internal",
            },
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart
                | CheckoutError::InvalidPaymentReference
                | CheckoutError::InvalidLineItem(_) => "validation",
                CheckoutError::AccountNotFound => "not_found",
                CheckoutError::Transaction(_) => "transaction",
                CheckoutError::Repository(_) => "internal",
            },
            Self::Rating(err) => match err {
                RatingError::OutOfRange => "validation",
                RatingError::ProductNotFound => "not_found",
                RatingError::Repository(_) => "internal",
            },
            Self::Comment(err) => match err {
                CommentError::InvalidBody => "validation",
                CommentError::ProductNotFound => "not_found",
                CommentError::Repository(_) => "internal",
            },
            Self::NotFound(_) => "not_found",
            Self::Unauthorized(_) => "unauthorized",
            Self::BadRequest(_) => "validation",
        }
    }

    /// Whether the error originated on the server rather than from client
    /// input. Server errors get logged with full detail; the client only
    /// ever sees a generic message.
    fn is_server_error(&self) -> bool {
        self.status() == StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Client-facing message. Never exposes internal error details.
    fn message(&self) -> String {
        if self.is_server_error() {
            return "Internal server error".to_owned();
        }
        match self {
            Self::Auth(AuthError::InvalidCredentials | AuthError::NotFound) => {
                "Invalid email or password".to_owned()
            }
            Self::Auth(AuthError::AlreadyExists) => {
                "An account with this email already exists".to_owned()
            }
            Self::Auth(AuthError::WeakPassword(e)) => e.to_string(),
            Self::Auth(AuthError::InvalidEmail(e)) => e.to_string(),
            Self::Token(_) => "Session is invalid or expired, please sign in again".to_owned(),
            Self::Cart(e) => e.to_string(),
            Self::Checkout(e) => e.to_string(),
            Self::Rating(e) => e.to_string(),
            Self::Comment(e) => e.to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(error = %self, "Request error");
        }

        let body = json!({
            "code": self.code(),
            "message": self.message(),
        });

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_error_mapping() {
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::AlreadyExists)),
            StatusCode::CONFLICT
        );
        // Unknown email and wrong password are indistinguishable to clients.
        assert_eq!(
            AppError::Auth(AuthError::NotFound).message(),
            AppError::Auth(AuthError::InvalidCredentials).message()
        );
    }

    #[test]
    fn test_token_errors_are_unauthorized() {
        assert_eq!(
            get_status(AppError::Token(TokenError::Expired)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Token(TokenError::InvalidSignature)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::Internal("pool exhausted on pg-replica-2".to_owned());
        assert_eq!(err.message(), "Internal server error");
        assert_eq!(err.code(), "internal");
    }

    #[test]
    fn test_stable_codes() {
        assert_eq!(AppError::Cart(CartError::InvalidQuantity).code(), "validation");
        assert_eq!(
            AppError::Checkout(CheckoutError::Transaction("oops".to_owned())).code(),
            "transaction"
        );
        assert_eq!(AppError::Token(TokenError::Expired).code(), "expired");
        assert_eq!(
            AppError::Rating(RatingError::ProductNotFound).code(),
            "not_found"
        );
    }
}
