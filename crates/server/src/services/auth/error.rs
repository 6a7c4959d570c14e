//! Authentication error types.

use thiserror::Error;

use clementine_core::{EmailError, PasswordPolicyError};

use crate::db::RepositoryError;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password too weak.
    #[error("password validation failed: {0}")]
    WeakPassword(#[from] PasswordPolicyError),

    /// An account with this email already exists.
    #[error("account already exists")]
    AlreadyExists,

    /// No account matches.
    #[error("account not found")]
    NotFound,

    /// Wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
