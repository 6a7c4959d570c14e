//! Core services.
//!
//! The four components with real invariants live here; the routes are thin
//! wrappers around them:
//!
//! - [`auth`] - Credential store (register, authenticate, profile, delete)
//! - [`token`] - Signed session token issuance and verification
//! - [`cart`] - Cart engine (merge-on-add quantity state)
//! - [`checkout`] - Checkout orchestrator (atomic cart-to-order)
//! - [`rating`] - Rating aggregator (serialized running mean)
//! - [`comments`] - Product comment threads

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod comments;
pub mod rating;
pub mod token;

use std::time::Duration;

use crate::db::RepositoryError;

/// Backoff before the single retry of an idempotent read.
pub(crate) const RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// Whether a repository error is transient (I/O or pool pressure) and an
/// idempotent operation may be retried once.
pub(crate) fn is_transient(err: &RepositoryError) -> bool {
    matches!(
        err,
        RepositoryError::Database(sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut)
    )
}
