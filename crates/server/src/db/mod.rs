//! Database operations for the Clementine `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `users` - Accounts (argon2 password hash, display color, profile)
//! - `products` - Catalog records (read as cart snapshots and rating targets)
//! - `cart_lines` - Live cart state, one row per (user, product)
//! - `orders` - Immutable checkout records with frozen line items
//! - `ratings` - One row per (user, product), last write wins
//! - `comments` - Product comments
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and are embedded via
//! [`MIGRATOR`]; the binary applies them on startup.

pub mod cart;
pub mod comments;
pub mod orders;
pub mod ratings;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use cart::CartRepository;
pub use comments::CommentRepository;
pub use orders::OrderRepository;
pub use ratings::RatingRepository;
pub use users::UserRepository;

/// Embedded migrations for the server database.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// An all-or-nothing commit failed after the transaction was opened.
    #[error("transaction failed: {0}")]
    Transaction(String),
}

impl RepositoryError {
    /// Map a sqlx error, turning unique violations into [`Self::Conflict`].
    pub(crate) fn on_unique(e: sqlx::Error, conflict: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict.to_owned());
        }
        Self::Database(e)
    }

    /// Map a sqlx error, turning foreign key violations into [`Self::NotFound`].
    pub(crate) fn on_foreign_key(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_foreign_key_violation()
        {
            return Self::NotFound;
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// Acquisition is bounded so a stuck connection surfaces as an error instead
/// of exhausting the pool; connections release on drop on every exit path.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
