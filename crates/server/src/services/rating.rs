//! Rating aggregator: last-write-wins votes and a serialized running mean.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use clementine_core::{PublicId, UserId};

use crate::db::{RatingRepository, RepositoryError};

/// Inclusive rating bounds.
pub const MIN_RATING: i16 = 1;
/// Inclusive rating bounds.
pub const MAX_RATING: i16 = 5;

/// Errors that can occur while rating.
#[derive(Debug, Error)]
pub enum RatingError {
    /// Rating value outside `1..=5`.
    #[error("rating must be between {MIN_RATING} and {MAX_RATING}")]
    OutOfRange,

    /// The product (or the rating account) does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Rating aggregator service.
pub struct RatingService<'a> {
    ratings: RatingRepository<'a>,
}

impl<'a> RatingService<'a> {
    /// Create a new rating aggregator.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            ratings: RatingRepository::new(pool),
        }
    }

    /// Rate a product and return the product's new average rating.
    ///
    /// A repeat rating from the same account overwrites the previous value
    /// (last-write-wins). The recomputation runs serialized per product, so
    /// concurrent raters never produce an average over a half-written set.
    ///
    /// # Errors
    ///
    /// Returns `RatingError::OutOfRange` if the value is not in `1..=5`.
    /// Returns `RatingError::ProductNotFound` if the product doesn't exist.
    pub async fn rate(
        &self,
        user_id: UserId,
        product_id: PublicId,
        value: i16,
    ) -> Result<Decimal, RatingError> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(RatingError::OutOfRange);
        }

        let average = self
            .ratings
            .rate(user_id, product_id, value)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => RatingError::ProductNotFound,
                other => RatingError::Repository(other),
            })?;

        tracing::debug!(product = %product_id, average = %average, "rating recorded");

        Ok(average)
    }
}
