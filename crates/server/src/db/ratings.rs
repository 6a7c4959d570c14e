//! Rating repository: last-write-wins votes and serialized aggregation.
//!
//! The whole rate operation runs in one transaction that locks the product
//! row (`SELECT ... FOR UPDATE`). Concurrent raters of the same product
//! serialize on that lock, so the recomputed average always reads a
//! consistent snapshot of the ratings table, never a partially-written set.

use rust_decimal::Decimal;
use sqlx::PgPool;

use clementine_core::{PublicId, UserId};

use super::RepositoryError;

/// Repository for rating database operations.
pub struct RatingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RatingRepository<'a> {
    /// Create a new rating repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a rating and recompute the product's average.
    ///
    /// Upserts the (user, product) vote (a repeat rating overwrites the
    /// prior value), then recomputes `avg(value)` over all votes for the
    /// product and persists it onto the product record, all while holding
    /// the product row lock.
    ///
    /// Returns the new average, rounded to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product or user does not
    /// exist. Returns `RepositoryError::Transaction` if the commit fails.
    pub async fn rate(
        &self,
        user_id: UserId,
        product_id: PublicId,
        value: i16,
    ) -> Result<Decimal, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Lock the product row: serializes concurrent raters of this
        // product and resolves the internal ID in one step.
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM products WHERE public_id = $1 FOR UPDATE")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((product_pk,)) = row else {
            return Err(RepositoryError::NotFound);
        };

        sqlx::query(
            "INSERT INTO ratings (user_id, product_id, value) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, product_id) \
             DO UPDATE SET value = EXCLUDED.value, updated_at = now()",
        )
        .bind(user_id)
        .bind(product_pk)
        .bind(value)
        .execute(&mut *tx)
        .await
        .map_err(RepositoryError::on_foreign_key)?;

        let (average,): (Option<Decimal>,) =
            sqlx::query_as("SELECT avg(value) FROM ratings WHERE product_id = $1")
                .bind(product_pk)
                .fetch_one(&mut *tx)
                .await?;

        // At least the row we just wrote exists.
        let average = average
            .ok_or_else(|| {
                RepositoryError::DataCorruption("average of freshly-rated product is null".into())
            })?
            .round_dp(2);

        sqlx::query("UPDATE products SET avg_rating = $1 WHERE id = $2")
            .bind(average)
            .bind(product_pk)
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Transaction(e.to_string()))?;

        Ok(average)
    }
}
