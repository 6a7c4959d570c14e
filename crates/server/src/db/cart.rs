//! Cart repository: live (user, product) → quantity state.
//!
//! The add path is a single `INSERT ... ON CONFLICT DO UPDATE` so concurrent
//! adds of the same line merge at the database instead of racing through a
//! read-then-write.

use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use clementine_core::{Price, PublicId, UserId};

use super::RepositoryError;
use crate::models::{CartLine, ProductSnapshot};

/// Cart line joined against the current product record.
#[derive(sqlx::FromRow)]
struct CartLineRow {
    public_id: Uuid,
    name: String,
    description: String,
    price: Decimal,
    image_url: Option<String>,
    category: Option<String>,
    avg_rating: Option<Decimal>,
    quantity: i32,
}

impl CartLineRow {
    fn into_line(self) -> Result<CartLine, RepositoryError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative cart quantity in database: {}",
                self.quantity
            ))
        })?;

        Ok(CartLine {
            product: ProductSnapshot {
                product_id: PublicId::from_uuid(self.public_id),
                name: self.name,
                description: self.description,
                price: Price::new(self.price),
                image_url: self.image_url,
                category: self.category,
                avg_rating: self.avg_rating,
            },
            quantity,
        })
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add `quantity` of a product to the user's cart.
    ///
    /// Merge-on-conflict: if a line already exists for (user, product) the
    /// quantity is accumulated onto it atomically. Exactly one statement, so
    /// concurrent adds never lose updates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: PublicId,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO cart_lines (user_id, product_id, quantity) \
             SELECT $1, p.id, $3 FROM products p WHERE p.public_id = $2 \
             ON CONFLICT (user_id, product_id) \
             DO UPDATE SET quantity = cart_lines.quantity + EXCLUDED.quantity, \
                           updated_at = now()",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(i64::from(quantity))
        .execute(self.pool)
        .await
        .map_err(RepositoryError::on_foreign_key)?;

        // Zero rows means the product SELECT matched nothing.
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove a product's line from the user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no matching line exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn remove_item(
        &self,
        user_id: UserId,
        product_id: PublicId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM cart_lines c USING products p \
             WHERE c.product_id = p.id AND c.user_id = $1 AND p.public_id = $2",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List the user's cart lines joined with current product snapshots.
    ///
    /// An empty cart is an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            "SELECT p.public_id, p.name, p.description, p.price, p.image_url, \
                    p.category, p.avg_rating, c.quantity \
             FROM cart_lines c \
             JOIN products p ON p.id = c.product_id \
             WHERE c.user_id = $1 \
             ORDER BY c.created_at",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartLineRow::into_line).collect()
    }

    /// Get the quantity of a single product in the user's cart, if present.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn quantity_of(
        &self,
        user_id: UserId,
        product_id: PublicId,
    ) -> Result<Option<u32>, RepositoryError> {
        let row = sqlx::query_as::<_, (i32,)>(
            "SELECT c.quantity FROM cart_lines c \
             JOIN products p ON p.id = c.product_id \
             WHERE c.user_id = $1 AND p.public_id = $2",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some((quantity,)) => {
                let quantity = u32::try_from(quantity).map_err(|_| {
                    RepositoryError::DataCorruption(format!(
                        "negative cart quantity in database: {quantity}"
                    ))
                })?;
                Ok(Some(quantity))
            }
            None => Ok(None),
        }
    }

    /// Delete all of the user's cart lines.
    ///
    /// Takes an executor so the checkout orchestrator can run this inside
    /// its order-insert transaction; never called standalone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(
        executor: impl PgExecutor<'_>,
        user_id: UserId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_lines WHERE user_id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
