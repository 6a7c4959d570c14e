//! Cart engine: validated merge-on-add cart state.

use sqlx::PgPool;
use thiserror::Error;

use clementine_core::{PublicId, UserId};

use crate::db::{CartRepository, RepositoryError};
use crate::models::CartLine;

/// Largest quantity accepted by a single add.
pub const MAX_QUANTITY_PER_ADD: u32 = 1_000;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantity was zero or above [`MAX_QUANTITY_PER_ADD`].
    #[error("quantity must be between 1 and {MAX_QUANTITY_PER_ADD}")]
    InvalidQuantity,

    /// The product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// No cart line exists for this (user, product).
    #[error("cart line not found")]
    LineNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Cart engine service.
pub struct CartService<'a> {
    cart: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart engine.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            cart: CartRepository::new(pool),
        }
    }

    /// Add a quantity of a product to the user's cart.
    ///
    /// Merge-on-add: repeated adds for the same (user, product) accumulate
    /// into one line. The underlying write is a single atomic upsert, so
    /// concurrent adds of the same line never lose updates.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if the quantity is not in
    /// `1..=MAX_QUANTITY_PER_ADD`.
    /// Returns `CartError::ProductNotFound` if the product doesn't exist.
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: PublicId,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 || quantity > MAX_QUANTITY_PER_ADD {
            return Err(CartError::InvalidQuantity);
        }

        self.cart
            .add_item(user_id, product_id, quantity)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CartError::ProductNotFound,
                other => CartError::Repository(other),
            })
    }

    /// Remove a product's line from the user's cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` if no matching line exists.
    pub async fn remove_item(
        &self,
        user_id: UserId,
        product_id: PublicId,
    ) -> Result<(), CartError> {
        self.cart
            .remove_item(user_id, product_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CartError::LineNotFound,
                other => CartError::Repository(other),
            })
    }

    /// Get the user's cart: product snapshots with accumulated quantities.
    ///
    /// An empty cart returns an empty list.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the read fails.
    pub async fn get_cart(&self, user_id: UserId) -> Result<Vec<CartLine>, CartError> {
        match self.cart.list(user_id).await {
            Ok(lines) => Ok(lines),
            Err(e) if super::is_transient(&e) => {
                // Idempotent read: one retry with backoff
                tracing::warn!(error = %e, "transient error reading cart, retrying once");
                tokio::time::sleep(super::RETRY_BACKOFF).await;
                Ok(self.cart.list(user_id).await?)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The quantity of one product in the user's cart, if any.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the read fails.
    pub async fn quantity_of(
        &self,
        user_id: UserId,
        product_id: PublicId,
    ) -> Result<Option<u32>, CartError> {
        Ok(self.cart.quantity_of(user_id, product_id).await?)
    }
}
