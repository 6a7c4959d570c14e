//! Order repository: atomic checkout persistence and order history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use clementine_core::{OrderStatus, Price, PublicId, UserId};

use super::{CartRepository, RepositoryError};
use crate::models::{Order, OrderLineItem};

/// Raw `orders` row.
#[derive(sqlx::FromRow)]
struct OrderRow {
    public_id: Uuid,
    status: String,
    total_price: Decimal,
    line_items: Json<Vec<OrderLineItem>>,
    payment_last4: String,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        let status: OrderStatus = self.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;

        Ok(Order {
            order_id: PublicId::from_uuid(self.public_id),
            status,
            total_price: Price::new(self.total_price),
            line_items: self.line_items.0,
            payment_last4: self.payment_last4,
            created_at: self.created_at,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Atomically convert a cart into an order.
    ///
    /// One transaction: insert the order row (status `pending`, frozen line
    /// items), then delete the user's cart lines. If either step fails the
    /// whole transaction rolls back; there is never an order without a
    /// cleared cart or a cleared cart without an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    /// Returns `RepositoryError::Transaction` if the final commit fails.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_from_cart(
        &self,
        user_id: UserId,
        total_price: Price,
        line_items: &[OrderLineItem],
        payment_last4: &str,
    ) -> Result<PublicId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (order_public_id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO orders (user_id, status, total_price, line_items, payment_last4) \
             VALUES ($1, $2, $3, $4, $5) RETURNING public_id",
        )
        .bind(user_id)
        .bind(OrderStatus::Pending.as_str())
        .bind(total_price)
        .bind(Json(line_items))
        .bind(payment_last4)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepositoryError::on_foreign_key)?;

        CartRepository::clear(&mut *tx, user_id).await?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Transaction(e.to_string()))?;

        Ok(PublicId::from_uuid(order_public_id))
    }

    /// List the user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT public_id, status, total_price, line_items, payment_last4, created_at \
             FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }
}
