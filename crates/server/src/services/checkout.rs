//! Checkout orchestrator: atomic cart-to-order conversion.

use sqlx::PgPool;
use thiserror::Error;

use clementine_core::{Price, PublicId, UserId};

use crate::db::{OrderRepository, RepositoryError};
use crate::models::{Order, OrderLineItem};

/// Required payment reference length (digits).
const PAYMENT_REFERENCE_LENGTH: usize = 16;

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The submitted cart has no line items.
    #[error("cart is empty")]
    EmptyCart,

    /// The payment reference is not exactly 16 digits.
    #[error("payment reference must be exactly {PAYMENT_REFERENCE_LENGTH} digits")]
    InvalidPaymentReference,

    /// A line item has a zero quantity or a negative price.
    #[error("invalid line item: {0}")]
    InvalidLineItem(String),

    /// The account does not exist.
    #[error("account not found")]
    AccountNotFound,

    /// The atomic commit failed. Surfaced, never retried: a blind retry
    /// could double-charge.
    #[error("checkout transaction failed: {0}")]
    Transaction(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Checkout orchestrator service.
pub struct CheckoutService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout orchestrator.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Convert the user's cart into an immutable order.
    ///
    /// Computes the total from the client-supplied line items, then in one
    /// all-or-nothing transaction inserts the order (status `pending`, with
    /// a frozen copy of the items and the masked payment reference) and
    /// clears the user's cart lines.
    ///
    /// The total trusts the client's unit prices. That is a known weakness
    /// carried over from the original flow; server-side re-pricing from the
    /// catalog is the hardening option if it is ever closed.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart`, `InvalidPaymentReference`, or
    /// `InvalidLineItem` on bad input; `AccountNotFound` for an unknown
    /// account; `Transaction` if the atomic commit fails.
    pub async fn checkout(
        &self,
        user_id: UserId,
        line_items: &[OrderLineItem],
        payment_reference: &str,
    ) -> Result<PublicId, CheckoutError> {
        if line_items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if !is_valid_payment_reference(payment_reference) {
            return Err(CheckoutError::InvalidPaymentReference);
        }

        let total_price = order_total(line_items)?;

        // Only the last four digits are persisted.
        let last4 = &payment_reference[PAYMENT_REFERENCE_LENGTH - 4..];

        let order_id = self
            .orders
            .create_from_cart(user_id, total_price, line_items, last4)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CheckoutError::AccountNotFound,
                RepositoryError::Transaction(msg) => CheckoutError::Transaction(msg),
                other => CheckoutError::Repository(other),
            })?;

        tracing::info!(order = %order_id, total = %total_price, "order placed");

        Ok(order_id)
    }

    /// List the user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Repository` if the read fails.
    pub async fn list_orders(&self, user_id: UserId) -> Result<Vec<Order>, CheckoutError> {
        match self.orders.list_for_user(user_id).await {
            Ok(orders) => Ok(orders),
            Err(e) if super::is_transient(&e) => {
                // Idempotent read: one retry with backoff
                tracing::warn!(error = %e, "transient error listing orders, retrying once");
                tokio::time::sleep(super::RETRY_BACKOFF).await;
                Ok(self.orders.list_for_user(user_id).await?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Payment reference format check: exactly 16 ASCII digits.
///
/// A structural sanity check only; real payment validation is out of scope.
fn is_valid_payment_reference(reference: &str) -> bool {
    reference.len() == PAYMENT_REFERENCE_LENGTH && reference.bytes().all(|b| b.is_ascii_digit())
}

/// Total price: Σ(unit price × quantity) over the line items.
fn order_total(line_items: &[OrderLineItem]) -> Result<Price, CheckoutError> {
    let mut total = Price::ZERO;
    for item in line_items {
        if item.quantity == 0 {
            return Err(CheckoutError::InvalidLineItem(format!(
                "zero quantity for product {}",
                item.product_id
            )));
        }
        if item.price.is_negative() {
            return Err(CheckoutError::InvalidLineItem(format!(
                "negative price for product {}",
                item.product_id
            )));
        }
        total = total + item.price.line_total(item.quantity);
    }
    Ok(total)
}
