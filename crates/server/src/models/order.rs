//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clementine_core::{OrderStatus, Price, PublicId};

/// One line item at the moment of checkout.
///
/// Serialized as-is into the order's frozen `line_items` snapshot. The unit
/// price comes from the client's cart payload; see the checkout service for
/// the (flagged) trust boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLineItem {
    /// Opaque external product identifier.
    pub product_id: PublicId,
    /// Product name at checkout time.
    pub name: String,
    /// Unit price at checkout time.
    pub price: Price,
    /// Quantity purchased.
    pub quantity: u32,
}

/// An immutable order record.
///
/// Everything except `status` is frozen at creation; the line items are a
/// serialized copy with no live reference back to cart or product rows.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Opaque external order identifier.
    pub order_id: PublicId,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Total price computed at checkout.
    pub total_price: Price,
    /// Frozen copy of the purchased line items.
    pub line_items: Vec<OrderLineItem>,
    /// Last four digits of the payment reference.
    pub payment_last4: String,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}
