//! Cart domain types.

use serde::Serialize;

use clementine_core::{Price, PublicId};

/// A point-in-time view of a product, joined into cart reads.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSnapshot {
    /// Opaque external product identifier.
    pub product_id: PublicId,
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Current unit price.
    pub price: Price,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Optional category.
    pub category: Option<String>,
    /// Current aggregate rating, if any ratings exist.
    pub avg_rating: Option<rust_decimal::Decimal>,
}

/// One live cart line: a product snapshot plus the accumulated quantity.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    /// The product as of this read.
    #[serde(flatten)]
    pub product: ProductSnapshot,
    /// Accumulated quantity since the cart was last cleared.
    pub quantity: u32,
}
