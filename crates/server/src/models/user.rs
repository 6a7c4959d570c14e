//! User domain types.

use chrono::{DateTime, Utc};

use clementine_core::{DisplayColor, Email, PublicId, Role, UserId};

/// An account (domain type).
///
/// The password hash never leaves the repository layer; this type carries
/// everything else.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal ID, never exposed over the API.
    pub id: UserId,
    /// Opaque external identifier.
    pub public_id: PublicId,
    /// The account's email address.
    pub email: Email,
    /// Display color assigned at registration.
    pub color: DisplayColor,
    /// Account role.
    pub role: Role,
    /// Optional profile phone number.
    pub phone: Option<String>,
    /// Optional profile address.
    pub address: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
