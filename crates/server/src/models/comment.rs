//! Comment domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use clementine_core::{CommentId, DisplayColor, Email};

/// A product comment with its author joined in.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    /// Comment ID.
    pub id: CommentId,
    /// Author's email, for client display.
    pub author_email: Email,
    /// Author's display color.
    pub author_color: DisplayColor,
    /// Comment text.
    pub body: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}
