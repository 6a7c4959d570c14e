//! Comment repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use clementine_core::{CommentId, DisplayColor, Email, PublicId, UserId};

use super::RepositoryError;
use crate::models::Comment;

/// Comment row joined with its author.
#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    email: String,
    color: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Result<Comment, RepositoryError> {
        let author_email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Comment {
            id: CommentId::new(self.id),
            author_email,
            author_color: DisplayColor::from_hex(self.color),
            body: self.body,
            created_at: self.created_at,
        })
    }
}

/// Repository for comment database operations.
pub struct CommentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add a comment to a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: PublicId,
        body: &str,
    ) -> Result<CommentId, RepositoryError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "INSERT INTO comments (user_id, product_id, body) \
             SELECT $1, p.id, $3 FROM products p WHERE p.public_id = $2 \
             RETURNING id",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(body)
        .fetch_optional(self.pool)
        .await
        .map_err(RepositoryError::on_foreign_key)?;

        match row {
            Some((id,)) => Ok(CommentId::new(id)),
            None => Err(RepositoryError::NotFound),
        }
    }

    /// List a product's comments with authors joined in, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn list_for_product(
        &self,
        product_id: PublicId,
    ) -> Result<Vec<Comment>, RepositoryError> {
        let product: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM products WHERE public_id = $1")
                .bind(product_id)
                .fetch_optional(self.pool)
                .await?;

        let Some((product_pk,)) = product else {
            return Err(RepositoryError::NotFound);
        };

        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT c.id, u.email, u.color, c.body, c.created_at \
             FROM comments c \
             JOIN users u ON u.id = c.user_id \
             WHERE c.product_id = $1 \
             ORDER BY c.created_at",
        )
        .bind(product_pk)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CommentRow::into_comment).collect()
    }
}
