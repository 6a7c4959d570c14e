//! Product comments.

use sqlx::PgPool;
use thiserror::Error;

use clementine_core::{PublicId, UserId};

use crate::db::{CommentRepository, RepositoryError};
use crate::models::Comment;

/// Longest accepted comment body.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/// Errors that can occur during comment operations.
#[derive(Debug, Error)]
pub enum CommentError {
    /// Empty or oversized comment body.
    #[error("comment body must be 1 to {MAX_COMMENT_LENGTH} characters")]
    InvalidBody,

    /// The product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Comment service.
pub struct CommentService<'a> {
    comments: CommentRepository<'a>,
}

impl<'a> CommentService<'a> {
    /// Create a new comment service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            comments: CommentRepository::new(pool),
        }
    }

    /// Add a comment to a product, then return the product's full comment
    /// list (the original flow responds with the refreshed thread).
    ///
    /// # Errors
    ///
    /// Returns `CommentError::InvalidBody` for an empty or oversized body.
    /// Returns `CommentError::ProductNotFound` if the product doesn't exist.
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: PublicId,
        body: &str,
    ) -> Result<Vec<Comment>, CommentError> {
        let body = body.trim();
        if body.is_empty() || body.chars().count() > MAX_COMMENT_LENGTH {
            return Err(CommentError::InvalidBody);
        }

        self.comments
            .add(user_id, product_id, body)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CommentError::ProductNotFound,
                other => CommentError::Repository(other),
            })?;

        self.list(product_id).await
    }

    /// List a product's comments, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `CommentError::ProductNotFound` if the product doesn't exist.
    pub async fn list(&self, product_id: PublicId) -> Result<Vec<Comment>, CommentError> {
        self.comments
            .list_for_product(product_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CommentError::ProductNotFound,
                other => CommentError::Repository(other),
            })
    }
}
