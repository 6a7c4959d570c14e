//! Comment integration tests.
//!
//! Require `DATABASE_URL`; each test skips silently when it is unset.

mod common;

use clementine_core::PublicId;
use clementine_server::services::comments::{CommentError, CommentService};

#[tokio::test]
async fn add_returns_refreshed_thread() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let alice = common::register_user(&pool).await;
    let bob = common::register_user(&pool).await;
    let product = common::create_product(&pool, "kettle", "39.00").await;
    let comments = CommentService::new(&pool);

    let thread = comments
        .add(alice.id, product, "Boils fast.")
        .await
        .expect("first comment");
    assert_eq!(thread.len(), 1);

    let thread = comments
        .add(bob.id, product, "Handle gets warm.")
        .await
        .expect("second comment");

    // Oldest first, authors joined in
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].body, "Boils fast.");
    assert_eq!(thread[0].author_email, alice.email);
    assert_eq!(thread[1].body, "Handle gets warm.");
    assert_eq!(thread[1].author_color, bob.color);
}

#[tokio::test]
async fn blank_body_rejected() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let user = common::register_user(&pool).await;
    let product = common::create_product(&pool, "mug", "9.50").await;
    let comments = CommentService::new(&pool);

    for body in ["", "   ", "\n\t"] {
        assert!(matches!(
            comments.add(user.id, product, body).await,
            Err(CommentError::InvalidBody)
        ));
    }

    assert!(comments.list(product).await.expect("list").is_empty());
}

#[tokio::test]
async fn unknown_product_rejected() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let user = common::register_user(&pool).await;
    let comments = CommentService::new(&pool);
    let missing = PublicId::generate();

    assert!(matches!(
        comments.add(user.id, missing, "hello").await,
        Err(CommentError::ProductNotFound)
    ));
    assert!(matches!(
        comments.list(missing).await,
        Err(CommentError::ProductNotFound)
    ));
}
