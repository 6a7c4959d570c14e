//! Cart engine integration tests.
//!
//! Require `DATABASE_URL`; each test skips silently when it is unset.

mod common;

use clementine_core::PublicId;
use clementine_server::services::cart::{CartError, CartService};

#[tokio::test]
async fn adds_merge_into_one_line() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let user = common::register_user(&pool).await;
    let product = common::create_product(&pool, "kettle", "39.00").await;
    let cart = CartService::new(&pool);

    cart.add_item(user.id, product, 2).await.expect("first add");
    cart.add_item(user.id, product, 3).await.expect("second add");

    let lines = cart.get_cart(user.id).await.expect("get cart");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 5);
    assert_eq!(lines[0].product.product_id, product);
}

#[tokio::test]
async fn concurrent_adds_lose_nothing() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let user = common::register_user(&pool).await;
    let product = common::create_product(&pool, "mug", "9.50").await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            CartService::new(&pool).add_item(user.id, product, 1).await
        }));
    }
    for handle in handles {
        handle.await.expect("task").expect("add");
    }

    let quantity = CartService::new(&pool)
        .quantity_of(user.id, product)
        .await
        .expect("quantity");
    assert_eq!(quantity, Some(8));
}

#[tokio::test]
async fn carts_are_isolated_per_user() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let alice = common::register_user(&pool).await;
    let bob = common::register_user(&pool).await;
    let product = common::create_product(&pool, "lamp", "24.00").await;
    let cart = CartService::new(&pool);

    cart.add_item(alice.id, product, 4).await.expect("add");

    assert_eq!(
        cart.quantity_of(alice.id, product).await.expect("alice"),
        Some(4)
    );
    assert_eq!(cart.quantity_of(bob.id, product).await.expect("bob"), None);
    assert!(cart.get_cart(bob.id).await.expect("bob cart").is_empty());
}

#[tokio::test]
async fn remove_deletes_the_line() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let user = common::register_user(&pool).await;
    let product = common::create_product(&pool, "vase", "14.00").await;
    let cart = CartService::new(&pool);

    cart.add_item(user.id, product, 2).await.expect("add");
    cart.remove_item(user.id, product).await.expect("remove");

    assert!(cart.get_cart(user.id).await.expect("get cart").is_empty());
    assert!(matches!(
        cart.remove_item(user.id, product).await,
        Err(CartError::LineNotFound)
    ));
}

#[tokio::test]
async fn unknown_product_rejected() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let user = common::register_user(&pool).await;
    let cart = CartService::new(&pool);

    assert!(matches!(
        cart.add_item(user.id, PublicId::generate(), 1).await,
        Err(CartError::ProductNotFound)
    ));
}

#[tokio::test]
async fn zero_quantity_rejected_without_touching_state() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let user = common::register_user(&pool).await;
    let product = common::create_product(&pool, "bowl", "7.00").await;
    let cart = CartService::new(&pool);

    assert!(matches!(
        cart.add_item(user.id, product, 0).await,
        Err(CartError::InvalidQuantity)
    ));
    assert!(cart.get_cart(user.id).await.expect("get cart").is_empty());
}
