//! Checkout orchestrator integration tests.
//!
//! Require `DATABASE_URL`; each test skips silently when it is unset.

mod common;

use clementine_core::OrderStatus;
use clementine_server::models::OrderLineItem;
use clementine_server::services::cart::CartService;
use clementine_server::services::checkout::{CheckoutError, CheckoutService};

const PAYMENT_REF: &str = "4242424242424242";

#[tokio::test]
async fn checkout_freezes_order_and_empties_cart() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let user = common::register_user(&pool).await;
    let kettle = common::create_product(&pool, "kettle", "39.00").await;
    let mug = common::create_product(&pool, "mug", "9.50").await;

    let cart = CartService::new(&pool);
    cart.add_item(user.id, kettle, 1).await.expect("add kettle");
    cart.add_item(user.id, mug, 2).await.expect("add mugs");

    let line_items: Vec<OrderLineItem> = cart
        .get_cart(user.id)
        .await
        .expect("get cart")
        .into_iter()
        .map(|line| OrderLineItem {
            product_id: line.product.product_id,
            name: line.product.name,
            price: line.product.price,
            quantity: line.quantity,
        })
        .collect();

    let checkout = CheckoutService::new(&pool);
    let order_id = checkout
        .checkout(user.id, &line_items, PAYMENT_REF)
        .await
        .expect("checkout");

    // The cart was cleared in the same transaction
    assert!(cart.get_cart(user.id).await.expect("get cart").is_empty());

    let orders = checkout.list_orders(user.id).await.expect("list orders");
    assert_eq!(orders.len(), 1);

    let order = &orders[0];
    assert_eq!(order.order_id, order_id);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_price, common::price("58.00")); // 39.00 + 2 * 9.50
    assert_eq!(order.payment_last4, "4242");
    assert_eq!(order.line_items.len(), 2);
}

#[tokio::test]
async fn empty_cart_cannot_check_out() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let user = common::register_user(&pool).await;
    let checkout = CheckoutService::new(&pool);

    assert!(matches!(
        checkout.checkout(user.id, &[], PAYMENT_REF).await,
        Err(CheckoutError::EmptyCart)
    ));
    assert!(checkout.list_orders(user.id).await.expect("list").is_empty());
}

#[tokio::test]
async fn bad_payment_reference_creates_nothing() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let user = common::register_user(&pool).await;
    let product = common::create_product(&pool, "teapot", "18.00").await;

    let cart = CartService::new(&pool);
    cart.add_item(user.id, product, 1).await.expect("add");

    let line_items = vec![OrderLineItem {
        product_id: product,
        name: "teapot".to_owned(),
        price: common::price("18.00"),
        quantity: 1,
    }];

    let checkout = CheckoutService::new(&pool);
    assert!(matches!(
        checkout.checkout(user.id, &line_items, "not-a-card").await,
        Err(CheckoutError::InvalidPaymentReference)
    ));

    // Nothing committed: no order, cart untouched
    assert!(checkout.list_orders(user.id).await.expect("list").is_empty());
    assert_eq!(cart.get_cart(user.id).await.expect("cart").len(), 1);
}

#[tokio::test]
async fn failed_order_insert_leaves_cart_intact() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let user = common::register_user(&pool).await;
    let product = common::create_product(&pool, "vase", "25.00").await;

    let cart = CartService::new(&pool);
    cart.add_item(user.id, product, 3).await.expect("add");

    // A total beyond NUMERIC(12,2) makes the order INSERT itself fail,
    // after validation has already passed.
    let line_items = vec![OrderLineItem {
        product_id: product,
        name: "vase".to_owned(),
        price: common::price("9999999999.99"),
        quantity: 2,
    }];

    let checkout = CheckoutService::new(&pool);
    assert!(
        checkout
            .checkout(user.id, &line_items, PAYMENT_REF)
            .await
            .is_err()
    );

    // The transaction rolled back whole: no order, cart unchanged
    assert!(checkout.list_orders(user.id).await.expect("list").is_empty());
    let lines = cart.get_cart(user.id).await.expect("cart");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 3);
}

#[tokio::test]
async fn orders_list_newest_first() {
    let Some(pool) = common::try_pool().await else {
        return;
    };

    let user = common::register_user(&pool).await;
    let product = common::create_product(&pool, "plate", "6.00").await;
    let cart = CartService::new(&pool);
    let checkout = CheckoutService::new(&pool);

    let mut placed = Vec::new();
    for _ in 0..2 {
        cart.add_item(user.id, product, 1).await.expect("add");
        let line_items = vec![OrderLineItem {
            product_id: product,
            name: "plate".to_owned(),
            price: common::price("6.00"),
            quantity: 1,
        }];
        placed.push(
            checkout
                .checkout(user.id, &line_items, PAYMENT_REF)
                .await
                .expect("checkout"),
        );
    }

    let orders = checkout.list_orders(user.id).await.expect("list");
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].order_id, placed[1]);
    assert_eq!(orders[1].order_id, placed[0]);
}
