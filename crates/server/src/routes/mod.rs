//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                       - Liveness check
//! GET    /health/ready                 - Readiness check (pings the database)
//!
//! # Auth
//! POST   /auth/register                - Create an account, sets session cookies
//! POST   /auth/login                   - Authenticate, sets session cookies
//! DELETE /auth/logout                  - Clear session cookies
//! DELETE /auth/account                 - Delete the signed-in account
//!
//! # Profile (requires auth)
//! GET    /profile                      - Signed-in account details
//! PUT    /profile                      - Update phone and address
//!
//! # Cart (requires auth)
//! PUT    /cart                         - Add a quantity of a product (merge-on-add)
//! POST   /cart/remove                  - Remove a product's line
//! GET    /cart                         - Current cart contents
//! GET    /cart/contains/{product_id}   - Quantity of one product in the cart
//!
//! # Checkout and orders (requires auth)
//! POST   /checkout                     - Convert the cart into an order
//! GET    /orders                       - Order history, newest first
//!
//! # Products
//! GET    /products/{id}/comments       - A product's comment thread
//! POST   /products/{id}/comments       - Add a comment (requires auth)
//! POST   /products/{id}/rating         - Rate a product 1-5 (requires auth)
//! ```

pub mod auth;
pub mod cart;
pub mod comments;
pub mod health;
pub mod orders;
pub mod profile;
pub mod ratings;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", delete(auth::logout))
        .route("/account", delete(auth::delete_account))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", put(cart::add).get(cart::show))
        .route("/remove", post(cart::remove))
        .route("/contains/{product_id}", get(cart::contains))
}

/// Create the product routes router (comments and ratings).
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{product_id}/comments",
            get(comments::list).post(comments::add),
        )
        .route("/{product_id}/rating", post(ratings::rate))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .nest("/auth", auth_routes())
        .route("/profile", get(profile::show).put(profile::update))
        .nest("/cart", cart_routes())
        .route("/checkout", post(orders::checkout))
        .route("/orders", get(orders::list))
        .nest("/products", product_routes())
}
