//! Shared helpers for database-backed integration tests.
//!
//! Tests run against the database named by `DATABASE_URL` and skip cleanly
//! when the variable is unset, so the suite passes on machines without a
//! local `PostgreSQL`.

#![allow(dead_code)] // not every test file uses every helper

use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use clementine_core::{Price, PublicId};
use clementine_server::db::MIGRATOR;
use clementine_server::models::User;
use clementine_server::services::auth::AuthService;

/// Password satisfying the strength policy, for fixture accounts.
pub const TEST_PASSWORD: &str = "Str0ng!pass";

/// Connect to the test database, or `None` if `DATABASE_URL` is unset or
/// unreachable. Applies migrations before handing the pool out.
pub async fn try_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await
        .ok()?;

    MIGRATOR.run(&pool).await.ok()?;

    Some(pool)
}

/// A fresh email no other test run can collide with.
pub fn unique_email() -> String {
    format!("user-{}@test.example", uuid::Uuid::new_v4().simple())
}

/// Register a fixture account with [`TEST_PASSWORD`].
pub async fn register_user(pool: &PgPool) -> User {
    AuthService::new(pool)
        .register(&unique_email(), TEST_PASSWORD)
        .await
        .expect("fixture registration failed")
}

/// Insert a catalog product and return its public ID.
pub async fn create_product(pool: &PgPool, name: &str, price: &str) -> PublicId {
    let price: Decimal = price.parse().expect("invalid fixture price");

    let (public_id,): (PublicId,) = sqlx::query_as(
        "INSERT INTO products (name, description, price) VALUES ($1, $2, $3) RETURNING public_id",
    )
    .bind(name)
    .bind(format!("{name} description"))
    .bind(price)
    .fetch_one(pool)
    .await
    .expect("fixture product insert failed");

    public_id
}

/// The fixture price as a domain [`Price`].
pub fn price(value: &str) -> Price {
    Price::new(value.parse().expect("invalid price literal"))
}
