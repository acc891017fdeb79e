//! Database operations for storefront `PostgreSQL`.
//!
//! # Database: `greenridge`
//!
//! ## Tables
//!
//! - `products` - Catalog items, keyed by `(category_key, id)`
//! - `orders` - Placed orders (append-only)
//! - `order_lines` - Frozen order lines, positioned per order
//! - `sessions` - Tower-sessions storage (holds the per-session cart)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run at
//! startup via `sqlx::migrate!`; the sessions table is managed by
//! tower-sessions' own migrator.

pub mod catalog;
pub mod orders;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use catalog::CatalogRepository;
pub use orders::OrderRepository;

/// Errors surfaced by the repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The query itself failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row no longer passes domain validation, for example a
    /// malformed category key or a negative price.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Connection pool sized for a single small service instance.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
