//! Seams to the external collaborators.
//!
//! The checkout flow talks to three things it does not own: the product
//! catalog, the order store, and a staff notifier. Each is a trait here so
//! the flow stays pure logic; the storefront implements them over Postgres
//! and the Telegram Bot API, tests implement them in memory.
//!
//! Methods return `impl Future + Send` rather than plain `async fn` so
//! generic callers get `Send` futures they can spawn from request handlers.

use std::future::Future;

use crate::order::Order;
use crate::types::{CatalogItem, CategoryKey, ItemId, OrderId};

/// Read-only product catalog.
pub trait CatalogStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Looks up one item by its composite key. `Ok(None)` when absent.
    fn get_item(
        &self,
        category_key: &CategoryKey,
        id: &ItemId,
    ) -> impl Future<Output = Result<Option<CatalogItem>, Self::Error>> + Send;

    /// All items in a category, in store order.
    fn list_by_category(
        &self,
        category_key: &CategoryKey,
    ) -> impl Future<Output = Result<Vec<CatalogItem>, Self::Error>> + Send;
}

/// Append-only order persistence.
pub trait OrderStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persists a fully assembled order, echoing its id on success.
    fn append(&self, order: &Order) -> impl Future<Output = Result<OrderId, Self::Error>> + Send;
}

/// Delivers an order summary to staff. Failures are the caller's to
/// tolerate; a lost notification must never lose the order.
pub trait Notifier {
    type Error: std::error::Error + Send + Sync + 'static;

    fn send(&self, message: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
