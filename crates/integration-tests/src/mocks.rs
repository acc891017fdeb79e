//! In-memory implementations of the checkout collaborators.
//!
//! Recording variants capture what the flow handed them; failing variants
//! error on every call so tests can pin down how each side effect
//! degrades.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use greenridge_core::order::Order;
use greenridge_core::stores::{CatalogStore, Notifier, OrderStore};
use greenridge_core::types::{CatalogItem, CategoryKey, ItemId, OrderId};

/// Error type shared by all mock collaborators.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{0}")]
pub struct MockError(pub &'static str);

/// A catalog backed by a fixed list of items.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<CatalogItem>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }
}

impl CatalogStore for StaticCatalog {
    type Error = MockError;

    async fn get_item(
        &self,
        category_key: &CategoryKey,
        id: &ItemId,
    ) -> Result<Option<CatalogItem>, MockError> {
        Ok(self
            .items
            .iter()
            .find(|item| &item.category_key == category_key && &item.id == id)
            .cloned())
    }

    async fn list_by_category(
        &self,
        category_key: &CategoryKey,
    ) -> Result<Vec<CatalogItem>, MockError> {
        Ok(self
            .items
            .iter()
            .filter(|item| &item.category_key == category_key)
            .cloned()
            .collect())
    }
}

/// A catalog whose every read fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingCatalog;

impl CatalogStore for FailingCatalog {
    type Error = MockError;

    async fn get_item(
        &self,
        _category_key: &CategoryKey,
        _id: &ItemId,
    ) -> Result<Option<CatalogItem>, MockError> {
        Err(MockError("catalog unavailable"))
    }

    async fn list_by_category(
        &self,
        _category_key: &CategoryKey,
    ) -> Result<Vec<CatalogItem>, MockError> {
        Err(MockError("catalog unavailable"))
    }
}

/// An order store that records every appended order.
///
/// Clones share the same backing list, so a test can keep one clone and
/// hand the other to the service under test.
#[derive(Debug, Clone, Default)]
pub struct RecordingOrderStore {
    orders: Arc<Mutex<Vec<Order>>>,
}

impl RecordingOrderStore {
    /// Orders appended so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the lock panicked.
    #[must_use]
    pub fn appended(&self) -> Vec<Order> {
        self.orders.lock().expect("order store lock").clone()
    }
}

impl OrderStore for RecordingOrderStore {
    type Error = MockError;

    async fn append(&self, order: &Order) -> Result<OrderId, MockError> {
        self.orders
            .lock()
            .expect("order store lock")
            .push(order.clone());
        Ok(order.id)
    }
}

/// An order store whose every append fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingOrderStore;

impl OrderStore for FailingOrderStore {
    type Error = MockError;

    async fn append(&self, _order: &Order) -> Result<OrderId, MockError> {
        Err(MockError("order store unavailable"))
    }
}

/// A notifier that records every message.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    /// Messages sent so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the lock panicked.
    #[must_use]
    pub fn sent(&self) -> Vec<String> {
        self.messages.lock().expect("notifier lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    type Error = MockError;

    async fn send(&self, message: &str) -> Result<(), MockError> {
        self.messages
            .lock()
            .expect("notifier lock")
            .push(message.to_owned());
        Ok(())
    }
}

/// A notifier whose every send fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    type Error = MockError;

    async fn send(&self, _message: &str) -> Result<(), MockError> {
        Err(MockError("notifier unavailable"))
    }
}
