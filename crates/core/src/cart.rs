//! Shopping cart ledger.
//!
//! A [`Cart`] is an explicit, session-scoped object: callers own one per
//! session and persist it through whatever store they like (the storefront
//! uses its session layer). Lines are keyed by item id *and* category key,
//! because item ids are only unique within a category; two categories can
//! both carry an item `"7"` and the cart must keep them apart.
//!
//! The cart stores base prices and quantities only. Display prices are
//! computed at read time by the caller-supplied pricing function, so a
//! markup change takes effect on carts that predate it.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CatalogItem, CategoryKey, ItemId};

/// Composite key identifying a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub id: ItemId,
    pub category_key: CategoryKey,
}

impl LineKey {
    #[must_use]
    pub const fn new(id: ItemId, category_key: CategoryKey) -> Self {
        Self { id, category_key }
    }
}

/// One cart line: the composite key, the quantity, and a denormalized
/// snapshot of the item at the time it was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ItemId,
    pub category_key: CategoryKey,
    pub title: String,
    pub base_price: Decimal,
    pub quantity: u32,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CartLine {
    /// The composite key this line is stored under.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.id.clone(), self.category_key.clone())
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.id == key.id && self.category_key == key.category_key
    }
}

/// Rejected item on [`Cart::add_item`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidItemError {
    #[error("item has an empty id")]
    EmptyId,
    #[error("item has a negative base price: {0}")]
    NegativePrice(Decimal),
}

/// A persisted cart failed validation on restore.
///
/// Each variant carries the zero-based index of the offending line. The
/// whole cart is discarded, never partially repaired.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartRestoreError {
    #[error("line {index} has an empty item id")]
    MissingId { index: usize },
    #[error("line {index} has an empty category key")]
    MissingCategoryKey { index: usize },
    #[error("line {index} has zero quantity")]
    ZeroQuantity { index: usize },
    #[error("line {index} has a negative base price: {price}")]
    NegativePrice { index: usize, price: Decimal },
    #[error("line {index} duplicates the key of an earlier line")]
    DuplicateKey { index: usize },
}

/// Insertion-ordered cart.
///
/// Every line holds `quantity >= 1`; operations that would leave a
/// zero-quantity line remove it instead. Construction goes through
/// [`Cart::new`] plus the mutating operations, or [`Cart::restore`] for
/// previously persisted lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuilds a cart from persisted lines, validating every one.
    ///
    /// # Errors
    ///
    /// Returns the first [`CartRestoreError`] encountered: an empty id or
    /// category key, a zero quantity, a negative base price, or a
    /// duplicate `(id, category_key)` key. On error the caller should
    /// treat the persisted cart as corrupt and start empty.
    pub fn restore(lines: Vec<CartLine>) -> Result<Self, CartRestoreError> {
        let mut seen = HashSet::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            if line.id.is_empty() {
                return Err(CartRestoreError::MissingId { index });
            }
            if line.category_key.is_empty() {
                return Err(CartRestoreError::MissingCategoryKey { index });
            }
            if line.quantity == 0 {
                return Err(CartRestoreError::ZeroQuantity { index });
            }
            if line.base_price < Decimal::ZERO {
                return Err(CartRestoreError::NegativePrice {
                    index,
                    price: line.base_price,
                });
            }
            if !seen.insert(line.key()) {
                return Err(CartRestoreError::DuplicateKey { index });
            }
        }
        Ok(Self { lines })
    }

    /// Adds one unit of `item` to the cart.
    ///
    /// A line keyed by the item's `(id, category_key)` is incremented if
    /// present, otherwise appended with quantity 1 and a snapshot of the
    /// item's title, base price, category label, and image.
    ///
    /// # Errors
    ///
    /// Rejects items with an empty id or a negative base price.
    pub fn add_item(&mut self, item: &CatalogItem) -> Result<(), InvalidItemError> {
        if item.id.is_empty() {
            return Err(InvalidItemError::EmptyId);
        }
        if item.base_price < Decimal::ZERO {
            return Err(InvalidItemError::NegativePrice(item.base_price));
        }
        let key = LineKey::new(item.id.clone(), item.category_key.clone());
        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(&key)) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                id: item.id.clone(),
                category_key: item.category_key.clone(),
                title: item.title.clone(),
                base_price: item.base_price,
                quantity: 1,
                category: item.category.clone(),
                image_url: item.image_url.clone(),
            });
        }
        Ok(())
    }

    /// Removes the line with `key`. Absent keys are ignored.
    pub fn remove_item(&mut self, key: &LineKey) {
        self.lines.retain(|l| !l.matches(key));
    }

    /// Sets the quantity of the line with `key`.
    ///
    /// A quantity of 0 removes the line. Absent keys are ignored.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) {
        if quantity == 0 {
            self.remove_item(key);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(key)) {
            line.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Consumes the cart, returning its lines for persistence.
    #[must_use]
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sums `price_fn(base_price) × quantity` over all lines.
    ///
    /// `price_fn` is typically [`crate::pricing::display_price`]; keeping
    /// it a parameter keeps this module free of pricing policy.
    ///
    /// # Errors
    ///
    /// Propagates the first error `price_fn` returns.
    pub fn subtotal<E>(
        &self,
        mut price_fn: impl FnMut(Decimal) -> Result<Decimal, E>,
    ) -> Result<Decimal, E> {
        let mut sum = Decimal::ZERO;
        for line in &self.lines {
            sum += price_fn(line.base_price)? * Decimal::from(line.quantity);
        }
        Ok(sum)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pricing::display_price;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(id: &str, key: &str, base: &str) -> CatalogItem {
        CatalogItem {
            id: ItemId::new(id),
            title: format!("Item {id}"),
            base_price: d(base),
            category: "Garden".to_owned(),
            category_key: CategoryKey::parse(key).unwrap(),
            subcategory: None,
            in_stock: true,
            image_url: Some(format!("https://img.example/{id}.jpg")),
            link: None,
            description: None,
        }
    }

    fn key(id: &str, category_key: &str) -> LineKey {
        LineKey::new(ItemId::new(id), CategoryKey::parse(category_key).unwrap())
    }

    #[test]
    fn test_add_creates_line_with_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(&item("7", "garden", "12.50")).unwrap();

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 1);
        assert_eq!(lines[0].title, "Item 7");
        assert_eq!(lines[0].base_price, d("12.50"));
        assert_eq!(lines[0].category, "Garden");
        assert!(lines[0].image_url.is_some());
    }

    #[test]
    fn test_add_same_item_increments_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&item("7", "garden", "12.50")).unwrap();
        cart.add_item(&item("7", "garden", "12.50")).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_same_id_in_different_categories_are_separate_lines() {
        let mut cart = Cart::new();
        cart.add_item(&item("7", "garden", "12.50")).unwrap();
        cart.add_item(&item("7", "hiking", "80")).unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 2);
        cart.remove_item(&key("7", "garden"));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].category_key.as_str(), "hiking");
    }

    #[test]
    fn test_add_rejects_empty_id() {
        let mut cart = Cart::new();
        let err = cart.add_item(&item("", "garden", "5")).unwrap_err();
        assert_eq!(err, InvalidItemError::EmptyId);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_negative_price() {
        let mut cart = Cart::new();
        let err = cart.add_item(&item("7", "garden", "-1")).unwrap_err();
        assert_eq!(err, InvalidItemError::NegativePrice(d("-1")));
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&item("7", "garden", "5")).unwrap();
        cart.remove_item(&key("8", "garden"));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&item("7", "garden", "5")).unwrap();
        cart.set_quantity(&key("7", "garden"), 4);
        assert_eq!(cart.lines()[0].quantity, 4);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&item("7", "garden", "5")).unwrap();
        cart.set_quantity(&key("7", "garden"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_absent_key_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&item("7", "garden", "5")).unwrap();
        cart.set_quantity(&key("9", "garden"), 3);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&item("7", "garden", "5")).unwrap();
        cart.add_item(&item("8", "garden", "6")).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.add_item(&item("7", "garden", "5")).unwrap();
        cart.add_item(&item("7", "garden", "5")).unwrap();
        cart.add_item(&item("8", "hiking", "6")).unwrap();
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_subtotal_applies_price_fn_per_line() {
        let mut cart = Cart::new();
        // 5 doubles to 10, twice; 10 gets +20 = 30, once.
        cart.add_item(&item("7", "garden", "5")).unwrap();
        cart.add_item(&item("7", "garden", "5")).unwrap();
        cart.add_item(&item("8", "hiking", "10")).unwrap();

        let subtotal = cart.subtotal(display_price).unwrap();
        assert_eq!(subtotal, d("50"));
    }

    #[test]
    fn test_subtotal_propagates_pricing_error() {
        let lines = vec![CartLine {
            id: ItemId::new("7"),
            category_key: CategoryKey::parse("garden").unwrap(),
            title: "Trowel".to_owned(),
            base_price: d("5"),
            quantity: 1,
            category: "Garden".to_owned(),
            image_url: None,
        }];
        let cart = Cart::restore(lines).unwrap();
        let err: Result<Decimal, &str> = cart.subtotal(|_| Err("boom"));
        assert_eq!(err.unwrap_err(), "boom");
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&item("b", "garden", "5")).unwrap();
        cart.add_item(&item("a", "garden", "5")).unwrap();
        cart.add_item(&item("c", "hiking", "5")).unwrap();

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    // ====== restore validation ======

    fn valid_line(id: &str) -> CartLine {
        CartLine {
            id: ItemId::new(id),
            category_key: CategoryKey::parse("garden").unwrap(),
            title: format!("Item {id}"),
            base_price: d("5"),
            quantity: 1,
            category: "Garden".to_owned(),
            image_url: None,
        }
    }

    #[test]
    fn test_restore_accepts_valid_lines() {
        let cart = Cart::restore(vec![valid_line("1"), valid_line("2")]).unwrap();
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_restore_rejects_zero_quantity() {
        let mut bad = valid_line("2");
        bad.quantity = 0;
        let err = Cart::restore(vec![valid_line("1"), bad]).unwrap_err();
        assert_eq!(err, CartRestoreError::ZeroQuantity { index: 1 });
    }

    #[test]
    fn test_restore_rejects_empty_id() {
        let err = Cart::restore(vec![valid_line("")]).unwrap_err();
        assert_eq!(err, CartRestoreError::MissingId { index: 0 });
    }

    #[test]
    fn test_restore_rejects_empty_category_key() {
        // An empty key can only arrive through persisted data that skipped
        // CategoryKey::parse, which is exactly what restore guards against.
        let json = r#"{
            "id": "1", "category_key": "", "title": "x",
            "base_price": "5", "quantity": 1, "category": "Garden"
        }"#;
        let line: CartLine = serde_json::from_str(json).unwrap();
        let err = Cart::restore(vec![line]).unwrap_err();
        assert_eq!(err, CartRestoreError::MissingCategoryKey { index: 0 });
    }

    #[test]
    fn test_restore_rejects_negative_price() {
        let mut bad = valid_line("1");
        bad.base_price = d("-2");
        let err = Cart::restore(vec![bad]).unwrap_err();
        assert_eq!(
            err,
            CartRestoreError::NegativePrice {
                index: 0,
                price: d("-2")
            }
        );
    }

    #[test]
    fn test_restore_rejects_duplicate_keys() {
        let err = Cart::restore(vec![valid_line("1"), valid_line("1")]).unwrap_err();
        assert_eq!(err, CartRestoreError::DuplicateKey { index: 1 });
    }

    #[test]
    fn test_lines_survive_serde_round_trip() {
        let mut cart = Cart::new();
        cart.add_item(&item("7", "garden", "12.50")).unwrap();
        cart.add_item(&item("8", "hiking", "80")).unwrap();

        let json = serde_json::to_string(cart.lines()).unwrap();
        let lines: Vec<CartLine> = serde_json::from_str(&json).unwrap();
        let restored = Cart::restore(lines).unwrap();
        assert_eq!(restored, cart);
    }
}
