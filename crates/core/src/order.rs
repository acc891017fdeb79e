//! Order records and assembly.
//!
//! An [`Order`] is assembled server-side from a cart snapshot: every unit
//! price is recomputed through the markup schedule and the totals are
//! derived from those, never taken from the client. A client-submitted
//! total, when present, is only ever *checked* against the recomputation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartLine;
use crate::pricing::display_price;
use crate::types::{CategoryKey, CustomerContact, ItemId, OrderId};

/// Shipping charge policy: orders at or above the threshold ship free,
/// everything below pays the flat cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    pub free_shipping_threshold: Decimal,
    pub flat_cost: Decimal,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::ONE_HUNDRED,
            flat_cost: Decimal::from(5),
        }
    }
}

impl ShippingPolicy {
    /// Shipping cost for a given subtotal.
    #[must_use]
    pub fn shipping_cost(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.flat_cost
        }
    }

    /// Totals for a given subtotal under this policy.
    #[must_use]
    pub fn totals(&self, subtotal: Decimal) -> OrderTotals {
        let shipping_cost = self.shipping_cost(subtotal);
        OrderTotals {
            subtotal,
            shipping_cost,
            total: subtotal + shipping_cost,
        }
    }
}

/// Subtotal, shipping, and grand total of an order or cart view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
}

/// One ordered item, frozen at placement time.
///
/// `unit_price` is the *display* price the customer saw; base prices never
/// leave the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub title: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub category: String,
    pub category_key: CategoryKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl OrderLine {
    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A placed order. `total == subtotal + shipping_cost` and
/// `subtotal == Σ unit_price × quantity` hold for every order built
/// through [`Order::assemble`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerContact,
    pub lines: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Why an order submission was rejected. Messages are user-facing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
    #[error("provide a phone number or a social media handle")]
    NoContactMethod,
    #[error("cart is empty")]
    EmptyOrder,
    #[error("line {index} has a negative price")]
    NegativePrice { index: usize },
    #[error("submitted total {submitted} does not match the computed total {computed}")]
    TotalMismatch {
        submitted: Decimal,
        computed: Decimal,
    },
}

impl Order {
    /// Assembles an order from a customer and a cart snapshot.
    ///
    /// Validates the customer (non-blank name, at least one contact
    /// method) and the snapshot (non-empty, no negative prices), then
    /// recomputes every unit price through the markup schedule and
    /// derives subtotal, shipping, and total under `policy`. When the
    /// client supplied `expected_total` it must equal the recomputed
    /// total. A fresh [`OrderId`] and timestamp are generated here; no
    /// side effects beyond that.
    ///
    /// # Errors
    ///
    /// Returns the first failed check as a [`ValidationError`].
    pub fn assemble(
        customer: CustomerContact,
        lines: &[CartLine],
        policy: &ShippingPolicy,
        expected_total: Option<Decimal>,
    ) -> Result<Self, ValidationError> {
        if customer.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if !customer.has_contact_method() {
            return Err(ValidationError::NoContactMethod);
        }
        if lines.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }

        let mut order_lines = Vec::with_capacity(lines.len());
        let mut subtotal = Decimal::ZERO;
        for (index, line) in lines.iter().enumerate() {
            let unit_price = display_price(line.base_price)
                .map_err(|_| ValidationError::NegativePrice { index })?;
            subtotal += unit_price * Decimal::from(line.quantity);
            order_lines.push(OrderLine {
                item_id: line.id.clone(),
                title: line.title.clone(),
                unit_price,
                quantity: line.quantity,
                category: line.category.clone(),
                category_key: line.category_key.clone(),
                image_url: line.image_url.clone(),
            });
        }

        let totals = policy.totals(subtotal);
        if let Some(submitted) = expected_total
            && submitted != totals.total
        {
            return Err(ValidationError::TotalMismatch {
                submitted,
                computed: totals.total,
            });
        }

        Ok(Self {
            id: OrderId::generate(),
            customer,
            lines: order_lines,
            subtotal: totals.subtotal,
            shipping_cost: totals.shipping_cost,
            total: totals.total,
            created_at: Utc::now(),
        })
    }
}
