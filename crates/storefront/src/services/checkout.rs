//! Order placement.
//!
//! `CheckoutService` drives the whole flow: validate and price the
//! submitted cart, persist the order, then notify staff. Persistence is
//! the point of no return; everything after it is best-effort and can
//! only degrade the notification, never the order.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use greenridge_core::cart::CartLine;
use greenridge_core::order::{Order, ShippingPolicy, ValidationError};
use greenridge_core::stores::{CatalogStore, Notifier, OrderStore};
use greenridge_core::types::CustomerContact;

use crate::error::add_breadcrumb;
use crate::services::summary::compose_order_summary;

/// Why an order could not be placed.
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// The submission failed validation. Nothing was written.
    #[error(transparent)]
    Rejected(#[from] ValidationError),

    /// The order could not be written to the store.
    #[error("failed to persist order: {0}")]
    Persistence(String),
}

/// Checkout over pluggable collaborators.
///
/// Generic over the catalog, order store, and notifier so the flow can be
/// exercised end to end without Postgres or Telegram.
pub struct CheckoutService<C, O, N> {
    catalog: C,
    orders: O,
    notifier: N,
    policy: ShippingPolicy,
}

impl<C, O, N> CheckoutService<C, O, N>
where
    C: CatalogStore,
    O: OrderStore,
    N: Notifier,
{
    /// Wire a checkout flow to its collaborators.
    pub const fn new(catalog: C, orders: O, notifier: N, policy: ShippingPolicy) -> Self {
        Self {
            catalog,
            orders,
            notifier,
            policy,
        }
    }

    /// Place an order for the given cart.
    ///
    /// Prices and totals are computed here from the catalog prices baked
    /// into the cart lines; `expected_total` is only checked against the
    /// result, never trusted. On success the order has been persisted and
    /// a staff notification attempted.
    ///
    /// # Errors
    ///
    /// [`PlaceOrderError::Rejected`] when validation fails (no side
    /// effects), [`PlaceOrderError::Persistence`] when the order store
    /// write fails (no notification is sent).
    #[instrument(skip_all, fields(lines = lines.len()))]
    pub async fn place_order(
        &self,
        customer: CustomerContact,
        lines: &[CartLine],
        expected_total: Option<Decimal>,
    ) -> Result<Order, PlaceOrderError> {
        let order = Order::assemble(customer, lines, &self.policy, expected_total)?;

        self.orders
            .append(&order)
            .await
            .map_err(|err| PlaceOrderError::Persistence(err.to_string()))?;

        let order_id = order.id.to_string();
        info!(order_id = %order_id, total = %order.total, "Order persisted");
        add_breadcrumb("checkout", "Order persisted", Some(&[("order_id", &order_id)]));

        let links = self.resolve_links(&order).await;
        let summary = compose_order_summary(&order, &links);

        // The order is already saved; a lost notification is logged and
        // swallowed so the customer still sees success.
        if let Err(err) = self.notifier.send(&summary).await {
            warn!(order_id = %order_id, error = %err, "Order notification failed");
            add_breadcrumb(
                "checkout",
                "Order notification failed",
                Some(&[("order_id", &order_id)]),
            );
        }

        Ok(order)
    }

    /// Look up a product link for each order line, in line order.
    ///
    /// Lookups are best-effort: a missing item or a failed read yields
    /// `None` for that line and the summary falls back to plain text.
    async fn resolve_links(&self, order: &Order) -> Vec<Option<String>> {
        let mut links = Vec::with_capacity(order.lines.len());

        for line in &order.lines {
            let link = match self.catalog.get_item(&line.category_key, &line.item_id).await {
                Ok(Some(item)) => item.link,
                Ok(None) => None,
                Err(err) => {
                    debug!(
                        item_id = %line.item_id,
                        category_key = %line.category_key,
                        error = %err,
                        "Link lookup failed, leaving item unlinked"
                    );
                    None
                }
            };
            links.push(link);
        }

        links
    }
}
