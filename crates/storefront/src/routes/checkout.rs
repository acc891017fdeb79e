//! Checkout route.

use axum::Json;
use axum::extract::State;
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{instrument, warn};

use greenridge_core::cart::Cart;
use greenridge_core::order::Order;
use greenridge_core::types::CustomerContact;

use crate::db::OrderRepository;
use crate::error::Result;
use crate::services::CheckoutService;
use crate::session::{load_cart, save_cart};
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub customer: CustomerContact,
    /// Total the client displayed, cross-checked against the server's.
    #[serde(default)]
    pub expected_total: Option<Decimal>,
}

/// Place an order from the session cart.
///
/// POST /checkout
///
/// Totals are recomputed server-side from the cart's base prices; a
/// mismatching `expected_total` rejects with 422 and nothing is written.
/// On success the session cart is cleared and the order returned.
#[instrument(skip(state, session, body))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<Order>> {
    let cart = load_cart(&session).await;

    let checkout = CheckoutService::new(
        state.catalog().clone(),
        OrderRepository::new(state.pool()),
        state.notifier().clone(),
        state.config().shipping,
    );

    let order = checkout
        .place_order(body.customer, cart.lines(), body.expected_total)
        .await?;

    // The order is placed; failing to clear the cart must not undo that.
    if let Err(err) = save_cart(&session, &Cart::new()).await {
        warn!(order_id = %order.id, error = %err, "Failed to clear cart after checkout");
    }

    Ok(Json(order))
}
