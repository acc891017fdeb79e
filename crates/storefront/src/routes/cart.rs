//! Cart route handlers.
//!
//! The cart lives in the session; every mutating handler loads it,
//! applies one operation, and writes it back before responding. All
//! handlers return the updated cart view so the client never has to
//! recompute prices.

use axum::Json;
use axum::extract::State;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use greenridge_core::cart::{Cart, LineKey};
use greenridge_core::order::{OrderTotals, ShippingPolicy};
use greenridge_core::pricing::display_price;
use greenridge_core::types::{CategoryKey, ItemId};

use crate::error::{AppError, Result};
use crate::session::{load_cart, save_cart};
use crate::state::AppState;

/// One cart line as the client sees it.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub id: String,
    pub category_key: String,
    pub title: String,
    /// Display price per unit.
    pub price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Cart view with totals under the configured shipping policy.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub item_count: u64,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
}

impl CartView {
    /// Price every line and roll up the totals.
    fn from_cart(cart: &Cart, policy: &ShippingPolicy) -> Result<Self> {
        let mut items = Vec::with_capacity(cart.lines().len());
        let mut subtotal = Decimal::ZERO;

        for line in cart.lines() {
            // Restored carts are validated, so a pricing failure here
            // means a negative price slipped past restore.
            let price = display_price(line.base_price).map_err(|err| {
                AppError::Internal(format!("cart line {}/{}: {err}", line.category_key, line.id))
            })?;
            let line_total = price * Decimal::from(line.quantity);
            subtotal += line_total;

            items.push(CartLineView {
                id: line.id.as_str().to_owned(),
                category_key: line.category_key.as_str().to_owned(),
                title: line.title.clone(),
                price,
                quantity: line.quantity,
                line_total,
                category: line.category.clone(),
                image_url: line.image_url.clone(),
            });
        }

        // Shipping applies to orders, not to an empty cart.
        let totals = if cart.is_empty() {
            OrderTotals {
                subtotal: Decimal::ZERO,
                shipping_cost: Decimal::ZERO,
                total: Decimal::ZERO,
            }
        } else {
            policy.totals(subtotal)
        };

        Ok(Self {
            items,
            item_count: cart.item_count(),
            subtotal: totals.subtotal,
            shipping_cost: totals.shipping_cost,
            total: totals.total,
        })
    }
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub category_key: String,
    pub id: String,
}

/// Quantity update request body. A quantity of zero removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub category_key: String,
    pub id: String,
    pub quantity: u32,
}

/// Remove-line request body.
#[derive(Debug, Deserialize)]
pub struct RemoveItemRequest {
    pub category_key: String,
    pub id: String,
}

/// Write the cart back to the session, mapping session failures to a 500.
async fn persist(session: &Session, cart: &Cart) -> Result<()> {
    save_cart(session, cart)
        .await
        .map_err(|err| AppError::Internal(format!("failed to persist cart: {err}")))
}

/// Current cart.
///
/// GET /cart
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await;
    CartView::from_cart(&cart, &state.config().shipping).map(Json)
}

/// Add one unit of an item.
///
/// POST /cart/items
///
/// The item is fetched from the catalog server-side; clients never send
/// prices. 404 when the item does not exist.
#[instrument(skip(state, session))]
pub async fn add_item(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<CartView>> {
    let key = CategoryKey::parse(&body.category_key)?;
    let id = ItemId::new(body.id);

    let item = state
        .catalog()
        .get_item(&key, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {key}/{id}")))?;

    let mut cart = load_cart(&session).await;
    cart.add_item(&item)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;
    persist(&session, &cart).await?;

    CartView::from_cart(&cart, &state.config().shipping).map(Json)
}

/// Set a line's quantity. Zero removes the line; an absent line is left
/// alone rather than invented.
///
/// PUT /cart/items
#[instrument(skip(state, session))]
pub async fn update_item(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<UpdateItemRequest>,
) -> Result<Json<CartView>> {
    let key = LineKey::new(ItemId::new(body.id), CategoryKey::parse(&body.category_key)?);

    let mut cart = load_cart(&session).await;
    cart.set_quantity(&key, body.quantity);
    persist(&session, &cart).await?;

    CartView::from_cart(&cart, &state.config().shipping).map(Json)
}

/// Remove a line.
///
/// DELETE /cart/items
#[instrument(skip(state, session))]
pub async fn remove_item(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RemoveItemRequest>,
) -> Result<Json<CartView>> {
    let key = LineKey::new(ItemId::new(body.id), CategoryKey::parse(&body.category_key)?);

    let mut cart = load_cart(&session).await;
    cart.remove_item(&key);
    persist(&session, &cart).await?;

    CartView::from_cart(&cart, &state.config().shipping).map(Json)
}

/// Empty the cart.
///
/// DELETE /cart
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = Cart::new();
    persist(&session, &cart).await?;

    CartView::from_cart(&cart, &state.config().shipping).map(Json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use greenridge_core::types::{CatalogItem, CategoryKey, ItemId};

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(id: &str, base: &str) -> CatalogItem {
        CatalogItem {
            id: ItemId::new(id),
            title: format!("Item {id}"),
            base_price: d(base),
            category: "Garden".to_owned(),
            category_key: CategoryKey::parse("garden").unwrap(),
            subcategory: None,
            in_stock: true,
            image_url: None,
            link: None,
            description: None,
        }
    }

    #[test]
    fn test_empty_cart_view_has_zero_totals() {
        let view = CartView::from_cart(&Cart::new(), &ShippingPolicy::default()).unwrap();
        assert!(view.items.is_empty());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.subtotal, Decimal::ZERO);
        assert_eq!(view.shipping_cost, Decimal::ZERO);
        assert_eq!(view.total, Decimal::ZERO);
    }

    #[test]
    fn test_view_prices_lines_and_charges_flat_shipping() {
        let mut cart = Cart::new();
        // base 5 doubles to 10 per unit
        cart.add_item(&item("7", "5")).unwrap();
        cart.add_item(&item("7", "5")).unwrap();

        let view = CartView::from_cart(&cart, &ShippingPolicy::default()).unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].price, d("10"));
        assert_eq!(view.items[0].line_total, d("20"));
        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, d("20"));
        assert_eq!(view.shipping_cost, d("5"));
        assert_eq!(view.total, d("25"));
    }

    #[test]
    fn test_view_ships_free_at_threshold() {
        let mut cart = Cart::new();
        // base 41 -> display 71, twice: subtotal 142
        cart.add_item(&item("9", "41")).unwrap();
        cart.add_item(&item("9", "41")).unwrap();

        let view = CartView::from_cart(&cart, &ShippingPolicy::default()).unwrap();
        assert_eq!(view.subtotal, d("142"));
        assert_eq!(view.shipping_cost, Decimal::ZERO);
        assert_eq!(view.total, d("142"));
    }
}
