//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                   - Liveness check
//! GET    /health/ready             - Readiness check (DB probe)
//!
//! # Products
//! GET    /products                 - Full catalog across categories
//! GET    /products/{category}      - One category
//! GET    /products/{category}/{id} - Product detail
//!
//! # Cart
//! GET    /cart                     - Current cart view
//! DELETE /cart                     - Clear the cart
//! POST   /cart/items               - Add one unit of an item
//! PUT    /cart/items               - Set a line's quantity (0 removes)
//! DELETE /cart/items               - Remove a line
//!
//! # Checkout
//! POST   /checkout                 - Place an order from the session cart
//! ```

pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Catalog browsing routes.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{category}", get(products::by_category))
        .route("/{category}/{id}", get(products::show))
}

/// Session cart routes.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route(
            "/items",
            post(cart::add_item)
                .put(cart::update_item)
                .delete(cart::remove_item),
        )
}

/// The full storefront router, minus the health endpoints main adds.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::place_order))
}
