//! Session configuration and the session-backed cart.
//!
//! Sessions live in `PostgreSQL` via tower-sessions. The cart is stored
//! in the session as its raw lines and revalidated on every load; a cart
//! that fails validation is discarded wholesale rather than repaired.

use sqlx::PgPool;
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::warn;

use greenridge_core::cart::{Cart, CartLine};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "gr_session";

/// Session key the cart lines are stored under.
const CART_KEY: &str = "cart";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// Runs the store's own migrator, which creates the sessions table; the
/// application's sqlx migrations do not manage it.
///
/// # Errors
///
/// Returns the underlying `sqlx::Error` if the session table migration
/// fails.
pub async fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> Result<SessionManagerLayer<PostgresStore>, sqlx::Error> {
    let store = PostgresStore::new(pool.clone());
    store.migrate().await?;

    let layer = SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.use_secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/");

    Ok(layer)
}

/// Load the cart from the session.
///
/// Any failure yields an empty cart: a session read error, lines that no
/// longer deserialize, or lines that fail cart validation (empty ids,
/// zero quantities, duplicate keys). Partial carts are never kept.
pub async fn load_cart(session: &Session) -> Cart {
    let lines = match session.get::<Vec<CartLine>>(CART_KEY).await {
        Ok(Some(lines)) => lines,
        Ok(None) => return Cart::new(),
        Err(err) => {
            warn!(error = %err, "Stored cart is unreadable, starting empty");
            return Cart::new();
        }
    };

    match Cart::restore(lines) {
        Ok(cart) => cart,
        Err(err) => {
            warn!(error = %err, "Stored cart failed validation, starting empty");
            Cart::new()
        }
    }
}

/// Write the cart back to the session.
///
/// An empty cart removes the key entirely so stale lines cannot outlive
/// a cleared cart.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    if cart.is_empty() {
        session.remove_value(CART_KEY).await?;
        return Ok(());
    }
    session.insert(CART_KEY, cart.lines()).await
}
