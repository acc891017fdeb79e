//! Business logic services for the storefront.
//!
//! - `catalog` - cached catalog reads over Postgres
//! - `checkout` - order validation, persistence, and staff notification
//! - `summary` - order summary text for the notification
//! - `telegram` - Telegram Bot API client

pub mod catalog;
pub mod checkout;
pub mod summary;
pub mod telegram;

pub use catalog::CatalogService;
pub use checkout::{CheckoutService, PlaceOrderError};
pub use telegram::TelegramNotifier;
