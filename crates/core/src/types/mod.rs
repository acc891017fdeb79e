//! Domain value types shared across the storefront.

mod category;
mod contact;
mod id;
mod item;

pub use category::{CategoryKey, CategoryKeyError};
pub use contact::{CustomerContact, SocialPlatform};
pub use id::{ItemId, OrderId};
pub use item::CatalogItem;
