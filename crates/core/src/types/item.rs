//! Catalog item record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::CategoryKey;
use super::id::ItemId;

/// A sellable product record owned by the external catalog store.
///
/// Items are read-only from this crate's perspective: the catalog store is
/// the source of truth and nothing here ever writes one back. The `base_price`
/// is the stored wholesale figure; customers only ever see the marked-up
/// amount from [`crate::pricing::display_price`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Item identifier, unique within its category.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Stored base price before markup. Never shown to customers.
    pub base_price: Decimal,
    /// Human-readable category label (e.g. "Garden").
    pub category: String,
    /// URL-safe category slug; half of the cart line key.
    pub category_key: CategoryKey,
    /// Optional subcategory label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Whether the item is currently in stock.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Primary product image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// External reference link, used to enrich order notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Longer product description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Items default to in stock when the source record omits the flag.
const fn default_in_stock() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn garden_key() -> CategoryKey {
        CategoryKey::parse("garden").unwrap()
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{
            "id": "12",
            "title": "Folding trowel",
            "base_price": "7.50",
            "category": "Garden",
            "category_key": "garden"
        }"#;

        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, ItemId::new("12"));
        assert_eq!(item.category_key, garden_key());
        assert!(item.in_stock, "stock flag defaults to true");
        assert!(item.image_url.is_none());
        assert!(item.link.is_none());
    }

    #[test]
    fn test_deserialize_accepts_numeric_price() {
        let json = r#"{
            "id": "5",
            "title": "Trekking poles",
            "base_price": 45,
            "category": "Hiking",
            "category_key": "hiking",
            "in_stock": false
        }"#;

        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.base_price, Decimal::from(45));
        assert!(!item.in_stock);
    }

    #[test]
    fn test_serialize_omits_absent_optionals() {
        let item = CatalogItem {
            id: ItemId::new("3"),
            title: "Watering can".to_owned(),
            base_price: Decimal::from(12),
            category: "Garden".to_owned(),
            category_key: garden_key(),
            subcategory: None,
            in_stock: true,
            image_url: None,
            link: None,
            description: None,
        };

        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("image_url"));
        assert!(!json.contains("link"));
        assert!(!json.contains("subcategory"));
    }
}
