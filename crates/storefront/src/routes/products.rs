//! Product catalog routes.
//!
//! Read-only JSON views of the catalog. Every price in a response is the
//! display price; base prices stay server-side.

use axum::Json;
use axum::extract::{Path, State};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use greenridge_core::pricing::display_price;
use greenridge_core::types::{CatalogItem, CategoryKey, ItemId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product data as the client sees it.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    /// Display price. The stored base price is never exposed.
    pub price: Decimal,
    pub category: String,
    pub category_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductView {
    /// Build the client view, pricing the item on the way out.
    ///
    /// The repository rejects negative base prices on read, so a pricing
    /// failure here means the catalog invariant broke underneath us.
    fn from_item(item: CatalogItem) -> Result<Self> {
        let price = display_price(item.base_price).map_err(|err| {
            AppError::Internal(format!(
                "catalog item {}/{}: {err}",
                item.category_key, item.id
            ))
        })?;

        Ok(Self {
            id: item.id.into_inner(),
            title: item.title,
            price,
            category: item.category,
            category_key: item.category_key.into_inner(),
            subcategory: item.subcategory,
            in_stock: item.in_stock,
            image_url: item.image_url,
            link: item.link,
            description: item.description,
        })
    }
}

/// List the whole catalog, every category in one flat list.
///
/// GET /products
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<ProductView>>> {
    let items = state.catalog().list_all().await?;

    let views = items
        .into_iter()
        .map(ProductView::from_item)
        .collect::<Result<Vec<_>>>()?;

    Ok(Json(views))
}

/// List one category. An unknown (but well-formed) category is an empty
/// list, not an error.
///
/// GET /products/{category}
#[instrument(skip(state))]
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<ProductView>>> {
    let key = CategoryKey::parse(&category)?;
    let items = state.catalog().list_by_category(&key).await?;

    let views = items
        .into_iter()
        .map(ProductView::from_item)
        .collect::<Result<Vec<_>>>()?;

    Ok(Json(views))
}

/// Product detail.
///
/// GET /products/{category}/{id}
///
/// 400 on a malformed category key, 404 when the item does not exist.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
) -> Result<Json<ProductView>> {
    let key = CategoryKey::parse(&category)?;
    let id = ItemId::new(id);

    let item = state
        .catalog()
        .get_item(&key, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {key}/{id}")))?;

    ProductView::from_item(item).map(Json)
}
