//! Catalog repository for database operations.
//!
//! Read-only: the products table is seeded and maintained out of band and
//! nothing in the storefront ever writes to it. Queries are runtime-checked
//! (`query_as`) so builds do not need a database.

use rust_decimal::Decimal;
use sqlx::PgPool;

use greenridge_core::types::{CatalogItem, CategoryKey, ItemId};

use super::RepositoryError;

/// Repository for catalog read operations.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

/// Raw product row; validated into a [`CatalogItem`] after fetching.
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: String,
    title: String,
    base_price: Decimal,
    category: String,
    category_key: String,
    subcategory: Option<String>,
    in_stock: bool,
    image_url: Option<String>,
    link: Option<String>,
    description: Option<String>,
}

impl ItemRow {
    fn into_item(self) -> Result<CatalogItem, RepositoryError> {
        if self.id.is_empty() {
            return Err(RepositoryError::DataCorruption(
                "empty item id in database".to_owned(),
            ));
        }
        if self.base_price < Decimal::ZERO {
            return Err(RepositoryError::DataCorruption(format!(
                "negative base price in database for item {}: {}",
                self.id, self.base_price
            )));
        }
        let category_key = CategoryKey::parse(&self.category_key).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid category key in database: {e}"))
        })?;

        Ok(CatalogItem {
            id: ItemId::new(self.id),
            title: self.title,
            base_price: self.base_price,
            category: self.category,
            category_key,
            subcategory: self.subcategory,
            in_stock: self.in_stock,
            image_url: self.image_url,
            link: self.link,
            description: self.description,
        })
    }
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get one item by its composite key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row does not
    /// validate into a catalog item.
    pub async fn get(
        &self,
        category_key: &CategoryKey,
        id: &ItemId,
    ) -> Result<Option<CatalogItem>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, title, base_price, category, category_key,
                   subcategory, in_stock, image_url, link, description
            FROM products
            WHERE category_key = $1 AND id = $2
            ",
        )
        .bind(category_key)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(ItemRow::into_item).transpose()
    }

    /// All items in one category, ordered by title.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored row does not
    /// validate into a catalog item.
    pub async fn list_by_category(
        &self,
        category_key: &CategoryKey,
    ) -> Result<Vec<CatalogItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, title, base_price, category, category_key,
                   subcategory, in_stock, image_url, link, description
            FROM products
            WHERE category_key = $1
            ORDER BY title
            ",
        )
        .bind(category_key)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ItemRow::into_item).collect()
    }

    /// Every item in the catalog, ordered by category then title.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored row does not
    /// validate into a catalog item.
    pub async fn list_all(&self) -> Result<Vec<CatalogItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, title, base_price, category, category_key,
                   subcategory, in_stock, image_url, link, description
            FROM products
            ORDER BY category_key, title
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ItemRow::into_item).collect()
    }
}
