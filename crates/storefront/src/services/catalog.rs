//! Cached catalog reads.
//!
//! Wraps the catalog repository in a `moka` cache (5-minute TTL). The
//! catalog changes out of band and rarely, so every read path in the
//! storefront goes through here rather than straight to Postgres.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::{debug, instrument};

use greenridge_core::stores::CatalogStore;
use greenridge_core::types::{CatalogItem, CategoryKey, ItemId};

use crate::db::{CatalogRepository, RepositoryError};

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Item(Box<CatalogItem>),
    Items(Vec<CatalogItem>),
}

/// Catalog access with caching.
///
/// Cheap to clone; clones share the cache and the connection pool.
#[derive(Clone)]
pub struct CatalogService {
    inner: Arc<CatalogServiceInner>,
}

struct CatalogServiceInner {
    pool: PgPool,
    cache: Cache<String, CacheValue>,
}

impl CatalogService {
    /// Create a new catalog service over a connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogServiceInner { pool, cache }),
        }
    }

    /// Get one item by its composite key. Only found items are cached, so
    /// newly seeded products appear without waiting out the TTL.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the underlying query fails.
    #[instrument(skip(self), fields(category_key = %category_key, id = %id))]
    pub async fn get_item(
        &self,
        category_key: &CategoryKey,
        id: &ItemId,
    ) -> Result<Option<CatalogItem>, RepositoryError> {
        let cache_key = format!("item:{category_key}/{id}");

        if let Some(CacheValue::Item(item)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for item");
            return Ok(Some(*item));
        }

        let item = CatalogRepository::new(&self.inner.pool)
            .get(category_key, id)
            .await?;

        if let Some(ref item) = item {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Item(Box::new(item.clone())))
                .await;
        }

        Ok(item)
    }

    /// All items in one category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the underlying query fails.
    #[instrument(skip(self), fields(category_key = %category_key))]
    pub async fn list_by_category(
        &self,
        category_key: &CategoryKey,
    ) -> Result<Vec<CatalogItem>, RepositoryError> {
        let cache_key = format!("category:{category_key}");

        if let Some(CacheValue::Items(items)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category");
            return Ok(items);
        }

        let items = CatalogRepository::new(&self.inner.pool)
            .list_by_category(category_key)
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Items(items.clone()))
            .await;

        Ok(items)
    }

    /// The whole catalog, every category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the underlying query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<CatalogItem>, RepositoryError> {
        let cache_key = "catalog:all".to_string();

        if let Some(CacheValue::Items(items)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for full catalog");
            return Ok(items);
        }

        let items = CatalogRepository::new(&self.inner.pool).list_all().await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Items(items.clone()))
            .await;

        Ok(items)
    }
}

impl CatalogStore for CatalogService {
    type Error = RepositoryError;

    async fn get_item(
        &self,
        category_key: &CategoryKey,
        id: &ItemId,
    ) -> Result<Option<CatalogItem>, RepositoryError> {
        self.get_item(category_key, id).await
    }

    async fn list_by_category(
        &self,
        category_key: &CategoryKey,
    ) -> Result<Vec<CatalogItem>, RepositoryError> {
        self.list_by_category(category_key).await
    }
}
