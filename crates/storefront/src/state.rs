//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::services::telegram::TelegramError;
use crate::services::{CatalogService, TelegramNotifier};

/// Everything the handlers share: config, the database pool, the cached
/// catalog, and the staff notifier.
///
/// Clones are an `Arc` bump, so axum can hand a copy to every request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    catalog: CatalogService,
    notifier: TelegramNotifier,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the Telegram HTTP client cannot be built.
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Result<Self, TelegramError> {
        let catalog = CatalogService::new(pool.clone());
        let notifier = TelegramNotifier::from_config(config.telegram.as_ref())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog,
                notifier,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Catalog reads, served through the in-memory cache.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    /// Notifier for new-order Telegram messages.
    #[must_use]
    pub fn notifier(&self) -> &TelegramNotifier {
        &self.inner.notifier
    }
}
