//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart::{CartStore, JsonFileStorage, StorageError};
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog client and the cart store. The cart store is the only mutable
/// state in the process and is reached through this injection point, never
/// through a global.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: CartStore,
}

impl AppState {
    /// Create a new application state, loading the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart storage file exists but cannot be read.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let catalog = CatalogClient::new(&config.api_base_url);
        let storage = Arc::new(JsonFileStorage::new(config.storage_path.clone()));
        let cart = CartStore::new(catalog.clone(), storage)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }
}
