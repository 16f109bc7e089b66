//! Catalog API client.
//!
//! Thin `reqwest` client over the two read endpoints the cart needs:
//! `GET /products/{id}` and `GET /stock/{id}`. Product lookups are cached
//! via `moka` (5-minute TTL); stock is never cached, because stock
//! validation must see the freshest value the API will give us.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rocket_shoes_core::ProductId;
use thiserror::Error;
use tracing::{debug, instrument};

pub use types::{Product, Stock};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found upstream.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API answered with a non-success status.
    #[error("Unexpected status {0}: {1}")]
    Status(reqwest::StatusCode, String),
}

/// Client for the catalog API.
///
/// Cheaply cloneable; the HTTP client and cache live behind an `Arc`.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    product_cache: Cache<ProductId, Product>,
}

impl CatalogClient {
    /// Create a new catalog client for the given base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let product_cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                product_cache,
            }),
        }
    }

    /// Fetch a JSON document and deserialize it.
    async fn fetch<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}/{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status(
                status,
                body.chars().take(200).collect(),
            ));
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse catalog API response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        // Check cache
        if let Some(product) = self.inner.product_cache.get(&product_id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product: Product = self.fetch(&format!("products/{product_id}")).await?;

        self.inner
            .product_cache
            .insert(product_id, product.clone())
            .await;

        Ok(product)
    }

    /// Get the current stock level for a product.
    ///
    /// Never cached: quantity validation relies on fresh stock data.
    ///
    /// # Errors
    ///
    /// Returns an error if the stock entry is not found or the API request
    /// fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_stock(&self, product_id: ProductId) -> Result<Stock, CatalogError> {
        self.fetch(&format!("stock/{product_id}")).await
    }

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, product_id: ProductId) {
        self.inner.product_cache.invalidate(&product_id).await;
    }
}
