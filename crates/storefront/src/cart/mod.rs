//! The cart store.
//!
//! Owns the in-memory list of cart line items, validates every mutation
//! against remote stock, and persists the full cart after each successful
//! mutation. All mutations serialize through a single async mutex: two rapid
//! add clicks queue up instead of reading the same snapshot and silently
//! dropping an increment.
//!
//! Failure paths never touch the cart or the storage file. Each operation
//! builds its next snapshot on a working copy and only commits it after the
//! persistence write succeeds.

pub mod error;
pub mod storage;

use std::sync::Arc;

use rocket_shoes_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::instrument;

use crate::catalog::{CatalogClient, Product};

pub use error::{CartError, CartOp, messages};
pub use storage::{CART_STORAGE_KEY, CartStorage, JsonFileStorage, StorageError};

/// A product line in the cart: catalog data plus the in-cart quantity.
///
/// The serialized shape matches what the original client kept in
/// `localStorage`: `{ id, title, price, image, amount }` with `price` as a
/// plain number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog product ID, unique within the cart.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in BRL.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Product image URL.
    pub image: String,
    /// Quantity held in the cart, always >= 1.
    pub amount: i32,
}

impl CartItem {
    fn from_product(product: Product, amount: i32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
        }
    }

    /// Line subtotal: `price * amount`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }
}

/// Grand total over a cart snapshot.
#[must_use]
pub fn total(items: &[CartItem]) -> Decimal {
    items.iter().map(CartItem::subtotal).sum()
}

/// The cart store.
///
/// Holds the only mutable cart state in the process. Injected into handlers
/// through [`AppState`](crate::state::AppState) rather than reached through
/// a global.
pub struct CartStore {
    catalog: CatalogClient,
    storage: Arc<dyn CartStorage>,
    items: Mutex<Vec<CartItem>>,
}

impl CartStore {
    /// Create a store, loading the persisted cart snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file exists but cannot be read.
    pub fn new(
        catalog: CatalogClient,
        storage: Arc<dyn CartStorage>,
    ) -> Result<Self, StorageError> {
        let items = storage.load()?;
        Ok(Self {
            catalog,
            storage,
            items: Mutex::new(items),
        })
    }

    /// Current cart snapshot.
    pub async fn items(&self) -> Vec<CartItem> {
        self.items.lock().await.clone()
    }

    /// Add one unit of a product to the cart.
    ///
    /// Fetches current stock first. If the product is already in the cart its
    /// quantity is incremented; otherwise the catalog product is fetched and
    /// appended with `amount = 1`. The stock check applies to both paths, so
    /// a product with zero stock cannot be inserted.
    ///
    /// # Errors
    ///
    /// [`CartError::OutOfStock`] when the new quantity would exceed stock;
    /// catalog or storage failures are passed through.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<Vec<CartItem>, CartError> {
        let mut items = self.items.lock().await;
        let mut next = items.clone();

        let stock = self.catalog.get_stock(product_id).await?;
        let current = next
            .iter()
            .find(|item| item.id == product_id)
            .map_or(0, |item| item.amount);
        let amount = current + 1;

        if amount > stock.amount {
            return Err(CartError::OutOfStock);
        }

        if let Some(item) = next.iter_mut().find(|item| item.id == product_id) {
            item.amount = amount;
        } else {
            let product = self.catalog.get_product(product_id).await?;
            next.push(CartItem::from_product(product, 1));
        }

        self.storage.save(&next)?;
        *items = next;
        Ok(items.clone())
    }

    /// Remove a product from the cart, keeping all other entries in order.
    ///
    /// # Errors
    ///
    /// [`CartError::NotInCart`] when no entry has the given ID.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Vec<CartItem>, CartError> {
        let mut items = self.items.lock().await;

        if !items.iter().any(|item| item.id == product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        let next: Vec<CartItem> = items
            .iter()
            .filter(|item| item.id != product_id)
            .cloned()
            .collect();

        self.storage.save(&next)?;
        *items = next;
        Ok(items.clone())
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// # Errors
    ///
    /// [`CartError::InvalidAmount`] when `amount <= 0` (checked before any
    /// network call), [`CartError::OutOfStock`] when `amount` exceeds stock,
    /// [`CartError::NotInCart`] when the product is absent.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_amount(
        &self,
        product_id: ProductId,
        amount: i32,
    ) -> Result<Vec<CartItem>, CartError> {
        if amount <= 0 {
            return Err(CartError::InvalidAmount(amount));
        }

        let mut items = self.items.lock().await;
        let mut next = items.clone();

        let stock = self.catalog.get_stock(product_id).await?;
        if amount > stock.amount {
            return Err(CartError::OutOfStock);
        }

        let Some(item) = next.iter_mut().find(|item| item.id == product_id) else {
            return Err(CartError::NotInCart(product_id));
        };
        item.amount = amount;

        self.storage.save(&next)?;
        *items = next;
        Ok(items.clone())
    }
}
