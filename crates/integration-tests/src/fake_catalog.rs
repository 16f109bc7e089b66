//! In-memory catalog API served over HTTP.
//!
//! Mimics the two read endpoints the cart consumes: `GET /products/{id}`
//! and `GET /stock/{id}`. Stock can be changed mid-test to simulate the
//! catalog moving underneath the cart.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tokio::sync::RwLock;

/// A fake catalog with mutable products and stock.
#[derive(Clone, Default)]
pub struct FakeCatalog {
    inner: Arc<RwLock<CatalogData>>,
}

#[derive(Default)]
struct CatalogData {
    products: HashMap<i32, Value>,
    stock: HashMap<i32, i32>,
}

impl FakeCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product with its stock amount.
    pub async fn insert(&self, id: i32, title: &str, price: f64, stock: i32) {
        let mut data = self.inner.write().await;
        data.products.insert(
            id,
            json!({
                "id": id,
                "title": title,
                "price": price,
                "image": format!("https://example.com/tenis{id}.jpg"),
            }),
        );
        data.stock.insert(id, stock);
    }

    /// Change the stock amount for a product.
    pub async fn set_stock(&self, id: i32, amount: i32) {
        self.inner.write().await.stock.insert(id, amount);
    }

    /// Serve the catalog on an ephemeral local port, returning its base URL.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn serve(&self) -> String {
        let app = Router::new()
            .route("/products/{id}", get(get_product))
            .route("/stock/{id}", get(get_stock))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind fake catalog listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Fake catalog server error");
        });

        format!("http://{addr}")
    }
}

async fn get_product(State(catalog): State<FakeCatalog>, Path(id): Path<i32>) -> Response {
    let data = catalog.inner.read().await;
    match data.products.get(&id) {
        Some(product) => Json(product.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_stock(State(catalog): State<FakeCatalog>, Path(id): Path<i32>) -> Response {
    let data = catalog.inner.read().await;
    match data.stock.get(&id) {
        Some(amount) => Json(json!({ "id": id, "amount": amount })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
