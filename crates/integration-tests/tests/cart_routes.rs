//! HTTP surface tests: cart page rendering and HTMX fragments.

#![allow(clippy::unwrap_used)]

use std::net::SocketAddr;

use axum::Router;
use rocket_shoes_integration_tests::fake_catalog::FakeCatalog;
use rocket_shoes_storefront::config::StorefrontConfig;
use rocket_shoes_storefront::routes;
use rocket_shoes_storefront::state::AppState;

/// Serve the storefront against the given catalog, returning its base URL.
async fn spawn_storefront(catalog_url: String, dir: &tempfile::TempDir) -> String {
    let config = StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        api_base_url: catalog_url,
        storage_path: dir.path().join("storage.json"),
        sentry_dsn: None,
    };

    let state = AppState::new(config).expect("Failed to build app state");
    let app = Router::new().merge(routes::routes()).with_state(state);

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("Failed to bind storefront listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Storefront error");
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn empty_cart_page_renders_formatted_zero_total() {
    let catalog = FakeCatalog::new();
    let catalog_url = catalog.serve().await;
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_storefront(catalog_url, &dir).await;

    let html = reqwest::get(format!("{base}/cart"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("TOTAL"));
    assert!(html.contains("R$ 0,00"));
}

#[tokio::test]
async fn add_returns_cart_fragment_with_line_and_total() {
    let catalog = FakeCatalog::new();
    catalog
        .insert(1, "Tênis de Caminhada Leve Confortável", 179.9, 3)
        .await;
    let catalog_url = catalog.serve().await;
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_storefront(catalog_url, &dir).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{base}/cart/add"))
        .form(&[("product_id", "1")])
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("HX-Trigger")
            .and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );

    let html = response.text().await.unwrap();
    assert!(html.contains("Tênis de Caminhada Leve Confortável"));
    assert!(html.contains("R$ 179,90"));
}

#[tokio::test]
async fn out_of_stock_add_returns_toast_retargeted_at_toast_region() {
    let catalog = FakeCatalog::new();
    catalog.insert(1, "Tênis Esgotado", 99.9, 0).await;
    let catalog_url = catalog.serve().await;
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_storefront(catalog_url, &dir).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{base}/cart/add"))
        .form(&[("product_id", "1")])
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("HX-Retarget")
            .and_then(|v| v.to_str().ok()),
        Some("#toast")
    );

    let html = response.text().await.unwrap();
    assert!(html.contains("Quantidade solicitada fora de estoque"));
}

#[tokio::test]
async fn update_and_remove_round_trip_through_the_http_surface() {
    let catalog = FakeCatalog::new();
    catalog.insert(1, "Tênis 1", 10.0, 5).await;
    let catalog_url = catalog.serve().await;
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_storefront(catalog_url, &dir).await;

    let client = reqwest::Client::new();
    client
        .post(format!("{base}/cart/add"))
        .form(&[("product_id", "1")])
        .send()
        .await
        .unwrap();

    let html = client
        .post(format!("{base}/cart/update"))
        .form(&[("product_id", "1"), ("amount", "3")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("R$ 30,00"));

    let html = client
        .post(format!("{base}/cart/remove"))
        .form(&[("product_id", "1")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!html.contains("Tênis 1"));
    assert!(html.contains("R$ 0,00"));
}
