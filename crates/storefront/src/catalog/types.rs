//! Domain types for the catalog API.
//!
//! These mirror the JSON the API serves: prices are plain numbers, so the
//! decimal fields go through `rust_decimal::serde::float`.

use rocket_shoes_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as served by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in BRL.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Product image URL.
    pub image: String,
}

/// Stock level as served by `GET /stock/{id}`.
///
/// `amount` is the maximum purchasable quantity and is authoritative at the
/// moment it is fetched; it may change between checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Catalog product ID.
    pub id: ProductId,
    /// Units available for purchase.
    pub amount: i32,
}
