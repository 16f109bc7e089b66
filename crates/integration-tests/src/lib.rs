//! Integration tests for RocketShoes.
//!
//! The tests exercise the cart store and the cart routes against an
//! in-process fake catalog API served by axum on an ephemeral port, with
//! cart storage in a temporary directory.
//!
//! # Test Categories
//!
//! - `cart_store` - Store operations and persistence round-trips
//! - `cart_routes` - HTTP surface: page rendering and HTMX fragments

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fake_catalog;
