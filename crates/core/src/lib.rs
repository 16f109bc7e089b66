//! RocketShoes Core - Shared types library.
//!
//! This crate provides common types used across the RocketShoes components:
//! - `storefront` - Server-rendered storefront with the shopping cart
//! - `integration-tests` - End-to-end tests against a fake catalog API
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and price formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
