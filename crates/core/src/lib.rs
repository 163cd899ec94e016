//! Aurelia Core - Shared types library.
//!
//! This crate provides common types used across all Aurelia components:
//! - `storefront` - Catalog, search, cart, and wishlist library
//! - `cli` - Command-line tools for browsing the catalog and managing a cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and monetary amounts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
