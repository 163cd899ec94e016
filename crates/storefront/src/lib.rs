//! Aurelia Storefront - catalog, search, cart, and wishlist library.
//!
//! This crate is the in-process core of the Aurelia jewelry store. It has
//! no HTTP surface of its own; callers (the CLI, a web tier) drive it
//! directly:
//!
//! - [`catalog`] - static product/category reference data, loaded from a
//!   content directory or embedded seed data
//! - [`search`] - deterministic filter/search engine with facet counts and
//!   free-text filter inference
//! - [`cart`] - line items plus derived totals under the configured
//!   pricing policy
//! - [`wishlist`] - product-snapshot set with membership semantics
//! - [`storage`] - persistence port for cart/wishlist state
//! - [`remote`] - normalization boundary for untyped backend payloads
//! - [`checkout`] - order assembly and confirmation handling
//! - [`config`] - environment-driven configuration and the canonical
//!   pricing policy
//!
//! All operations run to completion synchronously on the calling thread;
//! there is no background work and no locking.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod remote;
pub mod search;
pub mod storage;
pub mod wishlist;

pub use error::{Result, StorefrontError};
