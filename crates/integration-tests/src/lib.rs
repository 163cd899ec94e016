//! Integration tests for Aurelia.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p aurelia-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `search_catalog` - Filter/search engine over the seed catalog
//! - `cart_checkout` - Cart totals through the checkout flow
//! - `persistence` - Cart/wishlist round-trips through the file store
//!
//! The helpers below build the shared fixtures: the embedded seed
//! catalog and the default pricing policy.

#![cfg_attr(not(test), forbid(unsafe_code))]

use aurelia_storefront::catalog::CatalogStore;
use aurelia_storefront::config::PricingPolicy;
use aurelia_storefront::search::SearchEngine;

/// The embedded seed catalog.
#[must_use]
pub fn seed_catalog() -> CatalogStore {
    CatalogStore::builtin()
}

/// A search engine over the seed catalog.
#[must_use]
pub fn seed_engine() -> SearchEngine {
    SearchEngine::new(seed_catalog())
}

/// The default pricing policy (8% tax, free shipping at 100.00,
/// 9.99 flat fee).
#[must_use]
pub fn default_policy() -> PricingPolicy {
    PricingPolicy::default()
}
