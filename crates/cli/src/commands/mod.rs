//! CLI subcommand implementations.

pub mod cart;
pub mod catalog;
pub mod search;
pub mod wishlist;

use aurelia_storefront::catalog::{CatalogError, CatalogStore};
use aurelia_storefront::config::StoreConfig;

/// Load the catalog from the configured content directory, or fall back
/// to the embedded seed data.
pub(crate) fn load_catalog(config: &StoreConfig) -> Result<CatalogStore, CatalogError> {
    match &config.content_dir {
        Some(dir) => CatalogStore::load(dir),
        None => Ok(CatalogStore::builtin()),
    }
}
