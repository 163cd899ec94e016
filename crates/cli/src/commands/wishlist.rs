//! Wishlist management commands.

use tracing::info;

use aurelia_core::ProductId;
use aurelia_storefront::StorefrontError;
use aurelia_storefront::catalog::{CatalogStore, Product};
use aurelia_storefront::config::StoreConfig;
use aurelia_storefront::storage::{self, FileStore};
use aurelia_storefront::wishlist::Wishlist;

fn open_wishlist() -> Result<(StoreConfig, FileStore, Wishlist), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let store = FileStore::new(&config.state_dir)?;
    let wishlist = storage::load_wishlist(&store)?;
    Ok((config, store, wishlist))
}

fn find_product<'a>(
    catalog: &'a CatalogStore,
    product_id: &str,
) -> Result<&'a Product, StorefrontError> {
    catalog
        .product(&ProductId::new(product_id))
        .ok_or_else(|| StorefrontError::NotFound(format!("product {product_id}")))
}

/// Add a product to the wishlist (no-op when already present).
pub fn add(product_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (config, store, mut wishlist) = open_wishlist()?;
    let catalog = super::load_catalog(&config)?;
    let product = find_product(&catalog, product_id)?;

    wishlist.add(product);
    storage::save_wishlist(&store, &wishlist)?;

    info!("Saved {} - {} item(s)", product.name, wishlist.len());
    Ok(())
}

/// Remove a product from the wishlist.
pub fn remove(product_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, store, mut wishlist) = open_wishlist()?;

    wishlist.remove(&ProductId::new(product_id));
    storage::save_wishlist(&store, &wishlist)?;

    info!("Removed {} - {} item(s) remain", product_id, wishlist.len());
    Ok(())
}

/// Toggle a product's membership.
pub fn toggle(product_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (config, store, mut wishlist) = open_wishlist()?;
    let catalog = super::load_catalog(&config)?;
    let product = find_product(&catalog, product_id)?;

    let present = wishlist.toggle(product);
    storage::save_wishlist(&store, &wishlist)?;

    if present {
        info!("Saved {}", product.name);
    } else {
        info!("Removed {}", product.name);
    }
    Ok(())
}

/// Show saved products.
pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, _store, wishlist) = open_wishlist()?;

    if wishlist.is_empty() {
        info!("Wishlist is empty");
        return Ok(());
    }

    for item in wishlist.items() {
        let stock = if item.in_stock { "" } else { " [out of stock]" };
        info!("  {} - {}{}", item.name, item.price, stock);
    }
    Ok(())
}
