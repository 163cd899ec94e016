//! Catalog inspection commands.

use tracing::info;

use aurelia_storefront::config::StoreConfig;

/// List all products with price, stock, and rating.
pub fn list() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let catalog = super::load_catalog(&config)?;

    info!("{} product(s)", catalog.products().len());
    for product in catalog.products() {
        let stock = if product.in_stock { "" } else { " [out of stock]" };
        info!(
            "  {} - {} ({}/{}){}",
            product.id,
            product.price,
            product.category,
            product.subcategory.as_deref().unwrap_or("-"),
            stock
        );
    }
    Ok(())
}

/// List categories with their subcategories.
pub fn categories() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let catalog = super::load_catalog(&config)?;

    for category in catalog.categories() {
        info!("{} ({})", category.name, category.slug);
        for sub in &category.subcategories {
            info!("  {} ({})", sub.name, sub.slug);
        }
    }
    Ok(())
}
