//! Cart management commands.
//!
//! The cart is persisted under the configured state directory and
//! reloaded (with totals recomputed) before every operation, so each
//! invocation sees the last written snapshot.

use tracing::info;

use aurelia_core::ProductId;
use aurelia_storefront::StorefrontError;
use aurelia_storefront::cart::Cart;
use aurelia_storefront::config::StoreConfig;
use aurelia_storefront::storage::{self, FileStore};

fn open_cart() -> Result<(StoreConfig, FileStore, Cart), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let store = FileStore::new(&config.state_dir)?;
    let cart = storage::load_cart(&store, &config.pricing)?;
    Ok((config, store, cart))
}

/// Add a product to the cart.
pub fn add(product_id: &str, quantity: u32) -> Result<(), Box<dyn std::error::Error>> {
    let (config, store, mut cart) = open_cart()?;
    let catalog = super::load_catalog(&config)?;

    let id = ProductId::new(product_id);
    let product = catalog
        .product(&id)
        .ok_or_else(|| StorefrontError::NotFound(format!("product {product_id}")))?;

    cart.add(product, quantity);
    storage::save_cart(&store, &cart)?;

    info!(
        "Added {} x{} - {} item(s), total {}",
        product.name,
        quantity,
        cart.totals().item_count,
        cart.totals().total
    );
    Ok(())
}

/// Remove a product from the cart.
pub fn remove(product_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, store, mut cart) = open_cart()?;

    cart.remove(&ProductId::new(product_id));
    storage::save_cart(&store, &cart)?;

    info!(
        "Removed {} - {} item(s) remain",
        product_id,
        cart.totals().item_count
    );
    Ok(())
}

/// Set a line's quantity; zero removes the line.
pub fn update(product_id: &str, quantity: u32) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, store, mut cart) = open_cart()?;

    cart.update_quantity(&ProductId::new(product_id), quantity);
    storage::save_cart(&store, &cart)?;

    info!(
        "Updated {} to x{} - {} item(s), total {}",
        product_id,
        quantity,
        cart.totals().item_count,
        cart.totals().total
    );
    Ok(())
}

/// Show the cart contents and derived totals.
pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, _store, cart) = open_cart()?;

    if cart.is_empty() {
        info!("Cart is empty");
        return Ok(());
    }

    for item in cart.items() {
        info!(
            "  {} x{} @ {} = {}",
            item.name,
            item.quantity,
            item.price,
            item.line_total()
        );
    }

    let totals = cart.totals();
    info!("Subtotal: {}", totals.subtotal);
    info!("Tax:      {}", totals.tax);
    info!("Shipping: {}", totals.shipping);
    info!("Total:    {}", totals.total);
    Ok(())
}

/// Empty the cart.
pub fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let (_config, store, mut cart) = open_cart()?;

    cart.clear();
    storage::save_cart(&store, &cart)?;

    info!("Cart cleared");
    Ok(())
}
