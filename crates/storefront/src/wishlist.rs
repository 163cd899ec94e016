//! Wishlist: a product-snapshot set with membership semantics.
//!
//! Structurally a cart without quantities or pricing aggregation. A
//! product is either present once or absent; insertion order is
//! preserved for display.

use serde::{Deserialize, Serialize};

use aurelia_core::{Money, ProductId};

use crate::catalog::Product;

/// A saved product snapshot, captured at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub original_price: Option<Money>,
    #[serde(default)]
    pub image: Option<String>,
    pub material: String,
    pub color: String,
    pub in_stock: bool,
}

impl WishlistItem {
    /// Capture a snapshot of a product.
    #[must_use]
    pub fn snapshot(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            original_price: product.original_price,
            image: product.images.first().cloned(),
            material: product.material.clone(),
            color: product.color.clone(),
            in_stock: product.in_stock,
        }
    }
}

/// A set of product snapshots keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    /// An empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a product snapshot. Idempotent: adding a product that is
    /// already present is a no-op.
    pub fn add(&mut self, product: &Product) {
        if !self.contains(&product.id) {
            self.items.push(WishlistItem::snapshot(product));
        }
    }

    /// Remove a product. No-op when absent.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.items.retain(|item| item.product_id != *product_id);
    }

    /// Add the product if absent, remove it if present. Returns whether
    /// the product is in the wishlist afterwards.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.contains(&product.id) {
            self.remove(&product.id);
            false
        } else {
            self.add(product);
            true
        }
    }

    /// Whether the product is in the wishlist.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| item.product_id == *product_id)
    }

    /// Snapshots in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
