//! Static catalog reference data: products, categories, subcategories.
//!
//! The catalog is loaded once at startup and shared immutably for the
//! lifetime of the session. It can be read from a content directory
//! (`products.json` + `categories.json`) or fall back to the embedded
//! seed data shipped with the crate.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use aurelia_core::{CategoryId, Money, ProductId, SubcategoryId};

/// Embedded seed catalog, used when no content directory is configured.
const SEED_PRODUCTS: &str = include_str!("../content/catalog/products.json");
const SEED_CATEGORIES: &str = include_str!("../content/catalog/categories.json");

/// A read-only catalog entry.
///
/// Immutable for the lifetime of a browsing session. Cart and wishlist
/// items copy the fields they need at add time rather than holding a
/// live reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub original_price: Option<Money>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Slug of the owning category.
    pub category: String,
    /// Slug of the owning subcategory, if any.
    #[serde(default)]
    pub subcategory: Option<String>,
    pub material: String,
    pub color: String,
    #[serde(default)]
    pub size: Option<String>,
    pub in_stock: bool,
    /// Average review rating, 0-5.
    pub rating: f32,
    pub review_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default)]
    pub new_arrival: bool,
}

/// A top-level catalog category with its ordered subcategories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Unique, URL-safe key.
    pub slug: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

/// A second-level grouping within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// Catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog io error: {0}")]
    Io(String),
    #[error("Catalog parse error: {0}")]
    Parse(String),
}

/// Catalog store that holds all reference data in memory.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    products: Arc<Vec<Product>>,
    categories: Arc<Vec<Category>>,
}

impl CatalogStore {
    /// Build a store from raw JSON documents.
    ///
    /// Entries that fail to parse are logged and skipped so one bad
    /// record does not take the whole catalog down.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if either document is not a JSON
    /// array.
    pub fn from_json(products_json: &str, categories_json: &str) -> Result<Self, CatalogError> {
        let products = parse_entries::<Product>(products_json, "product")
            .map_err(|e| CatalogError::Parse(format!("products: {e}")))?;
        let categories = parse_entries::<Category>(categories_json, "category")
            .map_err(|e| CatalogError::Parse(format!("categories: {e}")))?;

        Ok(Self {
            products: Arc::new(products),
            categories: Arc::new(categories),
        })
    }

    /// Load the catalog from a content directory containing
    /// `products.json` and `categories.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or parsed.
    pub fn load(content_dir: &Path) -> Result<Self, CatalogError> {
        let products_path = content_dir.join("products.json");
        let categories_path = content_dir.join("categories.json");

        let products_json = std::fs::read_to_string(&products_path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", products_path.display())))?;
        let categories_json = std::fs::read_to_string(&categories_path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", categories_path.display())))?;

        let store = Self::from_json(&products_json, &categories_json)?;
        tracing::info!(
            products = store.products.len(),
            categories = store.categories.len(),
            dir = %content_dir.display(),
            "Loaded catalog"
        );
        Ok(store)
    }

    /// The embedded seed catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_json(SEED_PRODUCTS, SEED_CATEGORIES).expect("embedded seed catalog is valid")
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories, in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    /// Look up a category by slug.
    #[must_use]
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// Look up a subcategory by slug, returning its parent category too.
    #[must_use]
    pub fn resolve_subcategory(&self, slug: &str) -> Option<(&Category, &Subcategory)> {
        self.categories.iter().find_map(|c| {
            c.subcategories
                .iter()
                .find(|s| s.slug == slug)
                .map(|s| (c, s))
        })
    }
}

/// Parse a JSON array entry by entry, skipping records that do not
/// deserialize.
fn parse_entries<T: serde::de::DeserializeOwned>(
    json: &str,
    kind: &str,
) -> Result<Vec<T>, serde_json::Error> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .filter_map(|entry| match T::deserialize(entry) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(error = %e, kind, "Skipping malformed catalog entry");
                None
            }
        })
        .collect())
}
