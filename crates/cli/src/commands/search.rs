//! Catalog search command.
//!
//! # Usage
//!
//! ```bash
//! aurelia search "necklaces under 150" --sort price-low
//! aurelia search gold --material 14k-gold --material gold-vermeil --in-stock
//! ```

use clap::Args;
use rust_decimal::Decimal;
use tracing::info;

use aurelia_storefront::config::StoreConfig;
use aurelia_storefront::search::{ProductFilters, SearchEngine, SortKey};

/// Search arguments. Repeatable flags (`--material`, `--color`, `--size`,
/// `--tag`) form membership filters; everything combines as AND.
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query; may also imply category and price filters
    /// ("rings under 500")
    #[arg(default_value = "")]
    pub query: String,

    /// Category slug
    #[arg(long)]
    pub category: Option<String>,

    /// Subcategory slug
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Inclusive minimum price
    #[arg(long)]
    pub min_price: Option<Decimal>,

    /// Inclusive maximum price
    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// Accepted material (repeatable)
    #[arg(long = "material")]
    pub materials: Vec<String>,

    /// Accepted color (repeatable)
    #[arg(long = "color")]
    pub colors: Vec<String>,

    /// Accepted size (repeatable)
    #[arg(long = "size")]
    pub sizes: Vec<String>,

    /// Only in-stock products
    #[arg(long)]
    pub in_stock: bool,

    /// Minimum rating (0-5)
    #[arg(long)]
    pub min_rating: Option<f32>,

    /// Accepted tag (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Sort order: name, price-low, price-high, rating, newest, bestseller
    #[arg(long)]
    pub sort: Option<String>,
}

impl SearchArgs {
    fn filters(&self) -> Result<ProductFilters, Box<dyn std::error::Error>> {
        let sort_by = match &self.sort {
            None => None,
            Some(raw) => Some(
                SortKey::parse(raw)
                    .ok_or_else(|| format!("unknown sort key: {raw}"))?,
            ),
        };

        let list = |values: &[String]| {
            if values.is_empty() {
                None
            } else {
                Some(values.to_vec())
            }
        };

        Ok(ProductFilters {
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            materials: list(&self.materials),
            colors: list(&self.colors),
            sizes: list(&self.sizes),
            in_stock: self.in_stock.then_some(true),
            min_rating: self.min_rating,
            tags: list(&self.tags),
            sort_by,
        })
    }
}

/// Run a search and log the results, facets, and suggestions.
pub fn run(args: &SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let catalog = super::load_catalog(&config)?;
    let engine = SearchEngine::new(catalog);

    let filters = args.filters()?;
    let results = engine.search(&args.query, &filters);

    info!("{} result(s) for \"{}\"", results.total_count, results.query);
    for product in &results.products {
        let stock = if product.in_stock {
            "in stock"
        } else {
            "out of stock"
        };
        info!(
            "  {} - {} [{} / {}] {:.1}* ({} reviews, {})",
            product.name,
            product.price,
            product.material,
            product.color,
            product.rating,
            product.review_count,
            stock
        );
    }

    info!("Facets:");
    for group in [
        ("material", &results.facets.materials),
        ("color", &results.facets.colors),
        ("size", &results.facets.sizes),
        ("price", &results.facets.price_buckets),
        ("rating", &results.facets.ratings),
    ] {
        let (name, counts) = group;
        for facet in counts.iter().filter(|f| f.count > 0) {
            info!("  {}: {} ({})", name, facet.value, facet.count);
        }
    }

    if !results.suggestions.is_empty() {
        info!("Suggestions: {}", results.suggestions.join(", "));
    }

    Ok(())
}
