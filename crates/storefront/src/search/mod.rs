//! Catalog filter/search engine.
//!
//! Given a free-text query and a structured filter set, produces a
//! filtered, sorted product list plus facet counts computed from the
//! filtered result and suggestion strings. The engine is a deterministic
//! pure function of its inputs and the catalog: an empty query with empty
//! filters yields the whole catalog (sorted if requested), and no input
//! produces an error.
//!
//! Free-text queries can also *infer* filters (category, subcategory,
//! price range) from phrases like "necklaces under $100"; explicit filter
//! fields always take precedence and inference only fills gaps.

mod infer;

use std::collections::{BTreeMap, HashSet};

use rust_decimal::{Decimal, dec};

use crate::catalog::{CatalogStore, Product};

/// Structured filter set. All fields are conjunctive (AND) filters; an
/// unset field imposes no constraint.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProductFilters {
    /// Category slug.
    pub category: Option<String>,
    /// Subcategory slug.
    pub subcategory: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    /// Accepted materials.
    pub materials: Option<Vec<String>>,
    /// Accepted colors.
    pub colors: Option<Vec<String>>,
    /// Accepted sizes. Only products that carry a size are subject to
    /// this filter.
    pub sizes: Option<Vec<String>>,
    /// Stock-flag equality.
    pub in_stock: Option<bool>,
    /// Minimum rating (inclusive).
    pub min_rating: Option<f32>,
    /// Accepted tags; any overlap matches.
    pub tags: Option<Vec<String>>,
    /// Sort order; `None` preserves catalog order.
    pub sort_by: Option<SortKey>,
}

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    PriceLow,
    PriceHigh,
    Rating,
    Newest,
    Bestseller,
}

impl SortKey {
    /// Parse from a URL or CLI parameter value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Self::Name),
            "price-low" => Some(Self::PriceLow),
            "price-high" => Some(Self::PriceHigh),
            "rating" => Some(Self::Rating),
            "newest" => Some(Self::Newest),
            "bestseller" => Some(Self::Bestseller),
            _ => None,
        }
    }

    /// Convert to the parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Newest => "newest",
            Self::Bestseller => "bestseller",
        }
    }
}

/// A fixed price bucket facet.
struct PriceBucket {
    label: &'static str,
    /// Inclusive lower bound.
    min: Decimal,
    /// Exclusive upper bound; `None` means unbounded.
    max: Option<Decimal>,
}

impl PriceBucket {
    fn contains(&self, price: Decimal) -> bool {
        price >= self.min && self.max.is_none_or(|max| price < max)
    }
}

/// The four fixed price buckets. Mutually exclusive half-open ranges, so
/// each product lands in exactly one bucket.
const PRICE_BUCKETS: [PriceBucket; 4] = [
    PriceBucket {
        label: "Under $50",
        min: dec!(0),
        max: Some(dec!(50)),
    },
    PriceBucket {
        label: "$50 - $100",
        min: dec!(50),
        max: Some(dec!(100)),
    },
    PriceBucket {
        label: "$100 - $200",
        min: dec!(100),
        max: Some(dec!(200)),
    },
    PriceBucket {
        label: "$200+",
        min: dec!(200),
        max: None,
    },
];

/// Rating thresholds; each count is computed independently against the
/// filtered set (the thresholds overlap by design).
const RATING_THRESHOLDS: [(f32, &str); 3] = [(2.0, "2+"), (3.0, "3+"), (4.0, "4+")];

/// Maximum number of suggestion strings returned per query.
const MAX_SUGGESTIONS: usize = 5;

/// One facet value with its count over the filtered result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// Facet groups computed from the *filtered* result set, not the full
/// catalog.
#[derive(Debug, Clone, Default)]
pub struct SearchFacets {
    pub materials: Vec<FacetCount>,
    pub colors: Vec<FacetCount>,
    pub sizes: Vec<FacetCount>,
    pub price_buckets: Vec<FacetCount>,
    pub ratings: Vec<FacetCount>,
}

impl SearchFacets {
    fn tally(products: &[&Product]) -> Self {
        let mut materials: BTreeMap<&str, usize> = BTreeMap::new();
        let mut colors: BTreeMap<&str, usize> = BTreeMap::new();
        let mut sizes: BTreeMap<&str, usize> = BTreeMap::new();

        for product in products {
            *materials.entry(product.material.as_str()).or_insert(0) += 1;
            *colors.entry(product.color.as_str()).or_insert(0) += 1;
            if let Some(size) = &product.size {
                *sizes.entry(size.as_str()).or_insert(0) += 1;
            }
        }

        let collect = |map: BTreeMap<&str, usize>| {
            map.into_iter()
                .map(|(value, count)| FacetCount {
                    value: value.to_owned(),
                    count,
                })
                .collect()
        };

        let price_buckets = PRICE_BUCKETS
            .iter()
            .map(|bucket| FacetCount {
                value: bucket.label.to_owned(),
                count: products
                    .iter()
                    .filter(|p| bucket.contains(p.price.amount))
                    .count(),
            })
            .collect();

        let ratings = RATING_THRESHOLDS
            .iter()
            .map(|&(threshold, label)| FacetCount {
                value: label.to_owned(),
                count: products.iter().filter(|p| p.rating >= threshold).count(),
            })
            .collect();

        Self {
            materials: collect(materials),
            colors: collect(colors),
            sizes: collect(sizes),
            price_buckets,
            ratings,
        }
    }
}

/// A search result: products, facets, the effective filters, and
/// suggestions. Recomputed on every query.
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// Filtered and (optionally) sorted products.
    pub products: Vec<Product>,
    /// Number of matching products.
    pub total_count: usize,
    /// Facets computed over `products`.
    pub facets: SearchFacets,
    /// The effective filters: explicit fields merged with any inferred
    /// from the free-text query.
    pub applied: ProductFilters,
    /// Up to five query-completion suggestions.
    pub suggestions: Vec<String>,
    /// The normalized (trimmed, lowercased) query.
    pub query: String,
}

/// The search engine over a loaded catalog.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    catalog: CatalogStore,
}

impl SearchEngine {
    /// Create an engine over the given catalog.
    #[must_use]
    pub const fn new(catalog: CatalogStore) -> Self {
        Self { catalog }
    }

    /// Run a search. Deterministic; never fails.
    #[must_use]
    pub fn search(&self, query: &str, filters: &ProductFilters) -> SearchResults {
        let query = query.trim().to_lowercase();
        let applied = infer::fill_from_query(&query, filters.clone(), &self.catalog);

        let mut matched: Vec<&Product> = self
            .catalog
            .products()
            .iter()
            .filter(|p| query.is_empty() || self.matches_text(p, &query))
            .filter(|p| matches_filters(p, &applied))
            .collect();

        if let Some(sort) = applied.sort_by {
            sort_products(&mut matched, sort);
        }

        let facets = SearchFacets::tally(&matched);
        let suggestions = self.suggestions(&query);

        SearchResults {
            total_count: matched.len(),
            products: matched.into_iter().cloned().collect(),
            facets,
            applied,
            suggestions,
            query,
        }
    }

    /// Whether the lowercased query appears in any searchable text field
    /// of the product, or in its resolved category/subcategory slug or
    /// display name.
    fn matches_text(&self, product: &Product, query: &str) -> bool {
        if product.name.to_lowercase().contains(query)
            || product.description.to_lowercase().contains(query)
            || product.material.to_lowercase().contains(query)
            || product.color.to_lowercase().contains(query)
            || product
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(query))
        {
            return true;
        }

        if let Some(category) = self.catalog.category_by_slug(&product.category)
            && (category.slug.contains(query) || category.name.to_lowercase().contains(query))
        {
            return true;
        }

        if let Some(slug) = &product.subcategory
            && let Some((_, sub)) = self.catalog.resolve_subcategory(slug)
            && (sub.slug.contains(query) || sub.name.to_lowercase().contains(query))
        {
            return true;
        }

        false
    }

    /// Collect up to [`MAX_SUGGESTIONS`] distinct suggestion strings, in
    /// priority order: product names starting with the query, then
    /// materials/colors containing it, tags containing it,
    /// category/subcategory names starting with it, and price-bucket
    /// labels containing it.
    fn suggestions(&self, query: &str) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }

        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut push = |s: &str, out: &mut Vec<String>, seen: &mut HashSet<String>| {
            if out.len() < MAX_SUGGESTIONS && seen.insert(s.to_lowercase()) {
                out.push(s.to_owned());
            }
        };

        for product in self.catalog.products() {
            if product.name.to_lowercase().starts_with(query) {
                push(&product.name, &mut out, &mut seen);
            }
        }
        for product in self.catalog.products() {
            if product.material.to_lowercase().contains(query) {
                push(&product.material, &mut out, &mut seen);
            }
            if product.color.to_lowercase().contains(query) {
                push(&product.color, &mut out, &mut seen);
            }
        }
        for product in self.catalog.products() {
            for tag in &product.tags {
                if tag.to_lowercase().contains(query) {
                    push(tag, &mut out, &mut seen);
                }
            }
        }
        for category in self.catalog.categories() {
            if category.name.to_lowercase().starts_with(query) {
                push(&category.name, &mut out, &mut seen);
            }
            for sub in &category.subcategories {
                if sub.name.to_lowercase().starts_with(query) {
                    push(&sub.name, &mut out, &mut seen);
                }
            }
        }
        for bucket in &PRICE_BUCKETS {
            if bucket.label.to_lowercase().contains(query) {
                push(bucket.label, &mut out, &mut seen);
            }
        }

        out
    }
}

/// Apply each structured filter as a hard AND, only when set.
fn matches_filters(product: &Product, filters: &ProductFilters) -> bool {
    if let Some(category) = &filters.category
        && product.category != *category
    {
        return false;
    }
    if let Some(subcategory) = &filters.subcategory
        && product.subcategory.as_deref() != Some(subcategory.as_str())
    {
        return false;
    }
    if let Some(min) = filters.min_price
        && product.price.amount < min
    {
        return false;
    }
    if let Some(max) = filters.max_price
        && product.price.amount > max
    {
        return false;
    }
    if let Some(materials) = &filters.materials
        && !materials.is_empty()
        && !materials.iter().any(|m| m.eq_ignore_ascii_case(&product.material))
    {
        return false;
    }
    if let Some(colors) = &filters.colors
        && !colors.is_empty()
        && !colors.iter().any(|c| c.eq_ignore_ascii_case(&product.color))
    {
        return false;
    }
    // The size test only applies to products that carry a size.
    if let Some(sizes) = &filters.sizes
        && !sizes.is_empty()
        && let Some(size) = &product.size
        && !sizes.iter().any(|s| s.eq_ignore_ascii_case(size))
    {
        return false;
    }
    if let Some(in_stock) = filters.in_stock
        && product.in_stock != in_stock
    {
        return false;
    }
    if let Some(min_rating) = filters.min_rating
        && product.rating < min_rating
    {
        return false;
    }
    if let Some(tags) = &filters.tags
        && !tags.is_empty()
        && !tags
            .iter()
            .any(|t| product.tags.iter().any(|pt| pt.eq_ignore_ascii_case(t)))
    {
        return false;
    }
    true
}

/// Stable sort by the given key. `Vec::sort_by` is stable, so products
/// that compare equal keep their relative catalog order.
fn sort_products(products: &mut [&Product], sort: SortKey) {
    match sort {
        SortKey::Name => {
            products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        SortKey::PriceLow => {
            products.sort_by(|a, b| a.price.amount.cmp(&b.price.amount));
        }
        SortKey::PriceHigh => {
            products.sort_by(|a, b| b.price.amount.cmp(&a.price.amount));
        }
        SortKey::Rating => {
            products.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        }
        SortKey::Newest => {
            products.sort_by_key(|p| !p.new_arrival);
        }
        SortKey::Bestseller => {
            products.sort_by_key(|p| !p.bestseller);
        }
    }
}
