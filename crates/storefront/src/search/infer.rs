//! Free-text filter inference.
//!
//! Scans a lowercased query for category/subcategory mentions and price
//! phrases ("under $50", "100 to 200", "50-100") and fills the
//! corresponding filter fields. Explicit filter fields always take
//! precedence; inference only fills gaps, and only the first matching
//! price pattern is honored per query.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use super::ProductFilters;
use crate::catalog::CatalogStore;

/// `A-B` or `A–B` numeric range.
static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*[-–]\s*(\d+(?:\.\d+)?)").expect("valid regex"));

/// `A to B` / `A and B` phrasing (covers "between A and B").
static SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d+(?:\.\d+)?)\s+(?:to|and)\s+(\d+(?:\.\d+)?)\b").expect("valid regex")
});

/// `under N` / `below N` / `less than N` phrasing.
static MAX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:under|below|less than)\s+(\d+(?:\.\d+)?)").expect("valid regex")
});

/// `over N` / `above N` / `more than N` phrasing.
static MIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:over|above|more than)\s+(\d+(?:\.\d+)?)").expect("valid regex")
});

/// Merge filters inferred from the query into `filters`, without
/// overriding any explicitly set field. `query` must already be trimmed
/// and lowercased.
pub(super) fn fill_from_query(
    query: &str,
    mut filters: ProductFilters,
    catalog: &CatalogStore,
) -> ProductFilters {
    if query.is_empty() {
        return filters;
    }

    if filters.category.is_none()
        && let Some(category) = catalog
            .categories()
            .iter()
            .find(|c| query.contains(&c.slug) || query.contains(&c.name.to_lowercase()))
    {
        filters.category = Some(category.slug.clone());
    }

    if filters.subcategory.is_none() {
        if let Some(slug) = &filters.category {
            // A category is known: only its own subcategories qualify.
            if let Some(category) = catalog.category_by_slug(slug)
                && let Some(sub) = category
                    .subcategories
                    .iter()
                    .find(|s| query.contains(&s.slug) || query.contains(&s.name.to_lowercase()))
            {
                filters.subcategory = Some(sub.slug.clone());
            }
        } else {
            // No category at all: the first subcategory mention sets both.
            'scan: for category in catalog.categories() {
                for sub in &category.subcategories {
                    if query.contains(&sub.slug) || query.contains(&sub.name.to_lowercase()) {
                        filters.category = Some(category.slug.clone());
                        filters.subcategory = Some(sub.slug.clone());
                        break 'scan;
                    }
                }
            }
        }
    }

    if (filters.min_price.is_none() || filters.max_price.is_none())
        && let Some((min, max)) = parse_price_phrase(query)
    {
        if filters.min_price.is_none() {
            filters.min_price = min;
        }
        if filters.max_price.is_none() {
            filters.max_price = max;
        }
    }

    filters
}

/// Parse one price constraint from a query, first matching pattern wins.
///
/// Currency symbols and thousands separators are stripped before the
/// patterns are tried. Returns `(min, max)` bounds.
pub(super) fn parse_price_phrase(query: &str) -> Option<(Option<Decimal>, Option<Decimal>)> {
    let cleaned: String = query
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ','))
        .collect();

    if let Some(caps) = RANGE_RE.captures(&cleaned) {
        return Some((group_decimal(&caps, 1), group_decimal(&caps, 2)));
    }
    if let Some(caps) = SPAN_RE.captures(&cleaned) {
        return Some((group_decimal(&caps, 1), group_decimal(&caps, 2)));
    }
    if let Some(caps) = MAX_RE.captures(&cleaned) {
        return Some((None, group_decimal(&caps, 1)));
    }
    if let Some(caps) = MIN_RE.captures(&cleaned) {
        return Some((group_decimal(&caps, 1), None));
    }
    None
}

fn group_decimal(caps: &regex::Captures<'_>, index: usize) -> Option<Decimal> {
    caps.get(index)?.as_str().parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn catalog() -> CatalogStore {
        CatalogStore::builtin()
    }

    #[test]
    fn test_dash_range() {
        let (min, max) = parse_price_phrase("rings 50-100").unwrap();
        assert_eq!(min, Some(dec!(50)));
        assert_eq!(max, Some(dec!(100)));
    }

    #[test]
    fn test_en_dash_range_with_currency_symbols() {
        let (min, max) = parse_price_phrase("$1,000 – $2,500").unwrap();
        assert_eq!(min, Some(dec!(1000)));
        assert_eq!(max, Some(dec!(2500)));
    }

    #[test]
    fn test_to_and_between_phrasings() {
        let (min, max) = parse_price_phrase("100 to 200").unwrap();
        assert_eq!(min, Some(dec!(100)));
        assert_eq!(max, Some(dec!(200)));

        let (min, max) = parse_price_phrase("between 50 and 150").unwrap();
        assert_eq!(min, Some(dec!(50)));
        assert_eq!(max, Some(dec!(150)));
    }

    #[test]
    fn test_under_and_over_phrasings() {
        let (min, max) = parse_price_phrase("earrings under $50").unwrap();
        assert_eq!(min, None);
        assert_eq!(max, Some(dec!(50)));

        let (min, max) = parse_price_phrase("less than 75.50").unwrap();
        assert_eq!(min, None);
        assert_eq!(max, Some(dec!(75.50)));

        let (min, max) = parse_price_phrase("over 1,000").unwrap();
        assert_eq!(min, Some(dec!(1000)));
        assert_eq!(max, None);

        let (min, max) = parse_price_phrase("more than 200").unwrap();
        assert_eq!(min, Some(dec!(200)));
        assert_eq!(max, None);
    }

    #[test]
    fn test_first_pattern_wins() {
        // A dash range outranks the "under" phrasing in the same query.
        let (min, max) = parse_price_phrase("50-100 under 30").unwrap();
        assert_eq!(min, Some(dec!(50)));
        assert_eq!(max, Some(dec!(100)));
    }

    #[test]
    fn test_no_price_phrase() {
        assert!(parse_price_phrase("gold necklace").is_none());
        // Hyphenated words do not parse as ranges.
        assert!(parse_price_phrase("rose-gold ring").is_none());
    }

    #[test]
    fn test_category_inference_from_name() {
        let filters = fill_from_query("gold necklaces", ProductFilters::default(), &catalog());
        assert_eq!(filters.category.as_deref(), Some("necklaces"));
        assert_eq!(filters.subcategory, None);
    }

    #[test]
    fn test_subcategory_inference_sets_parent_category() {
        let filters = fill_from_query("engagement rings", ProductFilters::default(), &catalog());
        // "rings" matches the category first, then "engagement rings"
        // matches a subcategory by display name within it.
        assert_eq!(filters.category.as_deref(), Some("rings"));
        assert_eq!(filters.subcategory.as_deref(), Some("engagement-rings"));
    }

    #[test]
    fn test_bare_subcategory_mention_sets_both() {
        let filters = fill_from_query("pendants", ProductFilters::default(), &catalog());
        assert_eq!(filters.category.as_deref(), Some("necklaces"));
        assert_eq!(filters.subcategory.as_deref(), Some("pendants"));
    }

    #[test]
    fn test_explicit_filters_take_precedence() {
        let explicit = ProductFilters {
            category: Some("bracelets".to_owned()),
            max_price: Some(dec!(500)),
            ..ProductFilters::default()
        };
        let filters = fill_from_query("necklaces under 100", explicit, &catalog());
        assert_eq!(filters.category.as_deref(), Some("bracelets"));
        assert_eq!(filters.max_price, Some(dec!(500)));
        // The unset min bound is still fillable (here the phrase has none).
        assert_eq!(filters.min_price, None);
    }

    #[test]
    fn test_inference_fills_price_gap() {
        let filters = fill_from_query("rings under 400", ProductFilters::default(), &catalog());
        assert_eq!(filters.category.as_deref(), Some("rings"));
        assert_eq!(filters.max_price, Some(dec!(400)));
        assert_eq!(filters.min_price, None);
    }
}
