//! Catalog filtering and sorting.
//!
//! A [`CatalogQuery`] combines the four controls on the shop page (search
//! box, category sidebar, price dropdown and sort dropdown). Applying it with
//! [`filter_products`] yields the visible product list.
//!
//! Note that [`SortMode::Popular`] does not reorder anything: it drops every
//! product that is not flagged popular and keeps catalog order.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{ALL_CATEGORIES, Catalog, Product};
use crate::types::Price;

/// Errors from parsing query controls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Price bracket was neither `all` nor `min-max`.
    #[error("invalid price bracket: {0}")]
    InvalidPriceBracket(String),
    /// Sort mode was not one of `popular`, `low`, `high`, `alpha`.
    #[error("invalid sort mode: {0}")]
    InvalidSortMode(String),
}

/// Category selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// Exactly this category label.
    Only(String),
}

impl CategoryFilter {
    /// Whether `category` passes this filter.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    /// The label shown in the sidebar for this selection.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(s: &str) -> Self {
        if s.is_empty() || s == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(s.to_owned())
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive price range selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriceBracket {
    /// No price restriction.
    #[default]
    All,
    /// `min <= price <= max`.
    Range {
        /// Lower bound (inclusive).
        min: Price,
        /// Upper bound (inclusive).
        max: Price,
    },
}

impl PriceBracket {
    /// Whether `price` falls within the bracket.
    #[must_use]
    pub fn matches(&self, price: Price) -> bool {
        match self {
            Self::All => true,
            Self::Range { min, max } => *min <= price && price <= *max,
        }
    }
}

impl FromStr for PriceBracket {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "all" {
            return Ok(Self::All);
        }

        let invalid = || QueryError::InvalidPriceBracket(s.to_owned());
        let (min, max) = s.split_once('-').ok_or_else(invalid)?;
        let min = min.trim().parse::<i64>().map_err(|_| invalid())?;
        let max = max.trim().parse::<i64>().map_err(|_| invalid())?;

        Ok(Self::Range {
            min: Price::new(min),
            max: Price::new(max),
        })
    }
}

impl fmt::Display for PriceBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Range { min, max } => write!(f, "{}-{}", min.amount(), max.amount()),
        }
    }
}

/// Sort dropdown selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Popular products only, catalog order.
    #[default]
    Popular,
    /// Price ascending.
    Low,
    /// Price descending.
    High,
    /// Name, alphabetical.
    Alpha,
}

impl SortMode {
    /// Every mode in dropdown order.
    pub const ALL: [Self; 4] = [Self::Popular, Self::Low, Self::High, Self::Alpha];

    /// Form value for this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Low => "low",
            Self::High => "high",
            Self::Alpha => "alpha",
        }
    }

    /// Human-readable dropdown label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Popular => "Popular",
            Self::Low => "Price: Low to High",
            Self::High => "Price: High to Low",
            Self::Alpha => "Name: A to Z",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "popular" => Ok(Self::Popular),
            "low" => Ok(Self::Low),
            "high" => Ok(Self::High),
            "alpha" => Ok(Self::Alpha),
            other => Err(QueryError::InvalidSortMode(other.to_owned())),
        }
    }
}

/// The complete set of catalog controls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Free-text search.
    pub text: String,
    /// Category selection.
    pub category: CategoryFilter,
    /// Price bracket.
    pub price: PriceBracket,
    /// Sort mode.
    pub sort: SortMode,
}

impl CatalogQuery {
    /// Build a query from raw control values, applying defaults for missing ones.
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if the price bracket or sort mode is malformed.
    pub fn from_controls(
        text: Option<&str>,
        category: Option<&str>,
        price: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Self, QueryError> {
        Ok(Self {
            text: text.unwrap_or_default().to_owned(),
            category: CategoryFilter::from(category.unwrap_or(ALL_CATEGORIES)),
            price: price.map(str::parse::<PriceBracket>).transpose()?.unwrap_or_default(),
            sort: sort.map(str::parse::<SortMode>).transpose()?.unwrap_or_default(),
        })
    }

    /// Restore every control to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn matches(&self, needle: &str, product: &Product) -> bool {
        let matches_text = needle.is_empty()
            || product.name.to_lowercase().contains(needle)
            || product.category.to_lowercase().contains(needle);

        matches_text
            && self.category.matches(&product.category)
            && self.price.matches(product.price)
    }
}

/// Apply `query` to the catalog and return the visible products in order.
#[must_use]
pub fn filter_products<'a>(catalog: &'a Catalog, query: &CatalogQuery) -> Vec<&'a Product> {
    let needle = query.text.trim().to_lowercase();

    let mut list: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| query.matches(&needle, p))
        .collect();

    match query.sort {
        SortMode::Low => list.sort_by_key(|p| p.price),
        SortMode::High => list.sort_by(|a, b| b.price.cmp(&a.price)),
        SortMode::Alpha => list.sort_by(|a, b| locale_compare(&a.name, &b.name)),
        SortMode::Popular => list.retain(|p| p.popular),
    }

    tracing::debug!(
        text = %query.text,
        category = %query.category,
        price = %query.price,
        sort = %query.sort,
        results = list.len(),
        "Applied catalog filters"
    );

    list
}

/// Case-folded name comparison, falling back to the raw strings so the order
/// is total.
fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn names(list: &[&Product]) -> Vec<String> {
        list.iter().map(|p| p.name.clone()).collect()
    }

    fn query(text: &str, category: &str, price: &str, sort: &str) -> CatalogQuery {
        CatalogQuery::from_controls(Some(text), Some(category), Some(price), Some(sort)).unwrap()
    }

    #[test]
    fn test_alpha_with_no_filters_returns_everything_by_name() {
        let catalog = Catalog::seed();
        let list = filter_products(&catalog, &query("", "All", "all", "alpha"));

        assert_eq!(list.len(), catalog.len());
        assert_eq!(
            names(&list),
            vec![
                "Apple Watch Series 9",
                "Dell Inspiron 15",
                "HP Pavilion 14",
                "iPhone 14",
                "Logitech MX Master 3S",
                "MacBook Air M2",
                "Samsung Galaxy S23 Ultra",
                "Sony WH-1000XM5",
            ]
        );
    }

    #[test]
    fn test_popular_hides_non_popular_products() {
        let catalog = Catalog::seed();
        let list = filter_products(&catalog, &query("", "Accessories", "all", "popular"));

        assert!(list.iter().all(|p| p.popular));
        assert_eq!(names(&list), vec!["Sony WH-1000XM5"]);
    }

    #[test]
    fn test_popular_keeps_catalog_order() {
        let catalog = Catalog::seed();
        let list = filter_products(&catalog, &CatalogQuery::default());
        let ids: Vec<i32> = list.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 8]);
    }

    #[test]
    fn test_text_matches_name_or_category_case_insensitively() {
        let catalog = Catalog::seed();

        let by_name = filter_products(&catalog, &query("  GALAXY ", "All", "all", "alpha"));
        assert_eq!(names(&by_name), vec!["Samsung Galaxy S23 Ultra"]);

        let by_category = filter_products(&catalog, &query("smart", "All", "all", "alpha"));
        assert_eq!(names(&by_category), vec!["iPhone 14", "Samsung Galaxy S23 Ultra"]);
    }

    #[test]
    fn test_category_is_exact_match() {
        let catalog = Catalog::seed();
        let list = filter_products(&catalog, &query("", "laptop", "all", "alpha"));
        assert!(list.is_empty());

        let list = filter_products(&catalog, &query("", "Laptop", "all", "alpha"));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_price_bracket_is_inclusive() {
        let catalog = Catalog::seed();
        let list = filter_products(&catalog, &query("", "All", "12999-32999", "low"));
        assert_eq!(
            names(&list),
            vec!["Logitech MX Master 3S", "Sony WH-1000XM5", "Apple Watch Series 9"]
        );
    }

    #[test]
    fn test_high_sorts_descending() {
        let catalog = Catalog::seed();
        let list = filter_products(&catalog, &query("", "Laptop", "all", "high"));
        let prices: Vec<i64> = list.iter().map(|p| p.price.amount()).collect();
        assert_eq!(prices, vec![99_999, 55_999, 47_999]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = Catalog::seed();
        let list = filter_products(&catalog, &query("toaster", "All", "all", "alpha"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_parse_price_bracket() {
        assert_eq!("all".parse::<PriceBracket>(), Ok(PriceBracket::All));
        assert_eq!(
            "0-30000".parse::<PriceBracket>(),
            Ok(PriceBracket::Range {
                min: Price::new(0),
                max: Price::new(30_000)
            })
        );
        assert!(matches!(
            "cheap".parse::<PriceBracket>(),
            Err(QueryError::InvalidPriceBracket(_))
        ));
        assert!("10-".parse::<PriceBracket>().is_err());
    }

    #[test]
    fn test_parse_sort_mode() {
        for mode in SortMode::ALL {
            assert_eq!(mode.as_str().parse::<SortMode>(), Ok(mode));
        }
        assert!(matches!(
            "random".parse::<SortMode>(),
            Err(QueryError::InvalidSortMode(_))
        ));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut q = query("mac", "Laptop", "0-10", "high");
        q.reset();
        assert_eq!(q, CatalogQuery::default());
        assert_eq!(q.sort, SortMode::Popular);
        assert_eq!(q.category, CategoryFilter::All);
    }
}
