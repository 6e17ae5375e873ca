//! Catalog page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Query;
use serde::Deserialize;
use techmart_core::view::{CatalogView, NO_RESULTS_PLACEHOLDER};
use techmart_core::{CatalogQuery, ShopError, SortMode};
use tracing::instrument;

use crate::middleware::{Chrome, Shop};

/// Price dropdown choices as `(value, label)`.
pub const PRICE_BRACKETS: &[(&str, &str)] = &[
    ("all", "All prices"),
    ("0-20000", "Under ₹20,000"),
    ("20000-40000", "₹20,000 to ₹40,000"),
    ("40000-60000", "₹40,000 to ₹60,000"),
    ("60000-100000", "₹60,000 and above"),
];

/// Catalog controls as query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub sort: Option<String>,
    pub notice: Option<String>,
}

/// A dropdown option.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A category sidebar link.
#[derive(Debug, Clone)]
pub struct CategoryLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub chrome: Chrome,
    pub catalog: CatalogView,
    pub categories: Vec<CategoryLink>,
    pub sort_options: Vec<SelectOption>,
    pub price_options: Vec<SelectOption>,
    pub empty_placeholder: &'static str,
}

/// Display the filtered catalog.
///
/// Invalid controls fall back to the defaults and show an alert.
#[instrument(skip(shop))]
pub async fn home(mut shop: Shop, Query(params): Query<CatalogParams>) -> IndexTemplate {
    let mut notice = params.notice;
    let query = CatalogQuery::from_controls(
        params.q.as_deref(),
        params.category.as_deref(),
        params.price.as_deref(),
        params.sort.as_deref(),
    )
    .unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring invalid catalog controls");
        notice = Some(ShopError::from(e).user_message());
        CatalogQuery::default()
    });

    shop.controller_mut().set_query(query);
    let catalog = shop.controller().catalog_view();

    IndexTemplate {
        chrome: shop.chrome(notice),
        categories: category_links(&catalog),
        sort_options: sort_options(catalog.query.sort),
        price_options: price_options(&catalog.query.price.to_string()),
        catalog,
        empty_placeholder: NO_RESULTS_PLACEHOLDER,
    }
}

/// Sidebar links keep the other controls and swap the category.
fn category_links(catalog: &CatalogView) -> Vec<CategoryLink> {
    let query = &catalog.query;
    catalog
        .categories
        .iter()
        .map(|entry| CategoryLink {
            href: format!(
                "/?q={}&category={}&price={}&sort={}",
                urlencoding::encode(&query.text),
                urlencoding::encode(&entry.label),
                query.price,
                query.sort,
            ),
            label: entry.label.clone(),
            active: entry.active,
        })
        .collect()
}

fn sort_options(current: SortMode) -> Vec<SelectOption> {
    SortMode::ALL
        .iter()
        .map(|mode| SelectOption {
            value: mode.as_str().to_string(),
            label: mode.label().to_string(),
            selected: *mode == current,
        })
        .collect()
}

fn price_options(current: &str) -> Vec<SelectOption> {
    PRICE_BRACKETS
        .iter()
        .map(|(value, label)| SelectOption {
            value: (*value).to_string(),
            label: (*label).to_string(),
            selected: *value == current,
        })
        .collect()
}
