//! Derived view data.
//!
//! These types carry everything a presentation layer needs to render a page,
//! with prices already formatted. They hold no markup.

use serde::Serialize;

use crate::cart::{Cart, PricedLine};
use crate::catalog::{Catalog, Product};
use crate::filter::CatalogQuery;
use crate::types::ProductId;

/// Placeholder shown when no product matches the filters.
pub const NO_RESULTS_PLACEHOLDER: &str = "No products found";

/// Placeholder shown on an empty cart page.
pub const EMPTY_CART_PLACEHOLDER: &str = "Your cart is empty.";

/// Placeholder shown on the checkout page with an empty cart.
pub const EMPTY_ORDER_PLACEHOLDER: &str = "No items in cart.";

/// Product grid card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image_ref: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.display(),
            image_ref: product.image_ref.clone(),
        }
    }
}

/// Sidebar category entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub label: String,
    pub active: bool,
}

/// The filtered product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub products: Vec<ProductCard>,
    /// e.g. "6 results".
    pub result_label: String,
    pub categories: Vec<CategoryEntry>,
    pub query: CatalogQuery,
}

impl CatalogView {
    /// Build the grid for `products`, which must already be filtered.
    #[must_use]
    pub fn new(catalog: &Catalog, products: &[&Product], query: &CatalogQuery) -> Self {
        let active = query.category.label();
        Self {
            products: products.iter().map(|p| ProductCard::from(*p)).collect(),
            result_label: format!("{} results", products.len()),
            categories: catalog
                .categories()
                .into_iter()
                .map(|label| CategoryEntry {
                    active: label == active,
                    label,
                })
                .collect(),
            query: query.clone(),
        }
    }

    /// Whether the grid should show [`NO_RESULTS_PLACEHOLDER`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Product detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetail {
    pub card: ProductCard,
    pub description: String,
}

impl From<&Product> for ProductDetail {
    fn from(product: &Product) -> Self {
        Self {
            card: ProductCard::from(product),
            description: format!("This is a demo description for {}.", product.name),
        }
    }
}

/// Cart page row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    pub image_ref: String,
    pub unit_price: String,
    pub quantity: u32,
    pub subtotal: String,
}

impl From<&PricedLine<'_>> for CartLineView {
    fn from(line: &PricedLine<'_>) -> Self {
        Self {
            product_id: line.product.id,
            name: line.product.name.clone(),
            category: line.product.category.clone(),
            image_ref: line.product.image_ref.clone(),
            unit_price: line.product.price.display(),
            quantity: line.quantity,
            subtotal: line.subtotal.display(),
        }
    }
}

/// Cart page contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub is_empty: bool,
}

impl CartView {
    /// Project the cart against the catalog.
    #[must_use]
    pub fn new(cart: &Cart, catalog: &Catalog) -> Self {
        let priced = cart.priced_lines(catalog);
        Self {
            lines: priced.iter().map(CartLineView::from).collect(),
            total: cart.total(catalog).display(),
            is_empty: cart.is_empty(),
        }
    }
}

/// Cart item-count badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartBadge {
    pub count: u32,
    /// Hidden when the cart is empty.
    pub visible: bool,
}

impl From<&Cart> for CartBadge {
    fn from(cart: &Cart) -> Self {
        let count = cart.item_count();
        Self {
            count,
            visible: count > 0,
        }
    }
}

/// The header's account area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AuthArea {
    /// "Hi, name" with a logout button.
    SignedIn(String),
    /// Link to the login/sign-up page.
    SignedOut,
}

impl AuthArea {
    /// Build from the current session.
    #[must_use]
    pub fn from_session(current_user: Option<&str>) -> Self {
        current_user.map_or(Self::SignedOut, |name| Self::SignedIn(name.to_owned()))
    }

    /// The signed-in display name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::SignedIn(name) => Some(name),
            Self::SignedOut => None,
        }
    }
}

/// A rendered view returned by dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum View {
    /// Filtered product grid.
    Catalog(CatalogView),
    /// One product's detail panel.
    Product(ProductDetail),
    /// Cart contents and total.
    Cart(CartView),
    /// Updated cart badge after an add.
    Badge(CartBadge),
    /// New dark-mode preference.
    Theme { dark: bool },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_products;

    #[test]
    fn test_catalog_view_marks_active_category() {
        let catalog = Catalog::seed();
        let query = CatalogQuery {
            category: "Laptop".into(),
            ..CatalogQuery::default()
        };
        let products = filter_products(&catalog, &query);
        let view = CatalogView::new(&catalog, &products, &query);

        let active: Vec<_> = view
            .categories
            .iter()
            .filter(|c| c.active)
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(active, vec!["Laptop"]);
        assert_eq!(view.result_label, "3 results");
    }

    #[test]
    fn test_empty_catalog_view() {
        let catalog = Catalog::seed();
        let query = CatalogQuery {
            text: "zzz".to_string(),
            ..CatalogQuery::default()
        };
        let view = CatalogView::new(&catalog, &filter_products(&catalog, &query), &query);
        assert!(view.is_empty());
        assert_eq!(view.result_label, "0 results");
    }

    #[test]
    fn test_badge_hidden_when_empty() {
        let mut cart = Cart::new();
        assert_eq!(
            CartBadge::from(&cart),
            CartBadge {
                count: 0,
                visible: false
            }
        );

        cart.add(ProductId::new(1));
        cart.add(ProductId::new(2));
        assert_eq!(
            CartBadge::from(&cart),
            CartBadge {
                count: 2,
                visible: true
            }
        );
    }

    #[test]
    fn test_cart_view_formats_prices() {
        let catalog = Catalog::seed();
        let mut cart = Cart::new();
        cart.add(ProductId::new(7));
        cart.add(ProductId::new(7));

        let view = CartView::new(&cart, &catalog);
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].unit_price, "₹12,999");
        assert_eq!(view.lines[0].subtotal, "₹25,998");
        assert_eq!(view.total, "₹25,998");
        assert!(!view.is_empty);
    }

    #[test]
    fn test_product_detail_description() {
        let catalog = Catalog::seed();
        let product = catalog.find(ProductId::new(8));
        let detail = product.map(ProductDetail::from);
        assert_eq!(
            detail.map(|d| d.description),
            Some("This is a demo description for MacBook Air M2.".to_string())
        );
    }
}
