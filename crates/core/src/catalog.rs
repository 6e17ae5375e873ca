//! Static product catalog.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Category label that selects every product.
pub const ALL_CATEGORIES: &str = "All";

/// A catalog product.
///
/// Products are immutable for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category label (exact-match filter key).
    pub category: String,
    /// Unit price.
    pub price: Price,
    /// Image URL or relative asset path.
    pub image_ref: String,
    /// Whether the product shows under the "popular" sort.
    pub popular: bool,
}

impl Product {
    fn seed(
        id: i32,
        name: &str,
        category: &str,
        price: i64,
        image_ref: &str,
        popular: bool,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.to_owned(),
            category: category.to_owned(),
            price: Price::new(price),
            image_ref: image_ref.to_owned(),
            popular,
        }
    }
}

/// The fixed list of products offered by the shop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The shop's built-in product list.
    #[must_use]
    pub fn seed() -> Self {
        Self::new(vec![
            Product::seed(
                1,
                "Dell Inspiron 15",
                "Laptop",
                55_999,
                "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?auto=format&w=1200&q=60",
                true,
            ),
            Product::seed(
                2,
                "HP Pavilion 14",
                "Laptop",
                47_999,
                "https://images.unsplash.com/photo-1517430816045-df4b7de11d1d?auto=format&w=1200&q=60",
                true,
            ),
            Product::seed(3, "iPhone 14", "Smartphone", 35_499, "shopping.jpg", true),
            Product::seed(
                4,
                "Samsung Galaxy S23 Ultra",
                "Smartphone",
                99_999,
                "samsung.jpg",
                true,
            ),
            Product::seed(
                5,
                "Sony WH-1000XM5",
                "Accessories",
                29_999,
                "https://images.unsplash.com/photo-1585386959984-a4155224a1ad?auto=format&w=1200&q=60",
                true,
            ),
            Product::seed(
                6,
                "Apple Watch Series 9",
                "Accessories",
                32_999,
                "https://images.unsplash.com/photo-1608029941403-c9a7fdd0b5b2?auto=format&w=1200&q=60",
                false,
            ),
            Product::seed(
                7,
                "Logitech MX Master 3S",
                "Accessories",
                12_999,
                "https://images.unsplash.com/photo-1589578527966-fdac0f44566c?auto=format&w=1200&q=60",
                false,
            ),
            Product::seed(8, "MacBook Air M2", "Laptop", 99_999, "MAC.jfif", true),
        ])
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Category labels for the sidebar: "All" first, then each distinct
    /// category in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_owned()];
        for product in &self.products {
            if !categories.iter().any(|c| c == &product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Number of products.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
