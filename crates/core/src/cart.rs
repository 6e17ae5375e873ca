//! Shopping cart.
//!
//! The cart is an ordered list of lines with at most one line per product and
//! a strictly positive quantity on every line. Mutations never leave a
//! zero-quantity line behind.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::{Price, ProductId};

/// One product's quantity within the cart.
///
/// Serialized as `{"id": 3, "qty": 2}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Referenced product.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Quantity, always greater than zero.
    #[serde(rename = "qty")]
    pub quantity: u32,
}

/// A cart line joined with its catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine<'a> {
    /// The product the line refers to.
    pub product: &'a Product,
    /// Quantity in the cart.
    pub quantity: u32,
    /// `product.price * quantity`.
    pub subtotal: Price,
}

/// The shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild a cart from persisted lines.
    ///
    /// Lines with a zero quantity are dropped and repeated product IDs are
    /// merged into the first occurrence.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines.into_iter().filter(|l| l.quantity > 0) {
            match cart.line_mut(line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of a product.
    pub fn add(&mut self, product_id: ProductId) {
        match self.line_mut(product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product_id,
                quantity: 1,
            }),
        }
    }

    /// Adjust a line's quantity by `delta`.
    ///
    /// The line is removed when the result is zero or negative. Products not
    /// in the cart are left alone.
    ///
    /// Returns `true` if a line was found.
    pub fn change_quantity(&mut self, product_id: ProductId, delta: i64) -> bool {
        let Some(line) = self.line_mut(product_id) else {
            return false;
        };

        let next = i64::from(line.quantity).saturating_add(delta);
        if next <= 0 {
            self.remove(product_id);
        } else {
            line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
        true
    }

    /// Remove a product's line regardless of quantity.
    ///
    /// Returns `true` if a line was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Lines joined with the catalog.
    ///
    /// Lines whose product is missing from the catalog are skipped.
    #[must_use]
    pub fn priced_lines<'a>(&self, catalog: &'a Catalog) -> Vec<PricedLine<'a>> {
        self.lines
            .iter()
            .filter_map(|line| {
                let product = catalog.find(line.product_id)?;
                Some(PricedLine {
                    product,
                    quantity: line.quantity,
                    subtotal: product.price.times(line.quantity),
                })
            })
            .collect()
    }

    /// Sum of subtotals over lines whose product still exists.
    #[must_use]
    pub fn total(&self, catalog: &Catalog) -> Price {
        self.priced_lines(catalog).iter().map(|l| l.subtotal).sum()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DELL: ProductId = ProductId::new(1);
    const IPHONE: ProductId = ProductId::new(3);

    fn quantity_of(cart: &Cart, product_id: ProductId) -> u32 {
        cart.lines()
            .iter()
            .find(|l| l.product_id == product_id)
            .map_or(0, |l| l.quantity)
    }

    #[test]
    fn test_add_twice_makes_one_line_of_two() {
        let mut cart = Cart::new();
        cart.add(DELL);
        cart.add(DELL);

        assert_eq!(
            cart.lines(),
            &[CartLine {
                product_id: DELL,
                quantity: 2
            }]
        );
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(IPHONE);
        cart.add(DELL);
        cart.add(IPHONE);

        let ids: Vec<_> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![IPHONE, DELL]);
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(DELL);

        assert!(cart.change_quantity(DELL, -1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_large_negative_delta_removes_line() {
        let mut cart = Cart::new();
        cart.add(DELL);
        cart.add(DELL);
        cart.change_quantity(DELL, -10);
        assert_eq!(quantity_of(&cart, DELL), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_for_missing_line_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.change_quantity(DELL, 1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment() {
        let mut cart = Cart::new();
        cart.add(DELL);
        cart.change_quantity(DELL, 3);
        assert_eq!(quantity_of(&cart, DELL), 4);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(DELL);
        cart.add(IPHONE);

        assert!(cart.remove(DELL));
        assert!(!cart.remove(DELL));
        assert_eq!(cart.item_count(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_total_skips_missing_products() {
        let catalog = Catalog::seed();
        let cart = Cart::from_lines(vec![
            CartLine {
                product_id: DELL,
                quantity: 2,
            },
            CartLine {
                product_id: ProductId::new(404),
                quantity: 5,
            },
            CartLine {
                product_id: IPHONE,
                quantity: 1,
            },
        ]);

        assert_eq!(cart.total(&catalog), Price::new(55_999 * 2 + 35_499));
        assert_eq!(cart.priced_lines(&catalog).len(), 2);
        // The dangling line still counts toward the badge.
        assert_eq!(cart.item_count(), 8);
    }

    #[test]
    fn test_from_lines_drops_zero_and_merges_duplicates() {
        let cart = Cart::from_lines(vec![
            CartLine {
                product_id: DELL,
                quantity: 0,
            },
            CartLine {
                product_id: IPHONE,
                quantity: 1,
            },
            CartLine {
                product_id: IPHONE,
                quantity: 2,
            },
        ]);

        assert_eq!(
            cart.lines(),
            &[CartLine {
                product_id: IPHONE,
                quantity: 3
            }]
        );
    }

    #[test]
    fn test_persisted_shape() {
        let mut cart = Cart::new();
        cart.add(IPHONE);
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"[{"id":3,"qty":1}]"#);

        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }
}
