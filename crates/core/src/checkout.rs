//! Checkout summary and gating.
//!
//! Placing an order is a demo terminus: the cart is emptied and nothing is
//! recorded.

use serde::Serialize;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::types::Price;

/// Acknowledgment shown after a demo order is placed.
pub const ORDER_PLACED_MESSAGE: &str = "Order placed (demo). Thank you!";

/// Prompt shown when a signed-out shopper tries to check out.
pub const LOGIN_REQUIRED_PROMPT: &str = "Login required to checkout. Go to login?";

/// Whether a shopper may proceed to the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutGate {
    /// No session.
    LoginRequired,
    /// Signed in but nothing in the cart.
    EmptyCart,
    /// Signed in with a non-empty cart.
    Ready,
}

impl CheckoutGate {
    /// Evaluate the gate. The session check comes first.
    #[must_use]
    pub const fn evaluate(current_user: Option<&str>, cart: &Cart) -> Self {
        if current_user.is_none() {
            Self::LoginRequired
        } else if cart.is_empty() {
            Self::EmptyCart
        } else {
            Self::Ready
        }
    }
}

/// One order summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub subtotal: String,
}

/// Read-only order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub total: String,
    #[serde(skip)]
    pub total_amount: Price,
}

impl OrderSummary {
    /// Summarize the cart against the catalog.
    #[must_use]
    pub fn new(cart: &Cart, catalog: &Catalog) -> Self {
        let total_amount = cart.total(catalog);
        Self {
            lines: cart
                .priced_lines(catalog)
                .iter()
                .map(|line| OrderLine {
                    name: line.product.name.clone(),
                    quantity: line.quantity,
                    subtotal: line.subtotal.display(),
                })
                .collect(),
            total: total_amount.display(),
            total_amount,
        }
    }

    /// Whether the summary has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Confirmation prompt for placing the order.
    #[must_use]
    pub fn place_order_prompt(&self) -> String {
        format!("Place order for {}? (Demo)", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    #[test]
    fn test_gate_checks_login_before_cart() {
        let cart = Cart::new();
        assert_eq!(CheckoutGate::evaluate(None, &cart), CheckoutGate::LoginRequired);

        assert_eq!(CheckoutGate::evaluate(Some("erin"), &cart), CheckoutGate::EmptyCart);

        let mut cart = Cart::new();
        cart.add(ProductId::new(2));
        assert_eq!(CheckoutGate::evaluate(Some("erin"), &cart), CheckoutGate::Ready);
    }

    #[test]
    fn test_summary_and_prompt() {
        let catalog = Catalog::seed();
        let mut cart = Cart::new();
        cart.add(ProductId::new(5));
        cart.add(ProductId::new(5));
        cart.add(ProductId::new(7));

        let summary = OrderSummary::new(&cart, &catalog);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.total, "₹72,997");
        assert_eq!(summary.total_amount, Price::new(72_997));
        assert_eq!(summary.place_order_prompt(), "Place order for ₹72,997? (Demo)");
    }
}
