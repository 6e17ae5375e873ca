//! Cart commands.

use std::io::Write;

use techmart_core::{Action, Confirmation, KeyValueStore, ProductId, Storefront};

use super::{CommandResult, report};
use crate::render;

/// Print the cart.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn show<S: KeyValueStore>(out: &mut impl Write, shop: &Storefront<S>) -> CommandResult {
    render::cart(out, &shop.cart_view())?;
    Ok(())
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns `CliError::Rejected` for unknown products or failed writes.
pub fn add<S: KeyValueStore>(
    out: &mut impl Write,
    shop: &mut Storefront<S>,
    product_id: ProductId,
) -> CommandResult {
    let outcome = shop.dispatch(Action::AddToCart(product_id));
    report(out, shop, outcome)
}

/// Change a line's quantity by `delta`.
///
/// # Errors
///
/// Returns `CliError::Rejected` if the change cannot be saved.
pub fn update<S: KeyValueStore>(
    out: &mut impl Write,
    shop: &mut Storefront<S>,
    product_id: ProductId,
    delta: i64,
) -> CommandResult {
    let outcome = shop.dispatch(Action::ChangeQuantity { product_id, delta });
    report(out, shop, outcome)
}

/// Remove a line.
///
/// # Errors
///
/// Returns `CliError::Rejected` if the change cannot be saved.
pub fn remove<S: KeyValueStore>(
    out: &mut impl Write,
    shop: &mut Storefront<S>,
    product_id: ProductId,
) -> CommandResult {
    let outcome = shop.dispatch(Action::RemoveFromCart(product_id));
    report(out, shop, outcome)
}

/// Empty the cart. Without `yes` only the prompt is printed.
///
/// # Errors
///
/// Returns `CliError::Rejected` if the change cannot be saved.
pub fn clear<S: KeyValueStore>(
    out: &mut impl Write,
    shop: &mut Storefront<S>,
    yes: bool,
) -> CommandResult {
    let outcome = shop.dispatch(Action::ClearCart(Confirmation::from_flag(yes)));
    report(out, shop, outcome)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use techmart_core::Catalog;

    use super::super::testing::{output, shop};
    use super::*;
    use crate::store::JsonFileStore;

    #[test]
    fn test_cart_persists_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");

        {
            let store = JsonFileStore::open(&path).unwrap();
            let mut shop = Storefront::load(Catalog::seed(), store);
            let mut buf = Vec::new();
            add(&mut buf, &mut shop, ProductId::new(3)).unwrap();
            add(&mut buf, &mut shop, ProductId::new(3)).unwrap();
            assert_eq!(output(buf), "Cart: 1 item(s)\nCart: 2 item(s)\n");
        }

        let store = JsonFileStore::open(&path).unwrap();
        let shop = Storefront::load(Catalog::seed(), store);
        let mut buf = Vec::new();
        show(&mut buf, &shop).unwrap();
        let text = output(buf);
        assert!(text.contains("iPhone 14"));
        assert!(text.ends_with("Total: ₹70,998\n"));
    }

    #[test]
    fn test_add_unknown_product_fails() {
        let mut shop = shop();
        let err = add(&mut Vec::new(), &mut shop, ProductId::new(99)).unwrap_err();
        assert_eq!(err.to_string(), "Product not found");
        assert_eq!(shop.badge().count, 0);
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let mut shop = shop();
        add(&mut Vec::new(), &mut shop, ProductId::new(5)).unwrap();

        let mut buf = Vec::new();
        update(&mut buf, &mut shop, ProductId::new(5), -1).unwrap();
        assert_eq!(output(buf), "Your cart is empty.\n");
    }

    #[test]
    fn test_clear_requires_yes() {
        let mut shop = shop();
        add(&mut Vec::new(), &mut shop, ProductId::new(5)).unwrap();

        let mut buf = Vec::new();
        clear(&mut buf, &mut shop, false).unwrap();
        assert_eq!(output(buf), "Clear all items?\nRe-run with --yes to confirm.\n");
        assert_eq!(shop.badge().count, 1);

        clear(&mut Vec::new(), &mut shop, true).unwrap();
        assert_eq!(shop.badge().count, 0);
    }

    #[test]
    fn test_remove_line() {
        let mut shop = shop();
        add(&mut Vec::new(), &mut shop, ProductId::new(5)).unwrap();
        add(&mut Vec::new(), &mut shop, ProductId::new(7)).unwrap();

        let mut buf = Vec::new();
        remove(&mut buf, &mut shop, ProductId::new(5)).unwrap();
        let text = output(buf);
        assert!(!text.contains("Sony"));
        assert!(text.ends_with("Total: ₹12,999\n"));
    }
}
