//! Checkout commands.

use std::io::Write;

use techmart_core::{Action, Confirmation, KeyValueStore, Storefront};

use super::{CommandResult, report};
use crate::render;

/// Run the checkout gate and print the order summary when it passes.
///
/// # Errors
///
/// Returns `CliError::Rejected` when the cart is empty.
pub fn begin<S: KeyValueStore>(out: &mut impl Write, shop: &mut Storefront<S>) -> CommandResult {
    let outcome = shop.dispatch(Action::BeginCheckout);
    report(out, shop, outcome)
}

/// Print the order summary without gating.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn summary<S: KeyValueStore>(out: &mut impl Write, shop: &Storefront<S>) -> CommandResult {
    render::summary(out, &shop.order_summary())?;
    Ok(())
}

/// Place the order. Without `yes` only the prompt is printed.
///
/// # Errors
///
/// Returns `CliError::Rejected` when the cart is empty.
pub fn place<S: KeyValueStore>(
    out: &mut impl Write,
    shop: &mut Storefront<S>,
    yes: bool,
) -> CommandResult {
    let outcome = shop.dispatch(Action::PlaceOrder(Confirmation::from_flag(yes)));
    report(out, shop, outcome)
}
