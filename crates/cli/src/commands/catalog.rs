//! Catalog browsing commands.

use std::io::Write;

use techmart_core::{Action, CatalogQuery, KeyValueStore, ProductId, ShopError, Storefront};

use super::{CliError, CommandResult, report};
use crate::render;

/// Catalog controls from the command line.
#[derive(Debug, Default)]
pub struct Controls<'a> {
    pub text: Option<&'a str>,
    pub category: Option<&'a str>,
    pub price: Option<&'a str>,
    pub sort: Option<&'a str>,
}

/// List products matching the controls.
///
/// # Errors
///
/// Returns `CliError::Rejected` for a malformed price bracket or sort mode.
pub fn products<S: KeyValueStore>(
    out: &mut impl Write,
    shop: &mut Storefront<S>,
    controls: &Controls<'_>,
) -> CommandResult {
    let query = CatalogQuery::from_controls(
        controls.text,
        controls.category,
        controls.price,
        controls.sort,
    )
    .map_err(|e| CliError::Rejected(ShopError::from(e).user_message()))?;

    shop.set_query(query);
    render::catalog(out, &shop.catalog_view())?;
    Ok(())
}

/// List categories.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn categories<S: KeyValueStore>(out: &mut impl Write, shop: &Storefront<S>) -> CommandResult {
    render::categories(out, &shop.catalog_view())?;
    Ok(())
}

/// Show one product.
///
/// # Errors
///
/// Returns `CliError::Rejected` if the product does not exist.
pub fn show<S: KeyValueStore>(
    out: &mut impl Write,
    shop: &mut Storefront<S>,
    product_id: ProductId,
) -> CommandResult {
    let outcome = shop.dispatch(Action::ViewProduct(product_id));
    report(out, shop, outcome)
}
