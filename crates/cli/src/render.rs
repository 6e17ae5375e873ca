//! Plain-text rendering of shop views.

use std::io::{self, Write};

use techmart_core::checkout::OrderSummary;
use techmart_core::view::{
    CartBadge, CartView, CatalogView, EMPTY_CART_PLACEHOLDER, EMPTY_ORDER_PLACEHOLDER,
    NO_RESULTS_PLACEHOLDER, ProductDetail, View,
};

/// Product grid as a table.
pub fn catalog(out: &mut impl Write, view: &CatalogView) -> io::Result<()> {
    writeln!(out, "{}", view.result_label)?;
    if view.is_empty() {
        return writeln!(out, "{NO_RESULTS_PLACEHOLDER}");
    }
    for product in &view.products {
        writeln!(
            out,
            "{:>3}  {:<26} {:<12} {:>10}",
            product.id, product.name, product.category, product.price
        )?;
    }
    Ok(())
}

/// Category list with the active one starred.
pub fn categories(out: &mut impl Write, view: &CatalogView) -> io::Result<()> {
    for entry in &view.categories {
        let marker = if entry.active { '*' } else { ' ' };
        writeln!(out, "{marker} {}", entry.label)?;
    }
    Ok(())
}

pub fn product(out: &mut impl Write, detail: &ProductDetail) -> io::Result<()> {
    let card = &detail.card;
    writeln!(out, "{} (#{})", card.name, card.id)?;
    writeln!(out, "{}  {}", card.category, card.price)?;
    writeln!(out, "{}", detail.description)?;
    writeln!(out, "Image: {}", card.image_ref)
}

pub fn cart(out: &mut impl Write, view: &CartView) -> io::Result<()> {
    if view.is_empty {
        return writeln!(out, "{EMPTY_CART_PLACEHOLDER}");
    }
    for line in &view.lines {
        writeln!(
            out,
            "{:>3}  {:<26} {:>10} x {:<3} {:>10}",
            line.product_id, line.name, line.unit_price, line.quantity, line.subtotal
        )?;
    }
    writeln!(out, "Total: {}", view.total)
}

pub fn summary(out: &mut impl Write, summary: &OrderSummary) -> io::Result<()> {
    if summary.is_empty() {
        return writeln!(out, "{EMPTY_ORDER_PLACEHOLDER}");
    }
    for line in &summary.lines {
        writeln!(out, "{} x {}: {}", line.name, line.quantity, line.subtotal)?;
    }
    writeln!(out, "Total: {}", summary.total)
}

pub fn badge(out: &mut impl Write, badge: CartBadge) -> io::Result<()> {
    writeln!(out, "Cart: {} item(s)", badge.count)
}

/// Any rendered view.
pub fn view(out: &mut impl Write, view: &View) -> io::Result<()> {
    match view {
        View::Catalog(v) => catalog(out, v),
        View::Product(d) => product(out, d),
        View::Cart(v) => cart(out, v),
        View::Badge(b) => badge(out, *b),
        View::Theme { dark } => writeln!(out, "Dark mode {}", if *dark { "on" } else { "off" }),
    }
}
