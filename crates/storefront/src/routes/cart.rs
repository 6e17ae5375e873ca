//! Cart route handlers.
//!
//! Adding to the cart supports HTMX: an `HX-Request` gets the badge fragment
//! back with an `HX-Trigger: cart-updated` header instead of a redirect. A
//! rejected HTMX add answers with `HX-Redirect` so the alert shows on a
//! full page rather than inside the badge.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use techmart_core::view::{CartView, EMPTY_CART_PLACEHOLDER, View};
use techmart_core::{Action, Outcome, Page, ProductId};
use tracing::instrument;

use super::{ConfirmForm, NoticeQuery, is_htmx, respond, with_notice};
use crate::error::Result;
use crate::middleware::{Chrome, Shop};

/// Message shown after a non-HTMX add.
const ADDED_NOTICE: &str = "Added to cart";

/// Form naming one product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: ProductId,
}

/// Quantity stepper form.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub delta: i64,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub chrome: Chrome,
    pub cart: CartView,
    pub empty_placeholder: &'static str,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
    pub visible: bool,
}

/// Display cart page.
#[instrument(skip(shop))]
pub async fn show(shop: Shop, Query(query): Query<NoticeQuery>) -> CartTemplate {
    CartTemplate {
        chrome: shop.chrome(query.notice),
        cart: shop.controller().cart_view(),
        empty_placeholder: EMPTY_CART_PLACEHOLDER,
    }
}

/// Add one unit of a product.
#[instrument(skip(shop, headers))]
pub async fn add(
    mut shop: Shop,
    headers: HeaderMap,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let outcome = shop.apply(Action::AddToCart(form.product_id)).await?;

    Ok(match outcome {
        Outcome::Render(View::Badge(badge)) if is_htmx(&headers) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartCountTemplate {
                count: badge.count,
                visible: badge.visible,
            },
        )
            .into_response(),
        Outcome::Render(View::Badge(_)) => {
            Redirect::to(&with_notice(Page::Home, ADDED_NOTICE)).into_response()
        }
        Outcome::Alert { message, then } if is_htmx(&headers) => {
            let target = with_notice(then.unwrap_or(Page::Home), &message);
            AppendHeaders([("HX-Redirect", target)]).into_response()
        }
        other => respond(&shop, other, Page::Home),
    })
}

/// Change a line's quantity by `delta`.
#[instrument(skip(shop))]
pub async fn update(mut shop: Shop, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    let outcome = shop
        .apply(Action::ChangeQuantity {
            product_id: form.product_id,
            delta: form.delta,
        })
        .await?;
    Ok(respond(&shop, outcome, Page::Cart))
}

/// Remove a product's line.
#[instrument(skip(shop))]
pub async fn remove(mut shop: Shop, Form(form): Form<ProductForm>) -> Result<Response> {
    let outcome = shop.apply(Action::RemoveFromCart(form.product_id)).await?;
    Ok(respond(&shop, outcome, Page::Cart))
}

/// Empty the cart once confirmed.
#[instrument(skip(shop))]
pub async fn clear(mut shop: Shop, Form(form): Form<ConfirmForm>) -> Result<Response> {
    let outcome = shop.apply(Action::ClearCart(form.confirmation())).await?;
    Ok(respond(&shop, outcome, Page::Cart))
}

/// Get cart count badge (HTMX).
#[instrument(skip(shop))]
pub async fn count(shop: Shop) -> CartCountTemplate {
    let badge = shop.controller().badge();
    CartCountTemplate {
        count: badge.count,
        visible: badge.visible,
    }
}
