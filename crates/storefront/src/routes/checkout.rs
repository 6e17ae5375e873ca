//! Checkout route handlers.
//!
//! Placing an order is a demo terminus: the cart empties and nothing is
//! recorded.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    response::{IntoResponse, Redirect, Response},
};
use techmart_core::checkout::{CheckoutGate, OrderSummary};
use techmart_core::view::EMPTY_ORDER_PLACEHOLDER;
use techmart_core::{Action, Page};
use tracing::instrument;

use super::{ConfirmForm, NoticeQuery, respond};
use crate::error::Result;
use crate::middleware::{Chrome, Shop};

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub chrome: Chrome,
    pub summary: OrderSummary,
    pub empty_placeholder: &'static str,
}

/// "Checkout" button on the cart page.
#[instrument(skip(shop))]
pub async fn begin(mut shop: Shop) -> Result<Response> {
    let outcome = shop.apply(Action::BeginCheckout).await?;
    Ok(respond(&shop, outcome, Page::Cart))
}

/// Display the order summary.
///
/// Signed-out shoppers are sent to the login page.
#[instrument(skip(shop))]
pub async fn show(shop: Shop, Query(query): Query<NoticeQuery>) -> Response {
    if shop.controller().checkout_gate() == CheckoutGate::LoginRequired {
        return Redirect::to(Page::Login.path()).into_response();
    }

    CheckoutTemplate {
        chrome: shop.chrome(query.notice),
        summary: shop.controller().order_summary(),
        empty_placeholder: EMPTY_ORDER_PLACEHOLDER,
    }
    .into_response()
}

/// Place the demo order once confirmed.
#[instrument(skip(shop))]
pub async fn place(mut shop: Shop, Form(form): Form<ConfirmForm>) -> Result<Response> {
    let outcome = shop.apply(Action::PlaceOrder(form.confirmation())).await?;
    Ok(respond(&shop, outcome, Page::Checkout))
}
