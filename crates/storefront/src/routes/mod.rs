//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog (query: q, category, price, sort)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/{id}          - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit (HTMX: returns badge fragment)
//! POST /cart/update            - Change quantity by delta
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart (confirmation-gated)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout               - Begin checkout (login + non-empty cart)
//! GET  /checkout               - Order summary
//! POST /checkout/place         - Place demo order (confirmation-gated)
//!
//! # Auth (insecure demo)
//! GET  /auth/login             - Login / sign-up page
//! POST /auth/login             - Login action
//! POST /auth/signup            - Sign-up action
//! POST /auth/federated         - Simulated third-party sign-in
//! POST /auth/logout            - Logout (confirmation-gated)
//!
//! # Preferences
//! POST /preferences/dark       - Toggle dark mode
//! ```
//!
//! Every POST answers with a redirect. Alerts ride along as a `notice`
//! query parameter; confirmations render a page that re-posts with
//! `confirm=yes`.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod preferences;
pub mod products;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use techmart_core::{Action, Confirmation, Outcome, Page, Proceed};

use crate::middleware::{Chrome, Shop};
use crate::state::AppState;

// =============================================================================
// Shared Form and Query Types
// =============================================================================

/// Query parameter carrying an alert from the previous request.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

/// Form for confirmation-gated actions.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    pub confirm: Option<String>,
}

impl ConfirmForm {
    /// `confirm=yes` grants the confirmation.
    #[must_use]
    pub fn confirmation(&self) -> Confirmation {
        Confirmation::from_flag(self.confirm.as_deref() == Some("yes"))
    }
}

// =============================================================================
// Outcome Handling
// =============================================================================

/// Confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "confirm.html")]
pub struct ConfirmTemplate {
    pub chrome: Chrome,
    pub prompt: String,
    /// Where accepting goes.
    pub accept_path: &'static str,
    /// Accepting re-posts with `confirm=yes` rather than following a link.
    pub accept_posts: bool,
    pub cancel_path: &'static str,
}

/// `path?notice=...`
#[must_use]
pub fn with_notice(page: Page, message: &str) -> String {
    format!("{}?notice={}", page.path(), urlencoding::encode(message))
}

/// Whether the request came from HTMX.
#[must_use]
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("hx-request")
}

/// Turn a dispatch outcome into an HTTP response.
///
/// `back` is the page the action was triggered from.
#[must_use]
pub fn respond(shop: &Shop, outcome: Outcome, back: Page) -> Response {
    match outcome {
        Outcome::Render(_) | Outcome::Unchanged => Redirect::to(back.path()).into_response(),
        Outcome::Navigate(page) => Redirect::to(page.path()).into_response(),
        Outcome::Alert { message, then } => {
            Redirect::to(&with_notice(then.unwrap_or(back), &message)).into_response()
        }
        Outcome::Confirm { prompt, proceed } => {
            let (accept_path, accept_posts) = match &proceed {
                Proceed::Dispatch(action) => (confirm_path(action, back), true),
                Proceed::Navigate(page) => (page.path(), false),
            };
            ConfirmTemplate {
                chrome: shop.chrome(None),
                prompt,
                accept_path,
                accept_posts,
                cancel_path: back.path(),
            }
            .into_response()
        }
    }
}

/// The endpoint a confirmed action re-posts to.
const fn confirm_path(action: &Action, back: Page) -> &'static str {
    match action {
        Action::ClearCart(_) => "/cart/clear",
        Action::PlaceOrder(_) => "/checkout/place",
        Action::Logout(_) => "/auth/logout",
        _ => back.path(),
    }
}

// =============================================================================
// Routers
// =============================================================================

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/federated", post(auth::federated))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(home::home))
        .route("/products/{id}", get(products::show))
        // Cart
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::show).post(checkout::begin))
        .route("/checkout/place", post(checkout::place))
        // Auth
        .nest("/auth", auth_routes())
        // Preferences
        .route("/preferences/dark", post(preferences::toggle_dark))
}
