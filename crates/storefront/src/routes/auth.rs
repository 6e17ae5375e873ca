//! Demo authentication route handlers.
//!
//! INSECURE: these forms drive the simulated accounts in
//! `techmart_core::demo_auth`. Passwords are stored in the session snapshot
//! in plaintext.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::Query, response::Response};
use serde::Deserialize;
use techmart_core::{Action, Outcome, Page};
use tracing::instrument;

use super::{ConfirmForm, NoticeQuery, respond};
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{Chrome, Shop};

// =============================================================================
// Form Types
// =============================================================================

/// Login and sign-up form data.
#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Simulated provider prompt. An absent name means the prompt was dismissed.
#[derive(Debug, Deserialize)]
pub struct FederatedForm {
    pub display_name: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login / sign-up page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub chrome: Chrome,
}

// =============================================================================
// Routes
// =============================================================================

/// Display the login page.
#[instrument(skip(shop))]
pub async fn login_page(shop: Shop, Query(query): Query<NoticeQuery>) -> LoginTemplate {
    LoginTemplate {
        chrome: shop.chrome(query.notice),
    }
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(mut shop: Shop, Form(form): Form<CredentialsForm>) -> Result<Response> {
    let outcome = shop
        .apply(Action::Login {
            username: form.username,
            password: form.password,
        })
        .await?;
    note_session(&shop);
    Ok(respond(&shop, outcome, Page::Login))
}

/// Handle sign-up form submission.
#[instrument(skip_all)]
pub async fn signup(mut shop: Shop, Form(form): Form<CredentialsForm>) -> Result<Response> {
    let outcome = shop
        .apply(Action::Signup {
            username: form.username,
            password: form.password,
        })
        .await?;
    note_session(&shop);
    Ok(respond(&shop, outcome, Page::Login))
}

/// Handle the simulated third-party sign-in prompt.
#[instrument(skip(shop))]
pub async fn federated(mut shop: Shop, Form(form): Form<FederatedForm>) -> Result<Response> {
    let outcome = shop
        .apply(Action::FederatedSignIn {
            display_name: form.display_name,
        })
        .await?;
    note_session(&shop);
    Ok(respond(&shop, outcome, Page::Login))
}

/// Handle logout once confirmed.
#[instrument(skip(shop))]
pub async fn logout(mut shop: Shop, Form(form): Form<ConfirmForm>) -> Result<Response> {
    let outcome = shop.apply(Action::Logout(form.confirmation())).await?;
    if matches!(outcome, Outcome::Navigate(_)) {
        clear_sentry_user();
    }
    Ok(respond(&shop, outcome, Page::Home))
}

fn note_session(shop: &Shop) {
    if let Some(user) = shop.controller().current_user() {
        set_sentry_user(user);
    }
}
