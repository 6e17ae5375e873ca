//! Preference toggles.

use axum::response::Response;
use techmart_core::{Action, Page};
use tracing::instrument;

use super::respond;
use crate::error::Result;
use crate::middleware::Shop;

/// Flip dark mode and return to the catalog.
#[instrument(skip(shop))]
pub async fn toggle_dark(mut shop: Shop) -> Result<Response> {
    let outcome = shop.apply(Action::ToggleDarkMode).await?;
    Ok(respond(&shop, outcome, Page::Home))
}
