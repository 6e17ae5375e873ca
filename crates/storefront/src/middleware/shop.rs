//! Per-session shop extractor.
//!
//! Each browser session owns a snapshot of the shop's key-value records,
//! stored in the tower-sessions session under [`SNAPSHOT_KEY`]. The
//! [`Shop`] extractor hydrates a controller from that snapshot; handlers
//! dispatch on it and call [`Shop::apply`] so the snapshot is written back.

use std::collections::BTreeMap;

use axum::{extract::FromRequestParts, http::request::Parts};
use techmart_core::{Action, MemoryStore, Outcome, Storefront};
use tower_sessions::Session;

use crate::error::AppError;
use crate::state::AppState;

/// Session key holding the shop snapshot.
pub const SNAPSHOT_KEY: &str = "shop_snapshot";

/// Layout data shared by every full page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    /// Signed-in display name.
    pub user: Option<String>,
    /// Cart badge count.
    pub cart_count: u32,
    /// Whether the badge shows.
    pub cart_visible: bool,
    /// Dark-mode preference.
    pub dark: bool,
    /// Alert text carried over from the previous request.
    pub notice: Option<String>,
}

/// The shopper's controller, loaded from their session.
pub struct Shop {
    session: Session,
    controller: Storefront<MemoryStore>,
}

impl FromRequestParts<AppState> for Shop {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        let entries: BTreeMap<String, String> =
            session.get(SNAPSHOT_KEY).await?.unwrap_or_default();

        Ok(Self {
            session,
            controller: Storefront::load(
                state.catalog().clone(),
                MemoryStore::from_entries(entries),
            ),
        })
    }
}

impl Shop {
    /// Read access to the controller.
    #[must_use]
    pub const fn controller(&self) -> &Storefront<MemoryStore> {
        &self.controller
    }

    /// Mutable access for non-persisted state such as the catalog query.
    pub const fn controller_mut(&mut self) -> &mut Storefront<MemoryStore> {
        &mut self.controller
    }

    /// Dispatch an action and write the snapshot back to the session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the snapshot cannot be saved.
    pub async fn apply(&mut self, action: Action) -> Result<Outcome, AppError> {
        let outcome = self.controller.dispatch(action);
        self.session
            .insert(SNAPSHOT_KEY, self.controller.store().entries())
            .await?;
        Ok(outcome)
    }

    /// Layout data for the current state.
    #[must_use]
    pub fn chrome(&self, notice: Option<String>) -> Chrome {
        let badge = self.controller.badge();
        Chrome {
            user: self
                .controller
                .auth_area()
                .display_name()
                .map(str::to_owned),
            cart_count: badge.count,
            cart_visible: badge.visible,
            dark: self.controller.is_dark(),
            notice: notice.filter(|n| !n.trim().is_empty()),
        }
    }
}
