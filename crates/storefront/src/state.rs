//! Application state shared across handlers.

use std::sync::Arc;

use techmart_core::Catalog;

use crate::config::StorefrontConfig;
use crate::middleware::{SessionLocks, ShopperSessionStore};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. All per-shopper state lives in the session
/// snapshot.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    sessions: ShopperSessionStore,
    session_locks: SessionLocks,
}

impl AppState {
    /// Create a new application state over the given catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                sessions: ShopperSessionStore::default(),
                session_locks: SessionLocks::default(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The session store backing the session layer.
    #[must_use]
    pub fn sessions(&self) -> &ShopperSessionStore {
        &self.inner.sessions
    }

    /// Per-session request locks.
    #[must_use]
    pub fn session_locks(&self) -> &SessionLocks {
        &self.inner.session_locks
    }
}
