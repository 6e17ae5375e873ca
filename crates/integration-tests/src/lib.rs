//! Integration tests for Techmart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p techmart-integration-tests
//! ```
//!
//! Each test starts its own storefront on an ephemeral local port and talks
//! to it with a cookie-keeping `reqwest` client, so every [`TestContext`] is
//! one isolated browser session.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use reqwest::{Client, Response};
use techmart_core::Catalog;
use techmart_storefront::config::StorefrontConfig;
use techmart_storefront::state::AppState;
use thiserror::Error;

/// Errors from setting up a test server.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The ephemeral listener could not be bound.
    #[error("failed to bind test listener: {0}")]
    Bind(#[from] std::io::Error),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A running storefront and a browser-like client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Start a storefront over the seed catalog.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if the listener or client cannot be created.
    pub async fn new() -> Result<Self, SetupError> {
        Self::with_catalog(Catalog::seed()).await
    }

    /// Start a storefront over an explicit catalog.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if the listener or client cannot be created.
    pub async fn with_catalog(catalog: Catalog) -> Result<Self, SetupError> {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let app = techmart_storefront::app(AppState::new(StorefrontConfig::default(), catalog));
        tokio::spawn(async move {
            // The server lives until the test's runtime shuts down.
            let _ = axum::serve(listener, app).await;
        });

        let client = Client::builder().cookie_store(true).build()?;

        Ok(Self {
            client,
            base_url: format!("http://{addr}"),
        })
    }

    /// Full URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a path, following redirects.
    ///
    /// # Errors
    ///
    /// Returns the transport error, if any.
    pub async fn get(&self, path: &str) -> reqwest::Result<Response> {
        self.client.get(self.url(path)).send().await
    }

    /// POST a form, following redirects.
    ///
    /// # Errors
    ///
    /// Returns the transport error, if any.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Result<Response> {
        self.client.post(self.url(path)).form(form).send().await
    }

    /// POST a form and return the final page body.
    ///
    /// # Errors
    ///
    /// Returns the transport error, if any.
    pub async fn post_text(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Result<String> {
        self.post(path, form).await?.text().await
    }

    /// GET a path and return the body.
    ///
    /// # Errors
    ///
    /// Returns the transport error, if any.
    pub async fn get_text(&self, path: &str) -> reqwest::Result<String> {
        self.get(path).await?.text().await
    }
}
