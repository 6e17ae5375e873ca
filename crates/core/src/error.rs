//! Shop-level error type.

use thiserror::Error;

use crate::demo_auth::DemoAuthError;
use crate::filter::QueryError;
use crate::store::StoreError;
use crate::types::{ProductId, UsernameError};

/// Errors returned by [`crate::Storefront`] operations.
///
/// Every variant leaves the shop state untouched.
#[derive(Debug, Error)]
pub enum ShopError {
    /// Sign-up or login rejected.
    #[error("auth error: {0}")]
    Auth(#[from] DemoAuthError),

    /// A catalog control had an unparsable value.
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    /// The product ID is not in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Checkout or order placement with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The key-value backend failed while persisting a change.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ShopError {
    /// Alert text shown to the shopper.
    ///
    /// Storage failures are reported generically.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(err) => match err {
                DemoAuthError::InvalidUsername(
                    UsernameError::Empty | UsernameError::ContainsWhitespace,
                ) => "Enter valid username (no spaces)".to_string(),
                DemoAuthError::PasswordTooShort => "Password must be >=4 chars".to_string(),
                DemoAuthError::UsernameTaken => "Username exists — login instead".to_string(),
                DemoAuthError::MissingCredentials => "Enter credentials".to_string(),
                DemoAuthError::InvalidCredentials => "Invalid credentials".to_string(),
            },
            Self::Query(err) => err.to_string(),
            Self::UnknownProduct(_) => "Product not found".to_string(),
            Self::EmptyCart => "Cart empty".to_string(),
            Self::Store(_) => "Could not save your changes, please try again".to_string(),
        }
    }
}
