//! INSECURE demo authentication.
//!
//! This module simulates accounts for a demo shop. It is **not** a credential
//! store and must never guard anything real:
//!
//! - passwords are kept and compared in plaintext,
//! - the "third-party" sign-in accepts any non-empty display name,
//! - username uniqueness is only checked when an account is created.
//!
//! Login failures always report [`DemoAuthError::InvalidCredentials`] so the
//! response does not reveal whether a username exists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Username, UsernameError};

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Errors from the demo sign-up and login flows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DemoAuthError {
    /// Username empty or containing whitespace.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// Password shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// An account with this username already exists.
    #[error("username already exists")]
    UsernameTaken,

    /// Login submitted with an empty username or password.
    #[error("missing credentials")]
    MissingCredentials,

    /// Unknown username or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// A demo account with a plaintext password.
///
/// Fields are raw strings because persisted records are trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Account name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Flat list of demo accounts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountBook {
    accounts: Vec<UserAccount>,
}

impl AccountBook {
    /// Wrap a persisted account list.
    #[must_use]
    pub const fn new(accounts: Vec<UserAccount>) -> Self {
        Self { accounts }
    }

    /// All accounts in creation order.
    #[must_use]
    pub fn accounts(&self) -> &[UserAccount] {
        &self.accounts
    }

    /// Whether an account with `username` exists.
    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.accounts.iter().any(|a| a.username == username)
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUsername` for empty or whitespace-containing names,
    /// `PasswordTooShort` for passwords under four characters and
    /// `UsernameTaken` if the name is already registered.
    pub fn register(&mut self, username: &str, password: &str) -> Result<Username, DemoAuthError> {
        let username = Username::parse(username)?;

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DemoAuthError::PasswordTooShort);
        }

        if self.contains(username.as_str()) {
            return Err(DemoAuthError::UsernameTaken);
        }

        self.accounts.push(UserAccount {
            username: username.as_str().to_owned(),
            password: password.to_owned(),
        });

        Ok(username)
    }

    /// Find the account matching an exact username and password pair.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` if either field is empty and
    /// `InvalidCredentials` for any mismatch.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<&UserAccount, DemoAuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(DemoAuthError::MissingCredentials);
        }

        self.accounts
            .iter()
            .find(|a| a.username == username && a.password == password)
            .ok_or(DemoAuthError::InvalidCredentials)
    }
}

/// Accept a display name from the simulated third-party sign-in prompt.
///
/// Returns `None` when the prompt was dismissed or left blank.
#[must_use]
pub fn federated_display_name(input: Option<&str>) -> Option<String> {
    let name = input?.trim();
    (!name.is_empty()).then(|| name.to_owned())
}
