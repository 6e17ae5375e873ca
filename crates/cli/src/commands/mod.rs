//! CLI command implementations.
//!
//! Each command dispatches on a [`Storefront`] and writes the result as
//! plain text. Rejected actions surface as [`CliError::Rejected`] so the
//! process exits non-zero.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;

use std::io::{self, Write};

use techmart_core::{KeyValueStore, Outcome, Page, Proceed, StoreError, Storefront};
use thiserror::Error;

use crate::render;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The shop refused the action; the message is shopper-facing.
    #[error("{0}")]
    Rejected(String),

    /// The storage file could not be opened.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Writing to the terminal failed.
    #[error("output error: {0}")]
    Output(#[from] io::Error),
}

/// Shared result type for commands.
pub type CommandResult = Result<(), CliError>;

/// Print an outcome.
///
/// Alerts without follow-up navigation are failures.
///
/// # Errors
///
/// Returns `CliError::Rejected` for failure alerts and `Output` if writing
/// fails.
pub fn report<S: KeyValueStore>(
    out: &mut impl Write,
    shop: &Storefront<S>,
    outcome: Outcome,
) -> CommandResult {
    match outcome {
        Outcome::Render(view) => render::view(out, &view)?,
        Outcome::Alert {
            message,
            then: None,
        } => return Err(CliError::Rejected(message)),
        Outcome::Alert { message, .. } => writeln!(out, "{message}")?,
        Outcome::Confirm { prompt, proceed } => {
            writeln!(out, "{prompt}")?;
            match proceed {
                Proceed::Dispatch(_) => writeln!(out, "Re-run with --yes to confirm.")?,
                Proceed::Navigate(Page::Login) => {
                    writeln!(out, "Run `techmart login <username> <password>` first.")?;
                }
                Proceed::Navigate(page) => writeln!(out, "See {}", page.path())?,
            }
        }
        Outcome::Navigate(Page::Checkout) => render::summary(out, &shop.order_summary())?,
        Outcome::Navigate(_) => match shop.current_user() {
            Some(name) => writeln!(out, "Signed in as {name}")?,
            None => writeln!(out, "Not signed in")?,
        },
        Outcome::Unchanged => writeln!(out, "Nothing changed.")?,
    }
    Ok(())
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use techmart_core::Action;

    use super::testing::{output, shop};
    use super::*;

    #[test]
    fn test_failure_alert_is_an_error() {
        let mut shop = shop();
        let outcome = shop.dispatch(Action::BeginCheckout);
        let mut buf = Vec::new();

        // Signed out: a confirmation, not an error.
        report(&mut buf, &shop, outcome).unwrap();
        assert!(output(buf).contains("techmart login"));

        shop.signup("ada", "lovelace").unwrap();
        let outcome = shop.dispatch(Action::BeginCheckout);
        let err = report(&mut Vec::new(), &shop, outcome).unwrap_err();
        assert_eq!(err.to_string(), "Cart empty");
    }

    #[test]
    fn test_navigate_home_reports_session() {
        let shop = shop();
        let mut buf = Vec::new();
        report(&mut buf, &shop, Outcome::Navigate(Page::Home)).unwrap();
        assert_eq!(output(buf), "Not signed in\n");
    }
}
