//! Demo account and preference commands.

use std::io::Write;

use techmart_core::{Action, Confirmation, KeyValueStore, Storefront};

use super::{CommandResult, report};

/// Create an account and sign in.
///
/// # Errors
///
/// Returns `CliError::Rejected` for invalid or taken usernames and short
/// passwords.
pub fn signup<S: KeyValueStore>(
    out: &mut impl Write,
    shop: &mut Storefront<S>,
    username: String,
    password: String,
) -> CommandResult {
    let outcome = shop.dispatch(Action::Signup { username, password });
    report(out, shop, outcome)
}

/// Sign in with an existing account.
///
/// # Errors
///
/// Returns `CliError::Rejected` when the credentials do not match.
pub fn login<S: KeyValueStore>(
    out: &mut impl Write,
    shop: &mut Storefront<S>,
    username: String,
    password: String,
) -> CommandResult {
    let outcome = shop.dispatch(Action::Login { username, password });
    report(out, shop, outcome)
}

/// Simulated third-party sign-in.
///
/// # Errors
///
/// Returns `CliError::Rejected` if the session cannot be saved.
pub fn sso<S: KeyValueStore>(
    out: &mut impl Write,
    shop: &mut Storefront<S>,
    display_name: Option<String>,
) -> CommandResult {
    let outcome = shop.dispatch(Action::FederatedSignIn { display_name });
    report(out, shop, outcome)
}

/// Sign out. Without `yes` only the prompt is printed.
///
/// # Errors
///
/// Returns `CliError::Rejected` if the session cannot be saved.
pub fn logout<S: KeyValueStore>(
    out: &mut impl Write,
    shop: &mut Storefront<S>,
    yes: bool,
) -> CommandResult {
    let outcome = shop.dispatch(Action::Logout(Confirmation::from_flag(yes)));
    report(out, shop, outcome)
}

/// Print the signed-in user.
///
/// # Errors
///
/// Returns `CliError::Output` if writing fails.
pub fn whoami<S: KeyValueStore>(out: &mut impl Write, shop: &Storefront<S>) -> CommandResult {
    match shop.current_user() {
        Some(name) => writeln!(out, "{name}")?,
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

/// Toggle the dark-mode preference.
///
/// # Errors
///
/// Returns `CliError::Rejected` if the preference cannot be saved.
pub fn dark<S: KeyValueStore>(out: &mut impl Write, shop: &mut Storefront<S>) -> CommandResult {
    let outcome = shop.dispatch(Action::ToggleDarkMode);
    report(out, shop, outcome)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::testing::{output, shop};
    use super::*;

    fn creds(username: &str, password: &str) -> (String, String) {
        (username.to_string(), password.to_string())
    }

    #[test]
    fn test_signup_then_whoami() {
        let mut shop = shop();
        let (u, p) = creds("ada", "lovelace");

        let mut buf = Vec::new();
        signup(&mut buf, &mut shop, u, p).unwrap();
        whoami(&mut buf, &shop).unwrap();
        assert_eq!(output(buf), "Signed up & logged in as ada\nada\n");
    }

    #[test]
    fn test_signup_rejects_short_password() {
        let mut shop = shop();
        let (u, p) = creds("ada", "abc");
        let err = signup(&mut Vec::new(), &mut shop, u, p).unwrap_err();
        assert_eq!(err.to_string(), "Password must be >=4 chars");
    }

    #[test]
    fn test_login_failure_is_generic() {
        let mut shop = shop();
        let (u, p) = creds("ada", "lovelace");
        signup(&mut Vec::new(), &mut shop, u, p).unwrap();
        logout(&mut Vec::new(), &mut shop, true).unwrap();

        let (u, p) = creds("ada", "wrong");
        let err = login(&mut Vec::new(), &mut shop, u, p).unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");

        let (u, p) = creds("nobody", "lovelace");
        let err = login(&mut Vec::new(), &mut shop, u, p).unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_login_reports_user() {
        let mut shop = shop();
        let (u, p) = creds("ada", "lovelace");
        signup(&mut Vec::new(), &mut shop, u, p).unwrap();
        logout(&mut Vec::new(), &mut shop, true).unwrap();

        let mut buf = Vec::new();
        let (u, p) = creds("ada", "lovelace");
        login(&mut buf, &mut shop, u, p).unwrap();
        assert_eq!(output(buf), "Signed in as ada\n");
    }

    #[test]
    fn test_sso_without_name_changes_nothing() {
        let mut shop = shop();
        let mut buf = Vec::new();
        sso(&mut buf, &mut shop, None).unwrap();
        sso(&mut buf, &mut shop, Some("Grace Hopper".to_string())).unwrap();
        assert_eq!(
            output(buf),
            "Nothing changed.\nSigned in as Grace Hopper (simulated)\n"
        );
    }

    #[test]
    fn test_logout_prompts_first() {
        let mut shop = shop();
        let (u, p) = creds("ada", "lovelace");
        signup(&mut Vec::new(), &mut shop, u, p).unwrap();

        let mut buf = Vec::new();
        logout(&mut buf, &mut shop, false).unwrap();
        assert_eq!(output(buf), "Logout?\nRe-run with --yes to confirm.\n");
        assert_eq!(shop.current_user(), Some("ada"));

        let mut buf = Vec::new();
        logout(&mut buf, &mut shop, true).unwrap();
        assert_eq!(output(buf), "Not signed in\n");
    }

    #[test]
    fn test_dark_toggles() {
        let mut shop = shop();
        let mut buf = Vec::new();
        dark(&mut buf, &mut shop).unwrap();
        dark(&mut buf, &mut shop).unwrap();
        assert_eq!(output(buf), "Dark mode on\nDark mode off\n");
    }
}
