//! UI actions and their outcomes.
//!
//! Every user interaction is an [`Action`]. The controller handles it and
//! answers with an [`Outcome`] that tells the presentation layer what to do
//! next. Actions that discard data carry a [`Confirmation`]; a pending one
//! comes back as [`Outcome::Confirm`] with the same action marked confirmed.

use crate::types::ProductId;
use crate::view::View;

/// Whether the shopper has already agreed to a destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    /// Ask first.
    #[default]
    Pending,
    /// Already confirmed.
    Confirmed,
}

impl Confirmation {
    /// Map a form checkbox or CLI flag.
    #[must_use]
    pub const fn from_flag(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Pending
        }
    }
}

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Search box input.
    Search(String),
    /// Category sidebar click.
    SelectCategory(String),
    /// Price dropdown change (`all` or `min-max`).
    SetPriceBracket(String),
    /// Sort dropdown change.
    SetSort(String),
    /// Reset every catalog control.
    ResetFilters,
    /// Open a product's detail panel.
    ViewProduct(ProductId),
    /// "Add to cart" button.
    AddToCart(ProductId),
    /// Quantity stepper.
    ChangeQuantity { product_id: ProductId, delta: i64 },
    /// "Remove" button on a cart row.
    RemoveFromCart(ProductId),
    /// "Clear cart" button.
    ClearCart(Confirmation),
    /// "Checkout" button on the cart page.
    BeginCheckout,
    /// "Place order" button on the checkout page.
    PlaceOrder(Confirmation),
    /// Sign-up form.
    Signup { username: String, password: String },
    /// Login form.
    Login { username: String, password: String },
    /// Simulated third-party sign-in prompt; `None` when dismissed.
    FederatedSignIn { display_name: Option<String> },
    /// "Logout" button.
    Logout(Confirmation),
    /// Dark-mode toggle.
    ToggleDarkMode,
}

impl Action {
    /// Short action name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Search(_) => "search",
            Self::SelectCategory(_) => "select_category",
            Self::SetPriceBracket(_) => "set_price_bracket",
            Self::SetSort(_) => "set_sort",
            Self::ResetFilters => "reset_filters",
            Self::ViewProduct(_) => "view_product",
            Self::AddToCart(_) => "add_to_cart",
            Self::ChangeQuantity { .. } => "change_quantity",
            Self::RemoveFromCart(_) => "remove_from_cart",
            Self::ClearCart(_) => "clear_cart",
            Self::BeginCheckout => "begin_checkout",
            Self::PlaceOrder(_) => "place_order",
            Self::Signup { .. } => "signup",
            Self::Login { .. } => "login",
            Self::FederatedSignIn { .. } => "federated_sign_in",
            Self::Logout(_) => "logout",
            Self::ToggleDarkMode => "toggle_dark_mode",
        }
    }

    /// The same action with its confirmation granted.
    #[must_use]
    pub fn confirmed(self) -> Self {
        match self {
            Self::ClearCart(_) => Self::ClearCart(Confirmation::Confirmed),
            Self::PlaceOrder(_) => Self::PlaceOrder(Confirmation::Confirmed),
            Self::Logout(_) => Self::Logout(Confirmation::Confirmed),
            other => other,
        }
    }
}

/// Navigation destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Catalog page.
    Home,
    /// Login and sign-up page.
    Login,
    /// Cart page.
    Cart,
    /// Order summary page.
    Checkout,
}

impl Page {
    /// Storefront URL path.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/auth/login",
            Self::Cart => "/cart",
            Self::Checkout => "/checkout",
        }
    }
}

/// What accepting a confirmation prompt does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proceed {
    /// Re-dispatch this (already confirmed) action.
    Dispatch(Box<Action>),
    /// Go to a page.
    Navigate(Page),
}

/// Result of dispatching an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Re-render with this view.
    Render(View),
    /// Show a blocking message, then optionally navigate.
    Alert { message: String, then: Option<Page> },
    /// Ask the shopper before continuing.
    Confirm { prompt: String, proceed: Proceed },
    /// Go to a page.
    Navigate(Page),
    /// Nothing changed (e.g. a dismissed prompt).
    Unchanged,
}

impl Outcome {
    /// An alert with no follow-up navigation.
    #[must_use]
    pub fn alert(message: impl Into<String>) -> Self {
        Self::Alert {
            message: message.into(),
            then: None,
        }
    }

    /// Confirmation that re-dispatches `action` once granted.
    #[must_use]
    pub fn confirm(prompt: impl Into<String>, action: Action) -> Self {
        Self::Confirm {
            prompt: prompt.into(),
            proceed: Proceed::Dispatch(Box::new(action.confirmed())),
        }
    }
}
