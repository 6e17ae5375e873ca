//! Catalog and cart controller.
//!
//! [`Storefront`] owns the whole shop state and the key-value store it is
//! persisted to. Each mutation writes the changed record through to the
//! store before the new state becomes visible, so a failed write leaves the
//! controller exactly as it was.

use crate::action::{Action, Confirmation, Outcome, Page, Proceed};
use crate::cart::{Cart, CartLine};
use crate::catalog::Catalog;
use crate::checkout::{CheckoutGate, LOGIN_REQUIRED_PROMPT, ORDER_PLACED_MESSAGE, OrderSummary};
use crate::demo_auth::{AccountBook, UserAccount, federated_display_name};
use crate::error::ShopError;
use crate::filter::{CatalogQuery, CategoryFilter, PriceBracket, SortMode, filter_products};
use crate::store::{KeyValueStore, keys, load_record, save_record};
use crate::types::ProductId;
use crate::view::{AuthArea, CartBadge, CartView, CatalogView, ProductDetail, View};

/// Prompt shown before emptying the cart.
pub const CLEAR_CART_PROMPT: &str = "Clear all items?";

/// Prompt shown before ending the session.
pub const LOGOUT_PROMPT: &str = "Logout?";

/// Everything the shop knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopState {
    /// Products on offer.
    pub catalog: Catalog,
    /// Current catalog controls (not persisted).
    pub query: CatalogQuery,
    /// Active cart.
    pub cart: Cart,
    /// Demo accounts.
    pub accounts: AccountBook,
    /// Signed-in display name.
    pub current_user: Option<String>,
    /// Dark-mode preference.
    pub dark: bool,
}

impl ShopState {
    /// Hydrate every record from `store`, using defaults for anything
    /// missing or malformed.
    pub fn hydrate<S: KeyValueStore + ?Sized>(catalog: Catalog, store: &S) -> Self {
        let lines: Vec<CartLine> = load_record(store, keys::CART, Vec::new());
        let accounts: Vec<UserAccount> = load_record(store, keys::USERS, Vec::new());

        Self {
            catalog,
            query: CatalogQuery::default(),
            cart: Cart::from_lines(lines),
            accounts: AccountBook::new(accounts),
            current_user: load_record(store, keys::CURRENT_USER, None),
            dark: load_record(store, keys::DARK, false),
        }
    }
}

/// The shop controller.
#[derive(Debug)]
pub struct Storefront<S> {
    state: ShopState,
    store: S,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Build a controller over `store`, hydrating all persisted records.
    pub fn load(catalog: Catalog, store: S) -> Self {
        let state = ShopState::hydrate(catalog, &store);
        tracing::debug!(
            cart_lines = state.cart.lines().len(),
            accounts = state.accounts.accounts().len(),
            signed_in = state.current_user.is_some(),
            "Shop state hydrated"
        );
        Self { state, store }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ShopState {
        &self.state
    }

    /// Borrow the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the backing store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Replace every catalog control at once.
    pub fn set_query(&mut self, query: CatalogQuery) {
        self.state.query = query;
    }

    /// Signed-in display name.
    #[must_use]
    pub fn current_user(&self) -> Option<&str> {
        self.state.current_user.as_deref()
    }

    /// Dark-mode preference.
    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.state.dark
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Filtered product grid for the current query.
    #[must_use]
    pub fn catalog_view(&self) -> CatalogView {
        let products = filter_products(&self.state.catalog, &self.state.query);
        CatalogView::new(&self.state.catalog, &products, &self.state.query)
    }

    /// Detail panel for one product.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::UnknownProduct` if the ID is not in the catalog.
    pub fn product_detail(&self, product_id: ProductId) -> Result<ProductDetail, ShopError> {
        self.state
            .catalog
            .find(product_id)
            .map(ProductDetail::from)
            .ok_or(ShopError::UnknownProduct(product_id))
    }

    /// Cart page contents.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::new(&self.state.cart, &self.state.catalog)
    }

    /// Cart badge.
    #[must_use]
    pub fn badge(&self) -> CartBadge {
        CartBadge::from(&self.state.cart)
    }

    /// Header account area.
    #[must_use]
    pub fn auth_area(&self) -> AuthArea {
        AuthArea::from_session(self.current_user())
    }

    /// Checkout page summary.
    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::new(&self.state.cart, &self.state.catalog)
    }

    /// Whether the shopper may open the checkout page.
    #[must_use]
    pub fn checkout_gate(&self) -> CheckoutGate {
        CheckoutGate::evaluate(self.current_user(), &self.state.cart)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProduct` for IDs outside the catalog and `Store` if
    /// the cart cannot be persisted.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> Result<CartBadge, ShopError> {
        if self.state.catalog.find(product_id).is_none() {
            return Err(ShopError::UnknownProduct(product_id));
        }

        let mut cart = self.state.cart.clone();
        cart.add(product_id);
        self.commit_cart(cart)?;

        tracing::info!(%product_id, "Added to cart");
        Ok(self.badge())
    }

    /// Adjust a cart line by `delta`, removing it at zero or below.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the cart cannot be persisted.
    pub fn change_quantity(
        &mut self,
        product_id: ProductId,
        delta: i64,
    ) -> Result<CartBadge, ShopError> {
        let mut cart = self.state.cart.clone();
        if cart.change_quantity(product_id, delta) {
            self.commit_cart(cart)?;
            tracing::info!(%product_id, delta, "Changed cart quantity");
        }
        Ok(self.badge())
    }

    /// Remove a product's line.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the cart cannot be persisted.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Result<CartBadge, ShopError> {
        let mut cart = self.state.cart.clone();
        cart.remove(product_id);
        self.commit_cart(cart)?;

        tracing::info!(%product_id, "Removed from cart");
        Ok(self.badge())
    }

    /// Empty the cart. Callers are expected to have confirmed first.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the cart cannot be persisted.
    pub fn clear_cart(&mut self) -> Result<(), ShopError> {
        self.commit_cart(Cart::new())?;
        tracing::info!("Cleared cart");
        Ok(())
    }

    /// Place the demo order: empty the cart and keep no record.
    ///
    /// Returns the summary of what was "ordered".
    ///
    /// # Errors
    ///
    /// Returns `EmptyCart` if there is nothing to order and `Store` if the
    /// emptied cart cannot be persisted.
    pub fn place_order(&mut self) -> Result<OrderSummary, ShopError> {
        if self.state.cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }

        let summary = self.order_summary();
        self.commit_cart(Cart::new())?;

        tracing::info!(total = %summary.total, "Demo order placed");
        Ok(summary)
    }

    // =========================================================================
    // Session (insecure demo auth)
    // =========================================================================

    /// Create a demo account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns `Auth` for rejected input and `Store` if persisting fails.
    pub fn signup(&mut self, username: &str, password: &str) -> Result<String, ShopError> {
        let mut accounts = self.state.accounts.clone();
        let username = accounts.register(username, password)?.into_inner();

        let previous_users = self.store.get(keys::USERS)?;
        save_record(&mut self.store, keys::USERS, &accounts)?;
        if let Err(e) = self.commit_session(Some(username.clone())) {
            self.restore_record(keys::USERS, previous_users);
            return Err(e);
        }
        self.state.accounts = accounts;

        tracing::info!(username = %username, "Signed up");
        Ok(username)
    }

    /// Sign in with an exact username and password.
    ///
    /// # Errors
    ///
    /// Returns `Auth(InvalidCredentials)` for any mismatch and `Store` if
    /// persisting fails.
    pub fn login(&mut self, username: &str, password: &str) -> Result<String, ShopError> {
        let username = self
            .state
            .accounts
            .authenticate(username, password)?
            .username
            .clone();

        self.commit_session(Some(username.clone()))?;

        tracing::info!(username = %username, "Logged in");
        Ok(username)
    }

    /// Simulated third-party sign-in.
    ///
    /// Returns `None` and changes nothing when the prompt was dismissed.
    ///
    /// # Errors
    ///
    /// Returns `Store` if persisting fails.
    pub fn federated_sign_in(
        &mut self,
        display_name: Option<&str>,
    ) -> Result<Option<String>, ShopError> {
        let Some(name) = federated_display_name(display_name) else {
            return Ok(None);
        };

        self.commit_session(Some(name.clone()))?;

        tracing::info!(display_name = %name, "Signed in via simulated provider");
        Ok(Some(name))
    }

    /// End the session. Callers are expected to have confirmed first.
    ///
    /// # Errors
    ///
    /// Returns `Store` if persisting fails.
    pub fn logout(&mut self) -> Result<(), ShopError> {
        self.commit_session(None)?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Flip the dark-mode preference and return the new value.
    ///
    /// # Errors
    ///
    /// Returns `Store` if persisting fails.
    pub fn toggle_dark_mode(&mut self) -> Result<bool, ShopError> {
        let dark = !self.state.dark;
        save_record(&mut self.store, keys::DARK, &dark)?;
        self.state.dark = dark;
        Ok(dark)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Handle one UI action.
    ///
    /// Failures are turned into [`Outcome::Alert`] with the error's
    /// user-facing message and leave the state unchanged.
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let name = action.name();
        match self.handle(action) {
            Ok(outcome) => outcome,
            Err(e) => {
                if matches!(e, ShopError::Store(_)) {
                    tracing::error!(action = name, error = %e, "Action failed");
                } else {
                    tracing::warn!(action = name, error = %e, "Action rejected");
                }
                Outcome::alert(e.user_message())
            }
        }
    }

    fn handle(&mut self, action: Action) -> Result<Outcome, ShopError> {
        let outcome = match action {
            Action::Search(text) => {
                self.state.query.text = text;
                self.render_catalog()
            }
            Action::SelectCategory(category) => {
                self.state.query.category = CategoryFilter::from(category.as_str());
                self.render_catalog()
            }
            Action::SetPriceBracket(bracket) => {
                self.state.query.price = bracket.parse::<PriceBracket>()?;
                self.render_catalog()
            }
            Action::SetSort(sort) => {
                self.state.query.sort = sort.parse::<SortMode>()?;
                self.render_catalog()
            }
            Action::ResetFilters => {
                self.state.query.reset();
                self.render_catalog()
            }
            Action::ViewProduct(product_id) => {
                Outcome::Render(View::Product(self.product_detail(product_id)?))
            }
            Action::AddToCart(product_id) => {
                Outcome::Render(View::Badge(self.add_to_cart(product_id)?))
            }
            Action::ChangeQuantity { product_id, delta } => {
                self.change_quantity(product_id, delta)?;
                self.render_cart()
            }
            Action::RemoveFromCart(product_id) => {
                self.remove_from_cart(product_id)?;
                self.render_cart()
            }
            Action::ClearCart(Confirmation::Pending) => {
                Outcome::confirm(CLEAR_CART_PROMPT, Action::ClearCart(Confirmation::Pending))
            }
            Action::ClearCart(Confirmation::Confirmed) => {
                self.clear_cart()?;
                self.render_cart()
            }
            Action::BeginCheckout => match self.checkout_gate() {
                CheckoutGate::LoginRequired => Outcome::Confirm {
                    prompt: LOGIN_REQUIRED_PROMPT.to_string(),
                    proceed: Proceed::Navigate(Page::Login),
                },
                CheckoutGate::EmptyCart => return Err(ShopError::EmptyCart),
                CheckoutGate::Ready => Outcome::Navigate(Page::Checkout),
            },
            Action::PlaceOrder(confirmation) => {
                if self.state.cart.is_empty() {
                    return Err(ShopError::EmptyCart);
                }
                match confirmation {
                    Confirmation::Pending => Outcome::confirm(
                        self.order_summary().place_order_prompt(),
                        Action::PlaceOrder(Confirmation::Pending),
                    ),
                    Confirmation::Confirmed => {
                        self.place_order()?;
                        Outcome::Alert {
                            message: ORDER_PLACED_MESSAGE.to_string(),
                            then: Some(Page::Home),
                        }
                    }
                }
            }
            Action::Signup { username, password } => {
                let username = self.signup(&username, &password)?;
                Outcome::Alert {
                    message: format!("Signed up & logged in as {username}"),
                    then: Some(Page::Home),
                }
            }
            Action::Login { username, password } => {
                self.login(&username, &password)?;
                Outcome::Navigate(Page::Home)
            }
            Action::FederatedSignIn { display_name } => {
                match self.federated_sign_in(display_name.as_deref())? {
                    Some(name) => Outcome::Alert {
                        message: format!("Signed in as {name} (simulated)"),
                        then: Some(Page::Home),
                    },
                    None => Outcome::Unchanged,
                }
            }
            Action::Logout(Confirmation::Pending) => {
                Outcome::confirm(LOGOUT_PROMPT, Action::Logout(Confirmation::Pending))
            }
            Action::Logout(Confirmation::Confirmed) => {
                self.logout()?;
                Outcome::Navigate(Page::Home)
            }
            Action::ToggleDarkMode => Outcome::Render(View::Theme {
                dark: self.toggle_dark_mode()?,
            }),
        };
        Ok(outcome)
    }

    fn render_catalog(&self) -> Outcome {
        Outcome::Render(View::Catalog(self.catalog_view()))
    }

    fn render_cart(&self) -> Outcome {
        Outcome::Render(View::Cart(self.cart_view()))
    }

    fn commit_cart(&mut self, cart: Cart) -> Result<(), ShopError> {
        save_record(&mut self.store, keys::CART, &cart)?;
        self.state.cart = cart;
        Ok(())
    }

    fn commit_session(&mut self, current_user: Option<String>) -> Result<(), ShopError> {
        match &current_user {
            Some(name) => save_record(&mut self.store, keys::CURRENT_USER, name)?,
            None => self.store.remove(keys::CURRENT_USER)?,
        }
        self.state.current_user = current_user;
        Ok(())
    }

    /// Put back a record overwritten earlier in a failed mutation.
    fn restore_record(&mut self, key: &str, previous: Option<String>) {
        let restored = match previous {
            Some(raw) => self.store.set(key, raw),
            None => self.store.remove(key),
        };
        if let Err(e) = restored {
            tracing::error!(key, error = %e, "Failed to roll back record");
        }
    }
}
