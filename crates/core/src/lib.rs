//! Techmart Core - the shop's domain logic.
//!
//! This crate holds everything the storefront and CLI share:
//! - `storefront` - Server-rendered web shop
//! - `cli` - Terminal shop driving the same controller
//!
//! # Architecture
//!
//! The core crate does no I/O of its own. All persistence goes through the
//! [`KeyValueStore`] trait, so the same [`Storefront`] controller runs over a
//! browser session snapshot, a JSON file, or an in-memory map in tests.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, and usernames
//! - [`catalog`] - The static product list
//! - [`filter`] - Search, category, price, and sort controls
//! - [`cart`] - Cart lines and totals
//! - [`checkout`] - Checkout gate and order summary
//! - [`demo_auth`] - INSECURE simulated accounts
//! - [`store`] - Key-value persistence
//! - [`view`] - Render-ready view data
//! - [`action`] - UI actions and outcomes
//! - [`controller`] - The [`Storefront`] controller

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod action;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod controller;
pub mod demo_auth;
pub mod error;
pub mod filter;
pub mod store;
pub mod types;
pub mod view;

pub use action::{Action, Confirmation, Outcome, Page, Proceed};
pub use cart::{Cart, CartLine};
pub use catalog::{ALL_CATEGORIES, Catalog, Product};
pub use checkout::{CheckoutGate, OrderSummary};
pub use controller::{ShopState, Storefront};
pub use error::ShopError;
pub use filter::{CatalogQuery, CategoryFilter, PriceBracket, SortMode};
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use types::*;
pub use view::View;
