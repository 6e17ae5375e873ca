//! Core types for Techmart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod username;

pub use id::*;
pub use price::{CURRENCY_SYMBOL, Price};
pub use username::{Username, UsernameError};
