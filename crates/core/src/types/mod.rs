//! Core types for resale pricing.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod percent;
pub mod price;

pub use id::{Asin, AsinError, ShopKey, ShopKeyError};
pub use percent::{Percent, PercentError};
pub use price::{CurrencyCode, Price};
