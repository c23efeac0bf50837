//! Resale Core - Cost basis and profitability engine.
//!
//! This crate answers one question for a product scraped from a shop
//! storefront: if we buy it at that shop and resell it on Amazon, what do we
//! make?
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. Policies, overrides, and fee snapshots
//! are handed in by the caller as already-parsed values, and every function
//! is deterministic over its inputs, so rows can be evaluated from any number
//! of threads without coordination.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for prices, percentages, ASINs, and shop keys
//! - [`pricing`] - Cost basis resolution, profitability math, and ranking
//!
//! # Example
//!
//! ```
//! use resale_core::pricing::{
//!     AmazonListingFees, Profitability, ShopPricingPolicy, UserDiscountOverrides,
//!     compute_profitability, resolve_cost_basis,
//! };
//! use resale_core::{Percent, ShopKey};
//! use rust_decimal::Decimal;
//!
//! let shop = ShopKey::new("apparel", "Moonlight").unwrap();
//! let policy = ShopPricingPolicy::fixed(shop, Decimal::from(400)).unwrap();
//! let overrides = UserDiscountOverrides::new();
//!
//! let basis = resolve_cost_basis(
//!     Decimal::from(2750),
//!     Some(Decimal::from(2200)),
//!     &policy,
//!     &overrides,
//! );
//! assert_eq!(basis.cost, Decimal::from(1800));
//!
//! let fees = AmazonListingFees::new(Decimal::from(2500))
//!     .with_referral_fee(Percent::from(15))
//!     .with_fulfillment_fee(Decimal::from(350));
//!
//! let Profitability::Complete(result) = compute_profitability(&fees, &basis) else {
//!     panic!("fees are complete");
//! };
//! assert_eq!(result.profit, Decimal::from(-25));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pricing;
pub mod types;

pub use types::*;
