//! Integration tests for resale pricing.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p resale-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cost_basis` - Shop policy scenarios through the public resolver API
//! - `profitability` - Amazon fee scenarios and degenerate denominators
//! - `pricing_laws` - Invariants checked over grids of inputs
//!
//! This crate exposes shared fixtures only.

use rust_decimal::Decimal;

use resale_core::ShopKey;
use resale_core::pricing::{PolicyCatalog, ShopPricingPolicy};

/// Policy catalog in the same YAML shape the CLI loads.
pub const CATALOG_YAML: &str = r"
- shop: apparel-Moonlight
  mode: fixed_discount
  fixed_discount_amount: 400
- shop: books-Kanda
  mode: percentage_discount
  base_percentage_discount: 10
- shop: cosmetics-Sakura
  mode: user_configurable_percentage
  base_percentage_discount: 20
  allows_user_override: true
";

/// Parse [`CATALOG_YAML`].
///
/// # Panics
///
/// Panics if the fixture is invalid.
#[must_use]
#[allow(clippy::expect_used)]
pub fn catalog() -> PolicyCatalog {
    serde_yaml::from_str(CATALOG_YAML).expect("fixture catalog is valid")
}

/// Shop key from its `category-shopName` form.
///
/// # Panics
///
/// Panics if `key` is malformed.
#[must_use]
#[allow(clippy::expect_used)]
pub fn shop(key: &str) -> ShopKey {
    ShopKey::parse(key).expect("fixture shop key is valid")
}

/// Look up a fixture policy.
///
/// # Panics
///
/// Panics if the shop is not in the fixture catalog.
#[must_use]
#[allow(clippy::expect_used)]
pub fn policy(key: &str) -> ShopPricingPolicy {
    catalog()
        .get(&shop(key))
        .cloned()
        .expect("fixture shop is in catalog")
}

/// Whole-yen prices from 0 to `max` in steps of `step`.
pub fn yen_range(max: i64, step: usize) -> impl Iterator<Item = Decimal> {
    (0..=max).step_by(step).map(Decimal::from)
}
