//! Per-shop extra discount percentages set by the user.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::policy::ShopPricingPolicy;
use crate::types::{Percent, ShopKey};

/// Largest extra discount a user may configure for a shop, in points.
pub const MAX_USER_DISCOUNT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Errors raised when setting an override.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverrideError {
    /// Override outside `0..=50`.
    #[error("{shop}: extra discount must be between 0% and 50%, got {rate}")]
    OutOfRange {
        /// Shop the override was for.
        shop: ShopKey,
        /// Rejected rate.
        rate: Percent,
    },
    /// The shop's policy does not take user overrides.
    #[error("{0}: shop does not accept a user discount")]
    NotAccepted(ShopKey),
}

/// Extra discount percentages keyed by shop.
///
/// Resolution reads this map as-is: it trusts every stored value to lie in
/// `0..=50`. [`Self::set`] and deserialization are where that range is
/// enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<ShopKey, Percent>",
    into = "BTreeMap<ShopKey, Percent>"
)]
pub struct UserDiscountOverrides {
    rates: BTreeMap<ShopKey, Percent>,
}

impl UserDiscountOverrides {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra discount for `shop`, zero when none is set.
    #[must_use]
    pub fn rate_for(&self, shop: &ShopKey) -> Percent {
        self.rates.get(shop).copied().unwrap_or(Percent::ZERO)
    }

    /// Set the extra discount for `shop`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideError::OutOfRange`] unless `0 <= rate <= 50`.
    pub fn set(&mut self, shop: ShopKey, rate: Percent) -> Result<Option<Percent>, OverrideError> {
        check_range(&shop, rate)?;
        Ok(self.rates.insert(shop, rate))
    }

    /// Set the extra discount for the shop `policy` belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideError::NotAccepted`] if the policy does not take
    /// overrides, otherwise as [`Self::set`].
    pub fn set_for_policy(
        &mut self,
        policy: &ShopPricingPolicy,
        rate: Percent,
    ) -> Result<Option<Percent>, OverrideError> {
        if !policy.accepts_user_override() {
            return Err(OverrideError::NotAccepted(policy.shop.clone()));
        }
        self.set(policy.shop.clone(), rate)
    }

    /// Clear the override for `shop`.
    pub fn remove(&mut self, shop: &ShopKey) -> Option<Percent> {
        self.rates.remove(shop)
    }

    /// All overrides in shop-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ShopKey, Percent)> {
        self.rates.iter().map(|(shop, rate)| (shop, *rate))
    }

    /// Number of shops with an override.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether no overrides are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

fn check_range(shop: &ShopKey, rate: Percent) -> Result<(), OverrideError> {
    if rate.is_within(Decimal::ZERO, MAX_USER_DISCOUNT) {
        Ok(())
    } else {
        Err(OverrideError::OutOfRange {
            shop: shop.clone(),
            rate,
        })
    }
}

impl TryFrom<BTreeMap<ShopKey, Percent>> for UserDiscountOverrides {
    type Error = OverrideError;

    fn try_from(rates: BTreeMap<ShopKey, Percent>) -> Result<Self, Self::Error> {
        for (shop, rate) in &rates {
            check_range(shop, *rate)?;
        }
        Ok(Self { rates })
    }
}

impl From<UserDiscountOverrides> for BTreeMap<ShopKey, Percent> {
    fn from(overrides: UserDiscountOverrides) -> Self {
        overrides.rates
    }
}
