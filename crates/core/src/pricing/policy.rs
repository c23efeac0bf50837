//! Shop pricing policies and the read-only catalog they are looked up from.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Percent, ShopKey};

/// Errors raised when constructing a policy or catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// A fixed discount amount below zero.
    #[error("{shop}: fixed discount amount cannot be negative: {amount}")]
    NegativeFixedDiscount {
        /// Shop the policy belongs to.
        shop: ShopKey,
        /// Rejected amount.
        amount: Decimal,
    },
    /// A percentage discount outside `0..=100`.
    #[error("{shop}: discount rate must be between 0% and 100%, got {rate}")]
    RateOutOfRange {
        /// Shop the policy belongs to.
        shop: ShopKey,
        /// Rejected rate.
        rate: Percent,
    },
    /// A user-configurable policy that does not accept overrides.
    #[error("{0}: user-configurable policy must allow user overrides")]
    OverrideNotAllowed(ShopKey),
    /// Two policies for the same shop in one catalog.
    #[error("duplicate policy for shop {0}")]
    DuplicateShop(ShopKey),
}

/// How a shop's listed price maps to what we actually pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// A flat amount off every order (e.g., a ¥400 member coupon).
    FixedDiscount,
    /// A fixed percentage off (e.g., points-back treated as discount).
    PercentageDiscount,
    /// A base percentage plus whatever extra the user has negotiated.
    UserConfigurablePercentage,
}

impl CalculationMode {
    /// Stable label used in serialized output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FixedDiscount => "fixed_discount",
            Self::PercentageDiscount => "percentage_discount",
            Self::UserConfigurablePercentage => "user_configurable_percentage",
        }
    }
}

impl std::fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Discount policy for one shop.
///
/// Only the amount field that matches `mode` is read; the other one is
/// ignored rather than required to be zero, so records can carry both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopPricingPolicy {
    /// Shop this policy applies to.
    pub shop: ShopKey,
    /// Which discount rule applies.
    pub mode: CalculationMode,
    /// Amount subtracted in [`CalculationMode::FixedDiscount`].
    #[serde(default)]
    pub fixed_discount_amount: Decimal,
    /// Rate subtracted in the percentage modes.
    #[serde(default)]
    pub base_percentage_discount: Percent,
    /// Whether the settings screen lets the user add an extra percentage.
    #[serde(default)]
    pub allows_user_override: bool,
}

impl ShopPricingPolicy {
    /// A flat-amount discount policy.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::NegativeFixedDiscount`] for a negative amount.
    pub fn fixed(shop: ShopKey, amount: Decimal) -> Result<Self, PolicyError> {
        let policy = Self {
            shop,
            mode: CalculationMode::FixedDiscount,
            fixed_discount_amount: amount,
            base_percentage_discount: Percent::ZERO,
            allows_user_override: false,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// A fixed-percentage discount policy.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::RateOutOfRange`] unless `0 <= rate <= 100`.
    pub fn percentage(shop: ShopKey, rate: Percent) -> Result<Self, PolicyError> {
        let policy = Self {
            shop,
            mode: CalculationMode::PercentageDiscount,
            fixed_discount_amount: Decimal::ZERO,
            base_percentage_discount: rate,
            allows_user_override: false,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// A percentage policy that accepts a per-user extra discount.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::RateOutOfRange`] unless `0 <= base_rate <= 100`.
    pub fn user_configurable(shop: ShopKey, base_rate: Percent) -> Result<Self, PolicyError> {
        let policy = Self {
            shop,
            mode: CalculationMode::UserConfigurablePercentage,
            fixed_discount_amount: Decimal::ZERO,
            base_percentage_discount: base_rate,
            allows_user_override: true,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Check the field that is active for this policy's mode.
    ///
    /// Pricing functions never call this; it is for whoever loads policies.
    ///
    /// # Errors
    ///
    /// Returns the first constraint the active field violates.
    pub fn validate(&self) -> Result<(), PolicyError> {
        match self.mode {
            CalculationMode::FixedDiscount => {
                if self.fixed_discount_amount < Decimal::ZERO {
                    return Err(PolicyError::NegativeFixedDiscount {
                        shop: self.shop.clone(),
                        amount: self.fixed_discount_amount,
                    });
                }
            }
            CalculationMode::PercentageDiscount | CalculationMode::UserConfigurablePercentage => {
                if !self
                    .base_percentage_discount
                    .is_within(Decimal::ZERO, Decimal::ONE_HUNDRED)
                {
                    return Err(PolicyError::RateOutOfRange {
                        shop: self.shop.clone(),
                        rate: self.base_percentage_discount,
                    });
                }
                if self.mode == CalculationMode::UserConfigurablePercentage
                    && !self.allows_user_override
                {
                    return Err(PolicyError::OverrideNotAllowed(self.shop.clone()));
                }
            }
        }
        Ok(())
    }

    /// Whether the settings screen may offer an extra discount for this shop.
    #[must_use]
    pub fn accepts_user_override(&self) -> bool {
        self.mode == CalculationMode::UserConfigurablePercentage && self.allows_user_override
    }
}

/// Read-only lookup of shop policies, keyed by [`ShopKey`].
///
/// Built once by the caller (typically from a config file) and passed by
/// reference into resolution. Iteration is ordered by shop key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ShopPricingPolicy>", into = "Vec<ShopPricingPolicy>")]
pub struct PolicyCatalog {
    policies: BTreeMap<ShopKey, ShopPricingPolicy>,
}

impl PolicyCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, validating every policy.
    ///
    /// # Errors
    ///
    /// Returns the first invalid policy's error, or
    /// [`PolicyError::DuplicateShop`] if a shop appears twice.
    pub fn from_policies(
        policies: impl IntoIterator<Item = ShopPricingPolicy>,
    ) -> Result<Self, PolicyError> {
        let mut catalog = BTreeMap::new();
        for policy in policies {
            policy.validate()?;
            if catalog.contains_key(&policy.shop) {
                return Err(PolicyError::DuplicateShop(policy.shop));
            }
            catalog.insert(policy.shop.clone(), policy);
        }
        Ok(Self { policies: catalog })
    }

    /// Policy for `shop`, if one is configured.
    #[must_use]
    pub fn get(&self, shop: &ShopKey) -> Option<&ShopPricingPolicy> {
        self.policies.get(shop)
    }

    /// All policies in shop-key order.
    pub fn iter(&self) -> impl Iterator<Item = &ShopPricingPolicy> {
        self.policies.values()
    }

    /// Number of shops in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Whether the catalog has no shops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl TryFrom<Vec<ShopPricingPolicy>> for PolicyCatalog {
    type Error = PolicyError;

    fn try_from(policies: Vec<ShopPricingPolicy>) -> Result<Self, Self::Error> {
        Self::from_policies(policies)
    }
}

impl From<PolicyCatalog> for Vec<ShopPricingPolicy> {
    fn from(catalog: PolicyCatalog) -> Self {
        catalog.policies.into_values().collect()
    }
}
