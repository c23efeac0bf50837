//! Cost basis resolution: what we actually pay a shop for a product.
//!
//! The listed (or sale) price on a storefront is rarely the acquisition cost.
//! Each shop's [`ShopPricingPolicy`] describes how to get from one to the
//! other, and [`DiscountBreakdown`] is the only place that arithmetic lives.
//! Both the resolved cost and every displayed discount figure come from it,
//! so they cannot disagree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::overrides::UserDiscountOverrides;
use crate::pricing::policy::{CalculationMode, PolicyCatalog, ShopPricingPolicy};
use crate::types::{Percent, ShopKey};

/// How much was taken off the base price, and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountBreakdown {
    /// Policy mode that produced the discount; `None` when no policy applied.
    pub mode: Option<CalculationMode>,
    /// Policy's base rate (zero outside the percentage modes).
    pub base_rate: Percent,
    /// User override rate that was applied (zero unless user-configurable).
    pub user_rate: Percent,
    /// Amount taken off by the policy itself.
    pub base_amount: Decimal,
    /// Amount taken off by the user override.
    pub user_amount: Decimal,
    /// `base_amount + user_amount`.
    pub total_amount: Decimal,
}

impl DiscountBreakdown {
    /// No discount at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            mode: None,
            base_rate: Percent::ZERO,
            user_rate: Percent::ZERO,
            base_amount: Decimal::ZERO,
            user_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
        }
    }

    /// Flat amount off, never taking the cost below zero.
    fn fixed(base_price: Decimal, amount: Decimal) -> Self {
        let cost = base_price.saturating_sub(amount).max(Decimal::ZERO);
        let applied = base_price.saturating_sub(cost);
        Self {
            mode: Some(CalculationMode::FixedDiscount),
            base_amount: applied,
            total_amount: applied,
            ..Self::none()
        }
    }

    /// Percentage off, unclamped.
    fn percentage(
        mode: CalculationMode,
        base_price: Decimal,
        base_rate: Percent,
        user_rate: Percent,
    ) -> Self {
        let base_amount = base_rate.of(base_price);
        let user_amount = user_rate.of(base_price);
        Self {
            mode: Some(mode),
            base_rate,
            user_rate,
            base_amount,
            user_amount,
            total_amount: base_amount.saturating_add(user_amount),
        }
    }

    /// Combined percentage applied (`base_rate + user_rate`).
    #[must_use]
    pub fn total_rate(&self) -> Percent {
        self.base_rate + self.user_rate
    }
}

impl Default for DiscountBreakdown {
    fn default() -> Self {
        Self::none()
    }
}

/// A resolved acquisition cost together with how it was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBasis {
    /// Sale price if the listing had one, otherwise the listed price.
    pub base_price: Decimal,
    /// What we pay: `base_price - breakdown.total_amount`.
    pub cost: Decimal,
    /// Discount applied to `base_price`.
    pub breakdown: DiscountBreakdown,
}

impl CostBasis {
    /// A cost with no shop discount behind it, e.g. a manually entered cost.
    #[must_use]
    pub const fn undiscounted(cost: Decimal) -> Self {
        Self {
            base_price: cost,
            cost,
            breakdown: DiscountBreakdown::none(),
        }
    }

    fn from_breakdown(base_price: Decimal, breakdown: DiscountBreakdown) -> Self {
        Self {
            base_price,
            cost: base_price.saturating_sub(breakdown.total_amount),
            breakdown,
        }
    }
}

/// Resolve the cost basis of a product under `policy`.
///
/// The sale price, when present, is the base price even if it is higher than
/// the listed price. Upstream records are taken as they come.
///
/// - [`CalculationMode::FixedDiscount`]: `max(0, base - amount)`.
/// - [`CalculationMode::PercentageDiscount`]: `base * (1 - rate/100)`.
/// - [`CalculationMode::UserConfigurablePercentage`]:
///   `base * (1 - (rate + override)/100)`, with a missing override read as 0.
///   Not clamped; a combined rate above 100 yields a negative cost.
#[must_use]
pub fn resolve_cost_basis(
    listed_price: Decimal,
    sale_price: Option<Decimal>,
    policy: &ShopPricingPolicy,
    overrides: &UserDiscountOverrides,
) -> CostBasis {
    if let Some(sale) = sale_price.filter(|sale| *sale > listed_price) {
        tracing::debug!(
            shop = %policy.shop,
            listed = %listed_price,
            sale = %sale,
            "Sale price above listed price, using it as the base price anyway"
        );
    }
    let base_price = sale_price.unwrap_or(listed_price);

    let breakdown = match policy.mode {
        CalculationMode::FixedDiscount => {
            DiscountBreakdown::fixed(base_price, policy.fixed_discount_amount)
        }
        CalculationMode::PercentageDiscount => DiscountBreakdown::percentage(
            policy.mode,
            base_price,
            policy.base_percentage_discount,
            Percent::ZERO,
        ),
        CalculationMode::UserConfigurablePercentage => DiscountBreakdown::percentage(
            policy.mode,
            base_price,
            policy.base_percentage_discount,
            overrides.rate_for(&policy.shop),
        ),
    };

    CostBasis::from_breakdown(base_price, breakdown)
}

/// Resolve just the acquisition cost. See [`resolve_cost_basis`].
#[must_use]
pub fn resolve_cost(
    listed_price: Decimal,
    sale_price: Option<Decimal>,
    policy: &ShopPricingPolicy,
    overrides: &UserDiscountOverrides,
) -> Decimal {
    resolve_cost_basis(listed_price, sale_price, policy, overrides).cost
}

/// Resolves costs by shop against a borrowed catalog and override set.
#[derive(Debug, Clone, Copy)]
pub struct CostBasisResolver<'a> {
    catalog: &'a PolicyCatalog,
    overrides: &'a UserDiscountOverrides,
}

impl<'a> CostBasisResolver<'a> {
    /// Bind a catalog and the user's overrides.
    #[must_use]
    pub const fn new(catalog: &'a PolicyCatalog, overrides: &'a UserDiscountOverrides) -> Self {
        Self { catalog, overrides }
    }

    /// Policy configured for `shop`.
    #[must_use]
    pub fn policy(&self, shop: &ShopKey) -> Option<&'a ShopPricingPolicy> {
        self.catalog.get(shop)
    }

    /// Resolve the cost basis for a product from `shop`.
    ///
    /// A shop with no policy in the catalog gets no discount: the base price
    /// is the cost.
    #[must_use]
    pub fn resolve(
        &self,
        shop: &ShopKey,
        listed_price: Decimal,
        sale_price: Option<Decimal>,
    ) -> CostBasis {
        match self.policy(shop) {
            Some(policy) => resolve_cost_basis(listed_price, sale_price, policy, self.overrides),
            None => {
                tracing::debug!(%shop, "No pricing policy for shop, using base price as cost");
                CostBasis::undiscounted(sale_price.unwrap_or(listed_price))
            }
        }
    }
}
