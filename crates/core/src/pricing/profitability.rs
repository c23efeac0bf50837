//! Resale profitability: what is left after Amazon's fees and our cost.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pricing::cost_basis::{CostBasis, CostBasisResolver, DiscountBreakdown};
use crate::types::{Percent, ShopKey};

/// Commercial terms of one ASIN as last entered or fetched.
///
/// `None` fees mean "not known yet", which is different from a zero fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmazonListingFees {
    /// Price the item sells for on Amazon.
    pub listing_price: Decimal,
    /// Referral fee as a percentage of the listing price.
    #[serde(default)]
    pub referral_fee_percent: Option<Percent>,
    /// Per-unit FBA fulfillment fee.
    #[serde(default)]
    pub fulfillment_fee: Option<Decimal>,
    /// Estimated monthly sales velocity.
    #[serde(default)]
    pub monthly_units_sold: Option<u32>,
}

impl AmazonListingFees {
    /// Fees for a listing price with nothing else known yet.
    #[must_use]
    pub const fn new(listing_price: Decimal) -> Self {
        Self {
            listing_price,
            referral_fee_percent: None,
            fulfillment_fee: None,
            monthly_units_sold: None,
        }
    }

    /// Set the referral fee.
    #[must_use]
    pub fn with_referral_fee(mut self, percent: Percent) -> Self {
        self.referral_fee_percent = Some(percent);
        self
    }

    /// Set the fulfillment fee.
    #[must_use]
    pub fn with_fulfillment_fee(mut self, fee: Decimal) -> Self {
        self.fulfillment_fee = Some(fee);
        self
    }

    /// Set the monthly sales estimate.
    #[must_use]
    pub fn with_monthly_units_sold(mut self, units: u32) -> Self {
        self.monthly_units_sold = Some(units);
        self
    }

    /// What is missing before profitability can be computed, in a fixed order.
    #[must_use]
    pub fn missing_data(&self) -> Vec<IncompleteReason> {
        let mut missing = Vec::new();
        if self.listing_price.is_zero() {
            missing.push(IncompleteReason::ZeroListingPrice);
        }
        if self.referral_fee_percent.is_none() {
            missing.push(IncompleteReason::MissingReferralFee);
        }
        if self.fulfillment_fee.is_none() {
            missing.push(IncompleteReason::MissingFulfillmentFee);
        }
        missing
    }
}

/// Why a listing's profitability could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncompleteReason {
    /// The Amazon listing price is zero, i.e. not entered.
    ZeroListingPrice,
    /// The referral fee percentage is unknown.
    MissingReferralFee,
    /// The fulfillment fee is unknown.
    MissingFulfillmentFee,
}

impl std::fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroListingPrice => write!(f, "listing price"),
            Self::MissingReferralFee => write!(f, "referral fee"),
            Self::MissingFulfillmentFee => write!(f, "fulfillment fee"),
        }
    }
}

/// Profit figures for one listing at one cost basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitabilityResult {
    /// Acquisition cost the figures are relative to.
    pub resolved_cost: Decimal,
    /// Listing price minus referral and fulfillment fees. May be negative.
    pub net_proceeds: Decimal,
    /// `net_proceeds - resolved_cost`. Negative is a loss.
    pub profit: Decimal,
    /// Profit as a percentage of net proceeds; zero when net proceeds are zero.
    pub profit_margin_percent: Percent,
    /// Profit as a percentage of cost; zero when cost is zero.
    pub roi_percent: Percent,
    /// `profit * monthly_units_sold`, when sales velocity is known.
    pub estimated_monthly_profit: Option<Decimal>,
    /// Discount that produced `resolved_cost`.
    pub discount_breakdown: DiscountBreakdown,
}

/// Outcome of [`compute_profitability`].
///
/// `Incomplete` is routine: it is what a freshly linked ASIN looks like until
/// someone fills in the Amazon side. Callers render it as "needs input".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Profitability {
    /// All inputs were present.
    Complete(ProfitabilityResult),
    /// Amazon-side data is missing.
    Incomplete {
        /// What still needs to be entered.
        missing: Vec<IncompleteReason>,
    },
}

impl Profitability {
    /// The result, if complete.
    #[must_use]
    pub const fn result(&self) -> Option<&ProfitabilityResult> {
        match self {
            Self::Complete(result) => Some(result),
            Self::Incomplete { .. } => None,
        }
    }

    /// Whether Amazon-side data is still missing.
    #[must_use]
    pub const fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete { .. })
    }
}

/// Compute profitability of selling at `fees` what we bought at `basis`.
///
/// Returns [`Profitability::Incomplete`] exactly when the referral fee is
/// unknown, the fulfillment fee is unknown, or the listing price is zero.
/// Otherwise:
///
/// - `net_proceeds = listing_price - listing_price * referral/100 - fulfillment`
/// - `profit = net_proceeds - cost`
/// - `margin = profit / net_proceeds * 100`, or 0 if `net_proceeds == 0`
/// - `roi = profit / cost * 100`, or 0 if `cost == 0`
///
/// Figures outside the `Decimal` range saturate instead of panicking.
#[must_use]
pub fn compute_profitability(fees: &AmazonListingFees, basis: &CostBasis) -> Profitability {
    let (Some(referral), Some(fulfillment)) = (fees.referral_fee_percent, fees.fulfillment_fee)
    else {
        return incomplete(fees);
    };
    if fees.listing_price.is_zero() {
        return incomplete(fees);
    }

    let cost = basis.cost;
    let net_proceeds = fees
        .listing_price
        .saturating_sub(referral.of(fees.listing_price))
        .saturating_sub(fulfillment);
    let profit = net_proceeds.saturating_sub(cost);

    Profitability::Complete(ProfitabilityResult {
        resolved_cost: cost,
        net_proceeds,
        profit,
        profit_margin_percent: Percent::ratio_or_zero(profit, net_proceeds),
        roi_percent: Percent::ratio_or_zero(profit, cost),
        estimated_monthly_profit: fees
            .monthly_units_sold
            .map(|units| profit.saturating_mul(Decimal::from(units))),
        discount_breakdown: basis.breakdown,
    })
}

fn incomplete(fees: &AmazonListingFees) -> Profitability {
    let missing = fees.missing_data();
    debug!(
        listing_price = %fees.listing_price,
        missing = ?missing,
        "Fee data incomplete, skipping profitability"
    );
    Profitability::Incomplete { missing }
}

/// A source product evaluated against its Amazon listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// What we would pay the shop.
    pub cost_basis: CostBasis,
    /// What we would make on Amazon.
    pub profitability: Profitability,
}

/// Resolve the cost for a product from `shop` and compute its profitability.
#[must_use]
pub fn evaluate(
    resolver: &CostBasisResolver<'_>,
    shop: &ShopKey,
    listed_price: Decimal,
    sale_price: Option<Decimal>,
    fees: &AmazonListingFees,
) -> Evaluation {
    let cost_basis = resolver.resolve(shop, listed_price, sale_price);
    let profitability = compute_profitability(fees, &cost_basis);
    Evaluation {
        cost_basis,
        profitability,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::pricing::{PolicyCatalog, ShopPricingPolicy, UserDiscountOverrides};

    fn complete_fees() -> AmazonListingFees {
        AmazonListingFees::new(dec!(2500))
            .with_referral_fee(Percent::from(15))
            .with_fulfillment_fee(dec!(350))
    }

    #[test]
    fn test_loss_making_listing() {
        let outcome = compute_profitability(&complete_fees(), &CostBasis::undiscounted(dec!(1800)));
        let result = outcome.result().unwrap();

        assert_eq!(result.net_proceeds, dec!(1775));
        assert_eq!(result.profit, dec!(-25));
        assert_eq!(result.profit_margin_percent.value().round_dp(2), dec!(-1.41));
        assert_eq!(result.roi_percent.value().round_dp(2), dec!(-1.39));
        assert_eq!(result.estimated_monthly_profit, None);
    }

    #[test]
    fn test_profitable_listing_with_velocity() {
        let fees = complete_fees().with_monthly_units_sold(30);
        let outcome = compute_profitability(&fees, &CostBasis::undiscounted(dec!(1275)));
        let result = outcome.result().unwrap();

        assert_eq!(result.profit, dec!(500));
        assert_eq!(result.estimated_monthly_profit, Some(dec!(15000)));
        assert_eq!(result.roi_percent.value().round_dp(2), dec!(39.22));
    }

    #[test]
    fn test_missing_referral_fee_is_incomplete() {
        let fees = AmazonListingFees::new(dec!(2500)).with_fulfillment_fee(dec!(350));
        let outcome = compute_profitability(&fees, &CostBasis::undiscounted(dec!(1800)));
        assert_eq!(
            outcome,
            Profitability::Incomplete {
                missing: vec![IncompleteReason::MissingReferralFee]
            }
        );
    }

    #[test]
    fn test_missing_fulfillment_fee_is_incomplete() {
        let fees = AmazonListingFees::new(dec!(2500)).with_referral_fee(Percent::from(15));
        let outcome = compute_profitability(&fees, &CostBasis::undiscounted(dec!(1800)));
        assert!(outcome.is_incomplete());
    }

    #[test]
    fn test_zero_listing_price_is_incomplete() {
        let fees = AmazonListingFees {
            listing_price: dec!(0),
            ..complete_fees()
        };
        let outcome = compute_profitability(&fees, &CostBasis::undiscounted(dec!(1800)));
        assert_eq!(
            outcome,
            Profitability::Incomplete {
                missing: vec![IncompleteReason::ZeroListingPrice]
            }
        );
    }

    #[test]
    fn test_zero_fees_are_not_missing() {
        let fees = AmazonListingFees::new(dec!(1000))
            .with_referral_fee(Percent::ZERO)
            .with_fulfillment_fee(dec!(0));
        let outcome = compute_profitability(&fees, &CostBasis::undiscounted(dec!(400)));
        assert_eq!(outcome.result().unwrap().profit, dec!(600));
    }

    #[test]
    fn test_zero_net_proceeds_margin_is_zero() {
        let fees = AmazonListingFees::new(dec!(1000))
            .with_referral_fee(Percent::from(10))
            .with_fulfillment_fee(dec!(900));
        let outcome = compute_profitability(&fees, &CostBasis::undiscounted(dec!(300)));
        let result = outcome.result().unwrap();

        assert_eq!(result.net_proceeds, dec!(0));
        assert_eq!(result.profit, dec!(-300));
        assert_eq!(result.profit_margin_percent, Percent::ZERO);
        assert_eq!(result.roi_percent, Percent::from(-100));
    }

    #[test]
    fn test_negative_net_proceeds() {
        let fees = AmazonListingFees::new(dec!(500))
            .with_referral_fee(Percent::from(10))
            .with_fulfillment_fee(dec!(600));
        let outcome = compute_profitability(&fees, &CostBasis::undiscounted(dec!(100)));
        let result = outcome.result().unwrap();

        assert_eq!(result.net_proceeds, dec!(-150));
        assert_eq!(result.profit, dec!(-250));
        assert!(result.profit_margin_percent.value() > dec!(0));
    }

    #[test]
    fn test_near_zero_net_proceeds_saturates_margin() {
        let fees = AmazonListingFees::new(dec!(1))
            .with_referral_fee(Percent::ZERO)
            .with_fulfillment_fee(dec!(0.9999999999999999999999999999));
        let outcome = compute_profitability(&fees, &CostBasis::undiscounted(dec!(1800)));
        let result = outcome.result().unwrap();

        assert_eq!(result.net_proceeds, dec!(0.0000000000000000000000000001));
        assert!(result.profit < dec!(-1799));
        assert_eq!(result.profit_margin_percent, Percent::new(Decimal::MIN));
        assert_eq!(result.roi_percent.value().round_dp(0), dec!(-100));
    }

    #[test]
    fn test_huge_listing_price_saturates() {
        let fees = AmazonListingFees::new(Decimal::MAX)
            .with_referral_fee(Percent::from(15))
            .with_fulfillment_fee(dec!(350))
            .with_monthly_units_sold(1000);
        let outcome = compute_profitability(&fees, &CostBasis::undiscounted(dec!(-1800)));
        let result = outcome.result().unwrap();

        assert!(result.net_proceeds > dec!(0));
        assert_eq!(result.estimated_monthly_profit, Some(Decimal::MAX));
    }

    #[test]
    fn test_zero_cost_roi_is_zero() {
        let fees = AmazonListingFees::new(dec!(1000))
            .with_referral_fee(Percent::from(10))
            .with_fulfillment_fee(dec!(400));
        let outcome = compute_profitability(&fees, &CostBasis::undiscounted(dec!(0)));
        let result = outcome.result().unwrap();

        assert_eq!(result.profit, dec!(500));
        assert_eq!(result.roi_percent, Percent::ZERO);
    }

    #[test]
    fn test_breakdown_flows_through() {
        let shop = ShopKey::new("apparel", "Moonlight").unwrap();
        let catalog =
            PolicyCatalog::from_policies([ShopPricingPolicy::fixed(shop.clone(), dec!(400)).unwrap()])
                .unwrap();
        let overrides = UserDiscountOverrides::new();
        let resolver = CostBasisResolver::new(&catalog, &overrides);

        let evaluation = evaluate(
            &resolver,
            &shop,
            dec!(2750),
            Some(dec!(2200)),
            &complete_fees(),
        );

        assert_eq!(evaluation.cost_basis.cost, dec!(1800));
        let result = evaluation.profitability.result().unwrap();
        assert_eq!(result.resolved_cost, dec!(1800));
        assert_eq!(result.discount_breakdown, evaluation.cost_basis.breakdown);
        assert_eq!(result.discount_breakdown.total_amount, dec!(400));
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let outcome = Profitability::Incomplete {
            missing: vec![IncompleteReason::MissingFulfillmentFee],
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "incomplete");
        assert_eq!(json["missing"][0], "missing_fulfillment_fee");
    }
}
