//! Rendering results for people and for machines.
//!
//! Machine output is pretty JSON on stdout. The one-line summaries go to the
//! log, so piping stdout into `jq` keeps working.

use std::io::Write;

use serde::Serialize;

use resale_core::Price;
use resale_core::pricing::{CalculationMode, DiscountBreakdown, Profitability};

use crate::error::CliError;

/// Write `value` to stdout as pretty JSON.
pub fn write_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

/// Short human description of a discount, e.g. `20% + 10% off (¥900)`.
pub fn describe_discount(breakdown: &DiscountBreakdown) -> String {
    let total = Price::jpy(breakdown.total_amount);
    match breakdown.mode {
        None => "no discount".to_string(),
        Some(CalculationMode::FixedDiscount) => format!("{total} off"),
        Some(CalculationMode::PercentageDiscount) => {
            format!("{} off ({total})", breakdown.base_rate)
        }
        Some(CalculationMode::UserConfigurablePercentage) => format!(
            "{} + {} off ({total})",
            breakdown.base_rate, breakdown.user_rate
        ),
    }
}

/// Short human description of a profitability outcome.
pub fn describe_profitability(outcome: &Profitability) -> String {
    match outcome {
        Profitability::Complete(result) => format!(
            "profit {} on cost {} (margin {}%, ROI {}%)",
            Price::jpy(result.profit),
            Price::jpy(result.resolved_cost),
            result.profit_margin_percent.value().round_dp(2),
            result.roi_percent.value().round_dp(2),
        ),
        Profitability::Incomplete { missing } => {
            let missing: Vec<String> = missing.iter().map(ToString::to_string).collect();
            format!("needs manual input: {}", missing.join(", "))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use resale_core::pricing::{
        AmazonListingFees, CostBasis, IncompleteReason, ShopPricingPolicy, UserDiscountOverrides,
        compute_profitability, resolve_cost_basis,
    };
    use resale_core::{Percent, ShopKey};

    use super::*;

    fn shop() -> ShopKey {
        ShopKey::parse("cosmetics-Sakura").unwrap()
    }

    #[test]
    fn test_describe_fixed_discount() {
        let policy = ShopPricingPolicy::fixed(shop(), dec!(400)).unwrap();
        let basis = resolve_cost_basis(dec!(2200), None, &policy, &UserDiscountOverrides::new());
        assert_eq!(describe_discount(&basis.breakdown), "¥400 off");
    }

    #[test]
    fn test_describe_user_configurable_discount() {
        let policy = ShopPricingPolicy::user_configurable(shop(), Percent::from(20)).unwrap();
        let mut overrides = UserDiscountOverrides::new();
        overrides.set(shop(), Percent::from(10)).unwrap();
        let basis = resolve_cost_basis(dec!(3000), None, &policy, &overrides);
        assert_eq!(describe_discount(&basis.breakdown), "20% + 10% off (¥900)");
    }

    #[test]
    fn test_describe_no_discount() {
        let basis = CostBasis::undiscounted(dec!(1800));
        assert_eq!(describe_discount(&basis.breakdown), "no discount");
    }

    #[test]
    fn test_describe_complete_profitability() {
        let fees = AmazonListingFees::new(dec!(2500))
            .with_referral_fee(Percent::from(15))
            .with_fulfillment_fee(dec!(350));
        let outcome = compute_profitability(&fees, &CostBasis::undiscounted(dec!(1800)));
        assert_eq!(
            describe_profitability(&outcome),
            "profit -¥25 on cost ¥1,800 (margin -1.41%, ROI -1.39%)"
        );
    }

    #[test]
    fn test_describe_incomplete_profitability() {
        let outcome = Profitability::Incomplete {
            missing: vec![
                IncompleteReason::MissingReferralFee,
                IncompleteReason::MissingFulfillmentFee,
            ],
        };
        assert_eq!(
            describe_profitability(&outcome),
            "needs manual input: referral fee, fulfillment fee"
        );
    }
}
