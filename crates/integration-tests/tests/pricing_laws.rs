//! Pricing invariants checked over grids of inputs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use resale_core::pricing::{
    AmazonListingFees, CalculationMode, CostBasis, ShopPricingPolicy, UserDiscountOverrides,
    compute_profitability, resolve_cost, resolve_cost_basis,
};
use resale_core::{Percent, ShopKey};
use resale_integration_tests::{shop, yen_range};

fn percentage_policy(mode: CalculationMode, rate: Percent) -> ShopPricingPolicy {
    let key: ShopKey = shop("cosmetics-Sakura");
    let policy = match mode {
        CalculationMode::PercentageDiscount => ShopPricingPolicy::percentage(key, rate),
        _ => ShopPricingPolicy::user_configurable(key, rate),
    };
    policy.expect("rate in range")
}

#[test]
fn test_fixed_discount_cost_never_negative() {
    let overrides = UserDiscountOverrides::new();
    for amount in yen_range(6000, 250) {
        let policy = ShopPricingPolicy::fixed(shop("apparel-Moonlight"), amount).expect("valid");
        for base in yen_range(5000, 125) {
            let cost = resolve_cost(base, None, &policy, &overrides);
            assert!(cost >= Decimal::ZERO, "base {base} amount {amount}");
            assert!(cost <= base, "base {base} amount {amount}");
        }
    }
}

#[test]
fn test_percentage_cost_between_zero_and_base() {
    for mode in [
        CalculationMode::PercentageDiscount,
        CalculationMode::UserConfigurablePercentage,
    ] {
        for base_rate in (0..=100).step_by(5) {
            for user_rate in (0..=50).step_by(5) {
                if mode == CalculationMode::PercentageDiscount && user_rate > 0 {
                    continue;
                }
                if base_rate + user_rate > 100 {
                    continue;
                }

                let policy = percentage_policy(mode, Percent::from(base_rate));
                let mut overrides = UserDiscountOverrides::new();
                overrides
                    .set(policy.shop.clone(), Percent::from(user_rate))
                    .expect("override in range");

                for base in yen_range(10_000, 333) {
                    let cost = resolve_cost(base, None, &policy, &overrides);
                    assert!(
                        cost >= Decimal::ZERO && cost <= base,
                        "{mode} base {base} rates {base_rate}+{user_rate} gave {cost}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_resolution_and_profitability_are_idempotent() {
    let policy = percentage_policy(CalculationMode::UserConfigurablePercentage, Percent::from(20));
    let mut overrides = UserDiscountOverrides::new();
    overrides
        .set(policy.shop.clone(), Percent::new(dec!(7.5)))
        .expect("override in range");
    let fees = AmazonListingFees::new(dec!(3980))
        .with_referral_fee(Percent::from(8))
        .with_fulfillment_fee(dec!(421))
        .with_monthly_units_sold(17);

    let first = resolve_cost_basis(dec!(3333), Some(dec!(2999)), &policy, &overrides);
    let second = resolve_cost_basis(dec!(3333), Some(dec!(2999)), &policy, &overrides);
    assert_eq!(first, second);

    assert_eq!(
        compute_profitability(&fees, &first),
        compute_profitability(&fees, &second)
    );
}

#[test]
fn test_zero_net_proceeds_means_zero_margin() {
    for listing_price in yen_range(5000, 500).skip(1) {
        for referral in [0, 8, 10, 15] {
            let referral = Percent::from(referral);
            let fees = AmazonListingFees::new(listing_price)
                .with_referral_fee(referral)
                .with_fulfillment_fee(listing_price - referral.of(listing_price));

            for cost in [dec!(-100), dec!(0), dec!(1), dec!(2500)] {
                let outcome = compute_profitability(&fees, &CostBasis::undiscounted(cost));
                let result = outcome.result().expect("complete");
                assert_eq!(result.net_proceeds, Decimal::ZERO);
                assert_eq!(result.profit_margin_percent, Percent::ZERO);
            }
        }
    }
}

#[test]
fn test_zero_cost_means_zero_roi() {
    for listing_price in yen_range(5000, 250).skip(1) {
        for fulfillment in [dec!(0), dec!(300), dec!(6000)] {
            let fees = AmazonListingFees::new(listing_price)
                .with_referral_fee(Percent::from(15))
                .with_fulfillment_fee(fulfillment);
            let outcome = compute_profitability(&fees, &CostBasis::undiscounted(Decimal::ZERO));
            assert_eq!(outcome.result().expect("complete").roi_percent, Percent::ZERO);
        }
    }
}

#[test]
fn test_incomplete_exactly_when_data_missing() {
    for listing_price in [dec!(0), dec!(2500)] {
        for referral in [None, Some(Percent::ZERO), Some(Percent::from(15))] {
            for fulfillment in [None, Some(dec!(0)), Some(dec!(350))] {
                let fees = AmazonListingFees {
                    listing_price,
                    referral_fee_percent: referral,
                    fulfillment_fee: fulfillment,
                    monthly_units_sold: None,
                };
                let expected_incomplete =
                    referral.is_none() || fulfillment.is_none() || listing_price.is_zero();

                let outcome = compute_profitability(&fees, &CostBasis::undiscounted(dec!(1800)));
                assert_eq!(outcome.is_incomplete(), expected_incomplete, "{fees:?}");
                assert_eq!(fees.missing_data().is_empty(), !expected_incomplete);
            }
        }
    }
}

#[test]
fn test_profit_identity_holds() {
    for listing_price in yen_range(8000, 400).skip(1) {
        let fees = AmazonListingFees::new(listing_price)
            .with_referral_fee(Percent::from(10))
            .with_fulfillment_fee(dec!(434));
        for cost in yen_range(6000, 600) {
            let outcome = compute_profitability(&fees, &CostBasis::undiscounted(cost));
            let result = outcome.result().expect("complete");
            assert_eq!(result.profit, result.net_proceeds - cost);
            assert_eq!(result.resolved_cost, cost);
        }
    }
}
