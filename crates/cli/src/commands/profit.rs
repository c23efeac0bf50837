//! Compute profitability for a manually entered listing and cost.

use rust_decimal::Decimal;
use tracing::info;

use resale_core::Percent;
use resale_core::pricing::{AmazonListingFees, CostBasis, compute_profitability};

use crate::error::CliError;
use crate::output;

/// Amazon-side inputs for a single listing.
#[derive(Debug, Clone, Copy)]
pub struct ListingInput {
    pub listing_price: Decimal,
    pub referral_fee_percent: Option<Percent>,
    pub fulfillment_fee: Option<Decimal>,
    pub monthly_units_sold: Option<u32>,
}

/// Print profitability of selling at `listing` what was bought at `cost`.
///
/// Missing fees are not an error: the result is reported as incomplete.
///
/// # Errors
///
/// Returns an error only if output cannot be written.
pub fn compute(listing: ListingInput, cost: Decimal) -> Result<(), CliError> {
    let fees = AmazonListingFees {
        listing_price: listing.listing_price,
        referral_fee_percent: listing.referral_fee_percent,
        fulfillment_fee: listing.fulfillment_fee,
        monthly_units_sold: listing.monthly_units_sold,
    };

    let outcome = compute_profitability(&fees, &CostBasis::undiscounted(cost));
    info!("{}", output::describe_profitability(&outcome));

    output::write_json(&outcome)
}
