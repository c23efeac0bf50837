//! Resolve the acquisition cost of a single product.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use resale_core::ShopKey;
use resale_core::pricing::{CostBasis, CostBasisResolver};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input;
use crate::output;

#[derive(Serialize)]
struct CostReport<'a> {
    shop: &'a ShopKey,
    #[serde(flatten)]
    cost_basis: CostBasis,
}

/// Resolve and print the cost basis for a product from `shop`.
///
/// # Errors
///
/// Returns an error if `shop` is malformed or the input files cannot be loaded.
pub async fn resolve(
    config: &CliConfig,
    shop: &str,
    listed_price: Decimal,
    sale_price: Option<Decimal>,
) -> Result<(), CliError> {
    let shop = ShopKey::parse(shop)?;
    let catalog = input::load_catalog(config.require_policy_file()?).await?;
    let overrides = input::load_overrides(config.overrides_file.as_deref()).await?;

    let cost_basis = CostBasisResolver::new(&catalog, &overrides).resolve(
        &shop,
        listed_price,
        sale_price,
    );

    info!(
        shop = %shop,
        base_price = %cost_basis.base_price,
        cost = %cost_basis.cost,
        "Cost basis: {}",
        output::describe_discount(&cost_basis.breakdown)
    );

    output::write_json(&CostReport {
        shop: &shop,
        cost_basis,
    })
}
