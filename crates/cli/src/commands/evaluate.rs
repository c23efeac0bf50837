//! Evaluate a file of listings and rank them.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use resale_core::pricing::{CostBasisResolver, Evaluation, SortKey, compare, evaluate};
use resale_core::{Asin, ShopKey};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{self, ListingRow};
use crate::output;

#[derive(Debug, Serialize)]
struct EvaluatedRow {
    asin: Asin,
    brand: String,
    shop: ShopKey,
    #[serde(flatten)]
    evaluation: Evaluation,
}

/// Evaluate every listing in `path`, best first by `sort`, and print them.
///
/// # Errors
///
/// Returns an error if any input file cannot be loaded or parsed.
pub async fn run(config: &CliConfig, path: &Path, sort: SortKey) -> Result<(), CliError> {
    let catalog = input::load_catalog(config.require_policy_file()?).await?;
    let overrides = input::load_overrides(config.overrides_file.as_deref()).await?;
    let rows = input::load_listings(path).await?;

    let resolver = CostBasisResolver::new(&catalog, &overrides);
    let evaluated = rank(&resolver, rows, sort);

    let incomplete = evaluated
        .iter()
        .filter(|row| row.evaluation.profitability.is_incomplete())
        .count();
    let unknown_shops = evaluated
        .iter()
        .filter(|row| resolver.policy(&row.shop).is_none())
        .count();

    for row in &evaluated {
        info!(
            asin = %row.asin,
            shop = %row.shop,
            "{}",
            output::describe_profitability(&row.evaluation.profitability)
        );
    }
    if unknown_shops > 0 {
        warn!(
            rows = unknown_shops,
            "Listings from shops without a pricing policy were costed at base price"
        );
    }
    info!(
        rows = evaluated.len(),
        incomplete,
        sort = ?sort,
        "Evaluation complete"
    );

    output::write_json(&evaluated)
}

fn rank(
    resolver: &CostBasisResolver<'_>,
    rows: Vec<ListingRow>,
    sort: SortKey,
) -> Vec<EvaluatedRow> {
    let mut evaluated: Vec<EvaluatedRow> = rows
        .into_iter()
        .map(|row| EvaluatedRow {
            evaluation: evaluate(
                resolver,
                &row.shop,
                row.listed_price,
                row.sale_price,
                &row.amazon,
            ),
            asin: row.asin,
            brand: row.brand,
            shop: row.shop,
        })
        .collect();

    evaluated.sort_by(|a, b| {
        compare(
            sort,
            &a.evaluation.profitability,
            &b.evaluation.profitability,
        )
    });
    evaluated
}
