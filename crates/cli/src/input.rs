//! Loading policy, override, and listing files.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use resale_core::pricing::{
    AmazonListingFees, PolicyCatalog, ShopPricingPolicy, UserDiscountOverrides,
};
use resale_core::{Asin, Percent, ShopKey};

use crate::error::CliError;

/// One source product linked to an Amazon listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingRow {
    /// Amazon listing the product is resold under.
    pub asin: Asin,
    /// Brand, which together with the ASIN identifies the fee record.
    pub brand: String,
    /// Shop the product is bought from.
    pub shop: ShopKey,
    /// Storefront list price.
    pub listed_price: Decimal,
    /// Storefront sale price, if any.
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    /// Amazon-side price and fees.
    pub amazon: AmazonListingFees,
}

/// Read and validate the policy catalog.
pub async fn load_catalog(path: &Path) -> Result<PolicyCatalog, CliError> {
    let content = read(path).await?;
    let catalog = catalog_from_yaml(path, &content)?;
    info!(path = %path.display(), shops = catalog.len(), "Loaded pricing policies");
    Ok(catalog)
}

/// Read and validate user overrides; no file means no overrides.
pub async fn load_overrides(path: Option<&Path>) -> Result<UserDiscountOverrides, CliError> {
    let Some(path) = path else {
        debug!("No overrides file configured");
        return Ok(UserDiscountOverrides::new());
    };
    let content = read(path).await?;
    let overrides = overrides_from_yaml(path, &content)?;
    info!(path = %path.display(), shops = overrides.len(), "Loaded discount overrides");
    Ok(overrides)
}

/// Read listing rows to evaluate.
pub async fn load_listings(path: &Path) -> Result<Vec<ListingRow>, CliError> {
    let content = read(path).await?;
    let rows: Vec<ListingRow> = parse_yaml(path, &content)?;
    info!(path = %path.display(), rows = rows.len(), "Loaded listings");
    Ok(rows)
}

fn catalog_from_yaml(path: &Path, content: &str) -> Result<PolicyCatalog, CliError> {
    let policies: Vec<ShopPricingPolicy> = parse_yaml(path, content)?;
    Ok(PolicyCatalog::from_policies(policies)?)
}

fn overrides_from_yaml(path: &Path, content: &str) -> Result<UserDiscountOverrides, CliError> {
    if content.trim().is_empty() {
        return Ok(UserDiscountOverrides::new());
    }
    let rates: Option<BTreeMap<ShopKey, Percent>> = parse_yaml(path, content)?;
    Ok(UserDiscountOverrides::try_from(rates.unwrap_or_default())?)
}

async fn read(path: &Path) -> Result<String, CliError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_yaml<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, CliError> {
    serde_yaml::from_str(content).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use resale_core::pricing::{CalculationMode, OverrideError, PolicyError};

    use super::*;

    const POLICIES: &str = r"
- shop: apparel-Moonlight
  mode: fixed_discount
  fixed_discount_amount: 400
- shop: cosmetics-Sakura
  mode: user_configurable_percentage
  base_percentage_discount: 20
  allows_user_override: true
";

    #[test]
    fn test_catalog_from_yaml() {
        let catalog = catalog_from_yaml(Path::new("policies.yaml"), POLICIES).unwrap();
        assert_eq!(catalog.len(), 2);
        let moonlight = catalog.get(&ShopKey::parse("apparel-Moonlight").unwrap()).unwrap();
        assert_eq!(moonlight.mode, CalculationMode::FixedDiscount);
        assert_eq!(moonlight.fixed_discount_amount, dec!(400));
    }

    #[test]
    fn test_catalog_duplicate_shop_is_policy_error() {
        let yaml = format!("{POLICIES}- shop: apparel-Moonlight\n  mode: fixed_discount\n");
        let err = catalog_from_yaml(Path::new("policies.yaml"), &yaml).unwrap_err();
        assert!(matches!(err, CliError::Policy(PolicyError::DuplicateShop(_))));
    }

    #[test]
    fn test_catalog_bad_yaml_is_parse_error() {
        let err = catalog_from_yaml(Path::new("policies.yaml"), "- shop: [").unwrap_err();
        assert!(matches!(err, CliError::Parse { .. }));
        assert!(err.to_string().starts_with("Failed to parse policies.yaml"));
    }

    #[test]
    fn test_overrides_from_yaml() {
        let overrides =
            overrides_from_yaml(Path::new("overrides.yaml"), "cosmetics-Sakura: 10\n").unwrap();
        assert_eq!(
            overrides.rate_for(&ShopKey::parse("cosmetics-Sakura").unwrap()),
            Percent::from(10)
        );
    }

    #[test]
    fn test_empty_overrides_file() {
        let overrides = overrides_from_yaml(Path::new("overrides.yaml"), "").unwrap();
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_override_out_of_range() {
        let err =
            overrides_from_yaml(Path::new("overrides.yaml"), "cosmetics-Sakura: 60\n").unwrap_err();
        assert!(matches!(
            err,
            CliError::Override(OverrideError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_listing_rows() {
        let yaml = r"
- asin: b08n5wrwnw
  brand: Acme
  shop: apparel-Moonlight
  listed_price: 2750
  sale_price: 2200
  amazon:
    listing_price: 2500
    referral_fee_percent: 15
    fulfillment_fee: 350
- asin: B0C1234567
  brand: Acme
  shop: cosmetics-Sakura
  listed_price: 3000
  amazon:
    listing_price: 4200
";
        let rows: Vec<ListingRow> = parse_yaml(Path::new("listings.yaml"), yaml).unwrap();
        assert_eq!(rows.len(), 2);

        let first = rows.first().unwrap();
        assert_eq!(first.asin.as_str(), "B08N5WRWNW");
        assert_eq!(first.sale_price, Some(dec!(2200)));
        assert_eq!(first.amazon.referral_fee_percent, Some(Percent::from(15)));

        let second = rows.last().unwrap();
        assert_eq!(second.sale_price, None);
        assert_eq!(second.amazon.fulfillment_fee, None);
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let err = load_catalog(Path::new("does/not/exist.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }
}
