//! List the configured shop pricing policies.

use tracing::info;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input;
use crate::output;

/// Print every policy in the catalog as JSON.
///
/// # Errors
///
/// Returns an error if the policy file is not configured or cannot be loaded.
pub async fn list(config: &CliConfig) -> Result<(), CliError> {
    let catalog = input::load_catalog(config.require_policy_file()?).await?;

    for policy in catalog.iter() {
        info!(
            shop = %policy.shop,
            mode = %policy.mode,
            allows_user_override = policy.allows_user_override,
            "Policy"
        );
    }

    output::write_json(&catalog)
}
