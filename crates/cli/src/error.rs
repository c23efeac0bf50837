//! Unified error handling for the CLI.

use std::path::PathBuf;

use thiserror::Error;

use resale_core::pricing::{OverrideError, PolicyError};
use resale_core::ShopKeyError;

use crate::config::ConfigError;

/// Errors that end a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An input file is not valid YAML for its schema.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// Results could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Results could not be written to stdout.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// A shop pricing policy is invalid.
    #[error("Invalid policy: {0}")]
    Policy(#[from] PolicyError),

    /// A user discount override is invalid.
    #[error("Invalid override: {0}")]
    Override(#[from] OverrideError),

    /// A shop key argument is malformed.
    #[error("Invalid shop: {0}")]
    ShopKey(#[from] ShopKeyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let err = CliError::Config(ConfigError::MissingEnvVar("RESALE_POLICY_FILE".to_string()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing environment variable: RESALE_POLICY_FILE"
        );

        let err = CliError::ShopKey(ShopKeyError::EmptyShopName);
        assert_eq!(err.to_string(), "Invalid shop: shop name cannot be empty");
    }
}
