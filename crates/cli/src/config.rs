//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `RESALE_POLICY_FILE` - YAML list of shop pricing policies
//!   (required by every command unless `--policies` is passed)
//! - `RESALE_OVERRIDES_FILE` - YAML map of shop key to extra discount percent
//! - `RESALE_LOG_FORMAT` - `text` (default) or `json`
//! - `RUST_LOG` - tracing filter (default: `resale_cli=info,resale_core=warn`)

use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines on stderr.
    #[default]
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Policy catalog file.
    pub policy_file: Option<PathBuf>,
    /// User discount override file.
    pub overrides_file: Option<PathBuf>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_format = match non_empty("RESALE_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar(
                    "RESALE_LOG_FORMAT".to_string(),
                    format!("expected `text` or `json`, got `{other}`"),
                ));
            }
        };

        Ok(Self {
            policy_file: non_empty("RESALE_POLICY_FILE").map(PathBuf::from),
            overrides_file: non_empty("RESALE_OVERRIDES_FILE").map(PathBuf::from),
            log_format,
        })
    }

    /// Apply command-line flags on top of the environment.
    #[must_use]
    pub fn with_flags(mut self, policies: Option<PathBuf>, overrides: Option<PathBuf>) -> Self {
        if policies.is_some() {
            self.policy_file = policies;
        }
        if overrides.is_some() {
            self.overrides_file = overrides;
        }
        self
    }

    /// The policy file, which every pricing command needs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when neither the flag nor
    /// `RESALE_POLICY_FILE` was given.
    pub fn require_policy_file(&self) -> Result<&PathBuf, ConfigError> {
        self.policy_file
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("RESALE_POLICY_FILE".to_string()))
    }
}
