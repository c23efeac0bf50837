//! Resale CLI - Cost basis and profitability tools.
//!
//! # Usage
//!
//! ```bash
//! # List the configured shop policies
//! resale --policies config/policies.yaml policies
//!
//! # Resolve what a product actually costs at a shop
//! resale cost --shop apparel-Moonlight --listed 2750 --sale 2200
//!
//! # Profitability of a listing at a known cost
//! resale profit --listing-price 2500 --referral 15 --fulfillment 350 --cost 1800
//!
//! # Evaluate and rank a file of linked listings
//! resale evaluate listings.yaml --sort roi
//! ```
//!
//! # Commands
//!
//! - `policies` - List shop pricing policies
//! - `cost` - Resolve a product's cost basis
//! - `profit` - Compute profitability for one listing
//! - `evaluate` - Evaluate and rank many listings

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use resale_core::Percent;
use resale_core::pricing::SortKey;

mod commands;
mod config;
mod error;
mod input;
mod output;

use config::{CliConfig, LogFormat};
use error::CliError;

#[derive(Parser)]
#[command(name = "resale")]
#[command(author, version, about = "Resale cost basis and profitability tools")]
struct Cli {
    /// Shop policy file (overrides `RESALE_POLICY_FILE`)
    #[arg(long, global = true)]
    policies: Option<PathBuf>,

    /// User discount override file (overrides `RESALE_OVERRIDES_FILE`)
    #[arg(long, global = true)]
    overrides: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List shop pricing policies
    Policies,
    /// Resolve the acquisition cost of a product
    Cost {
        /// Shop key (`category-shopName`)
        #[arg(short, long)]
        shop: String,

        /// Listed price on the storefront
        #[arg(short, long)]
        listed: Decimal,

        /// Sale price on the storefront, if any
        #[arg(long)]
        sale: Option<Decimal>,
    },
    /// Compute profitability for one Amazon listing
    Profit {
        /// Amazon listing price
        #[arg(long)]
        listing_price: Decimal,

        /// Referral fee percentage (omit if unknown)
        #[arg(long)]
        referral: Option<Percent>,

        /// FBA fulfillment fee (omit if unknown)
        #[arg(long)]
        fulfillment: Option<Decimal>,

        /// Estimated monthly units sold
        #[arg(long)]
        monthly_units: Option<u32>,

        /// Acquisition cost
        #[arg(long)]
        cost: Decimal,
    },
    /// Evaluate and rank a YAML file of linked listings
    Evaluate {
        /// Listings file
        file: PathBuf,

        /// Ranking column (`profit`, `roi`, `margin`, `monthly_profit`)
        #[arg(long, default_value = "profit")]
        sort: SortKey,
    },
}

/// Initialize tracing with `EnvFilter`, as JSON or text.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for the CLI if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "resale_cli=info,resale_core=warn".into());

    let is_json = format == LogFormat::Json;
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Text);
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    let config = config.with_flags(cli.policies, cli.overrides);

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &CliConfig) -> Result<(), CliError> {
    match command {
        Commands::Policies => commands::policies::list(config).await?,
        Commands::Cost { shop, listed, sale } => {
            commands::cost::resolve(config, &shop, listed, sale).await?;
        }
        Commands::Profit {
            listing_price,
            referral,
            fulfillment,
            monthly_units,
            cost,
        } => {
            let listing = commands::profit::ListingInput {
                listing_price,
                referral_fee_percent: referral,
                fulfillment_fee: fulfillment,
                monthly_units_sold: monthly_units,
            };
            commands::profit::compute(listing, cost)?;
        }
        Commands::Evaluate { file, sort } => {
            commands::evaluate::run(config, &file, sort).await?;
        }
    }
    Ok(())
}
