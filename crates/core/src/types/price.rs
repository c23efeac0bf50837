//! Type-safe price representation using decimal arithmetic.
//!
//! Pricing math in [`crate::pricing`] works on bare [`Decimal`] amounts in the
//! currency's standard unit (whole yen for the storefronts we scrape). `Price`
//! pairs an amount with its currency at the presentation boundary, where the
//! amount gets rounded and formatted.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., yen, dollars).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a yen price.
    #[must_use]
    pub const fn jpy(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::JPY)
    }

    /// Amount rounded to the currency's minor unit, half away from zero.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        let scale = self.currency_code.minor_units();
        let mut rounded = self
            .amount
            .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(scale);
        rounded
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(
            f,
            "{sign}{}{}",
            self.currency_code.symbol(),
            group_thousands(&rounded.abs().to_string())
        )
    }
}

/// Insert `,` separators into the integer part of a plain decimal string.
fn group_thousands(plain: &str) -> String {
    let (int_part, frac_part) = plain
        .split_once('.')
        .map_or((plain, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    JPY,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::JPY => "¥",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Number of decimal places in the currency's minor unit.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::JPY => 0,
            Self::USD | Self::EUR | Self::GBP => 2,
        }
    }
}
