//! Ordering for listing tables.
//!
//! Complete results always sort ahead of incomplete ones, best first; rows
//! that still need input keep their relative order at the bottom.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::profitability::{Profitability, ProfitabilityResult};

/// Error returned when parsing an unknown [`SortKey`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid sort key `{0}`, expected profit, roi, margin, or monthly_profit")]
pub struct SortKeyError(pub String);

/// Column a listing table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Profit per unit.
    #[default]
    Profit,
    /// Return on investment.
    Roi,
    /// Profit margin.
    Margin,
    /// Profit per unit times monthly units sold. Unknown velocity sorts last
    /// among complete rows.
    MonthlyProfit,
}

impl SortKey {
    fn key(self, result: &ProfitabilityResult) -> Option<Decimal> {
        match self {
            Self::Profit => Some(result.profit),
            Self::Roi => Some(result.roi_percent.value()),
            Self::Margin => Some(result.profit_margin_percent.value()),
            Self::MonthlyProfit => result.estimated_monthly_profit,
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = SortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "profit" => Ok(Self::Profit),
            "roi" => Ok(Self::Roi),
            "margin" => Ok(Self::Margin),
            "monthly_profit" => Ok(Self::MonthlyProfit),
            _ => Err(SortKeyError(s.to_owned())),
        }
    }
}

/// Compare two outcomes for a best-first sort by `key`.
///
/// Use with a stable sort: `rows.sort_by(|a, b| compare(key, a, b))`.
#[must_use]
pub fn compare(key: SortKey, a: &Profitability, b: &Profitability) -> Ordering {
    match (a.result(), b.result()) {
        (Some(a), Some(b)) => match (key.key(a), key.key(b)) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
