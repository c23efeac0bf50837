//! Percentage type.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Percent`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PercentError {
    /// The input string is empty.
    #[error("percentage cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("invalid percentage: {0}")]
    Invalid(String),
}

/// A percentage expressed in whole-number points, so `Percent::from(15)` is 15%.
///
/// No range is enforced here. Discount rates and referral fees each have their
/// own valid range, checked where those values are constructed.
///
/// Arithmetic never panics: results outside the `Decimal` range saturate to
/// `Decimal::MAX` or `Decimal::MIN`.
///
/// ## Examples
///
/// ```
/// use resale_core::Percent;
/// use rust_decimal::Decimal;
///
/// let fee = Percent::from(15);
/// assert_eq!(fee.of(Decimal::from(2500)), Decimal::from(375));
///
/// let parsed: Percent = "12.5%".parse().unwrap();
/// assert_eq!(parsed.value(), Decimal::new(125, 1));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(Decimal::ONE_HUNDRED);

    /// Create a percentage from its point value.
    #[must_use]
    pub const fn new(points: Decimal) -> Self {
        Self(points)
    }

    /// The point value (15 for 15%).
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// This percentage of `amount`.
    #[must_use]
    pub fn of(&self, amount: Decimal) -> Decimal {
        amount.saturating_mul(self.0) / Decimal::ONE_HUNDRED
    }

    /// Whether the value lies within `min..=max` points.
    #[must_use]
    pub fn is_within(&self, min: Decimal, max: Decimal) -> bool {
        (min..=max).contains(&self.0)
    }

    /// Express `part` as a percentage of `whole`, or zero when `whole` is zero.
    ///
    /// A ratio too large for `Decimal` (a tiny nonzero `whole`) saturates with
    /// the sign of the true result.
    #[must_use]
    pub fn ratio_or_zero(part: Decimal, whole: Decimal) -> Self {
        if whole.is_zero() {
            return Self::ZERO;
        }
        let scaled = part.saturating_mul(Decimal::ONE_HUNDRED);
        scaled.checked_div(whole).map_or_else(
            || {
                if scaled.is_sign_negative() == whole.is_sign_negative() {
                    Self(Decimal::MAX)
                } else {
                    Self(Decimal::MIN)
                }
            },
            Self,
        )
    }
}

impl core::ops::Add for Percent {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl From<Decimal> for Percent {
    fn from(points: Decimal) -> Self {
        Self(points)
    }
}

impl From<i32> for Percent {
    fn from(points: i32) -> Self {
        Self(Decimal::from(points))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

impl FromStr for Percent {
    type Err = PercentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
        if digits.is_empty() {
            return Err(PercentError::Empty);
        }
        Decimal::from_str(digits)
            .map(Self)
            .map_err(|_| PercentError::Invalid(s.to_owned()))
    }
}
