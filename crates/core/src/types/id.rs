//! Identifiers for marketplace listings and source shops.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Asin`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsinError {
    /// The input string is empty.
    #[error("ASIN cannot be empty")]
    Empty,
    /// The input is not exactly ten characters.
    #[error("ASIN must be exactly {expected} characters, got {actual}")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Length of the input.
        actual: usize,
    },
    /// The input contains something other than ASCII letters and digits.
    #[error("ASIN must contain only letters and digits")]
    InvalidCharacter,
}

/// An Amazon Standard Identification Number.
///
/// ## Constraints
///
/// - Exactly 10 characters after trimming
/// - ASCII letters and digits only
/// - Stored upper-cased
///
/// ## Examples
///
/// ```
/// use resale_core::Asin;
///
/// let asin = Asin::parse("b08n5wrwnw").unwrap();
/// assert_eq!(asin.as_str(), "B08N5WRWNW");
///
/// assert!(Asin::parse("").is_err());
/// assert!(Asin::parse("B08N5").is_err());
/// assert!(Asin::parse("B08N5-RWNW").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asin(String);

impl Asin {
    /// Length of every ASIN.
    pub const LENGTH: usize = 10;

    /// Parse an `Asin` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, is not ten characters
    /// long, or contains anything but ASCII letters and digits.
    pub fn parse(s: &str) -> Result<Self, AsinError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AsinError::Empty);
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AsinError::InvalidCharacter);
        }

        if s.len() != Self::LENGTH {
            return Err(AsinError::WrongLength {
                expected: Self::LENGTH,
                actual: s.len(),
            });
        }

        Ok(Self(s.to_ascii_uppercase()))
    }

    /// Get the ASIN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Asin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Asin {
    type Err = AsinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Asin {
    type Error = AsinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Asin> for String {
    fn from(asin: Asin) -> Self {
        asin.0
    }
}

/// Errors that can occur when building or parsing a [`ShopKey`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopKeyError {
    /// The input string has no `-` between category and shop name.
    #[error("shop key must look like `category-shopName`: {0}")]
    MissingSeparator(String),
    /// The category part is empty.
    #[error("shop category cannot be empty")]
    EmptyCategory,
    /// The shop name part is empty.
    #[error("shop name cannot be empty")]
    EmptyShopName,
    /// The category contains `-`, so the key would not parse back.
    #[error("shop category cannot contain `-`: {0}")]
    DashInCategory(String),
}

/// Composite identity of a source shop: product category plus shop name.
///
/// The canonical string form is `category-shopName`, which is also the key
/// user discount overrides are stored under. Parsing splits on the first `-`,
/// so a shop name may contain dashes but a category may not.
///
/// ## Examples
///
/// ```
/// use resale_core::ShopKey;
///
/// let key = ShopKey::new("cosmetics", "Sakura-Drug").unwrap();
/// assert_eq!(key.to_string(), "cosmetics-Sakura-Drug");
///
/// let parsed: ShopKey = "cosmetics-Sakura-Drug".parse().unwrap();
/// assert_eq!(parsed, key);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShopKey {
    category: String,
    shop_name: String,
}

impl ShopKey {
    /// Build a key from its parts.
    ///
    /// # Errors
    ///
    /// Returns an error if either part is blank, or if the category contains
    /// a `-` (the key could not be parsed back).
    pub fn new(category: &str, shop_name: &str) -> Result<Self, ShopKeyError> {
        let category = category.trim();
        let shop_name = shop_name.trim();

        if category.is_empty() {
            return Err(ShopKeyError::EmptyCategory);
        }
        if category.contains('-') {
            return Err(ShopKeyError::DashInCategory(category.to_owned()));
        }
        if shop_name.is_empty() {
            return Err(ShopKeyError::EmptyShopName);
        }

        Ok(Self {
            category: category.to_owned(),
            shop_name: shop_name.to_owned(),
        })
    }

    /// Parse the `category-shopName` form.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no `-` or either side is blank.
    pub fn parse(s: &str) -> Result<Self, ShopKeyError> {
        let (category, shop_name) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| ShopKeyError::MissingSeparator(s.to_owned()))?;
        Self::new(category, shop_name)
    }

    /// Product category the shop is filed under.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Shop display name.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.shop_name
    }
}

impl fmt::Display for ShopKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category, self.shop_name)
    }
}

impl FromStr for ShopKey {
    type Err = ShopKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShopKey {
    type Error = ShopKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShopKey> for String {
    fn from(key: ShopKey) -> Self {
        key.to_string()
    }
}
