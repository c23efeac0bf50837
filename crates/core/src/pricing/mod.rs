//! Cost basis resolution and resale profitability.
//!
//! Callers resolve a [`CostBasis`] for a source product from its shop's
//! [`ShopPricingPolicy`] and the user's [`UserDiscountOverrides`], then feed it
//! with an [`AmazonListingFees`] snapshot into [`compute_profitability`].
//! Nothing in here performs I/O or holds state between calls.

pub mod cost_basis;
pub mod overrides;
pub mod policy;
pub mod profitability;
pub mod ranking;

pub use cost_basis::{
    CostBasis, CostBasisResolver, DiscountBreakdown, resolve_cost, resolve_cost_basis,
};
pub use overrides::{MAX_USER_DISCOUNT, OverrideError, UserDiscountOverrides};
pub use policy::{CalculationMode, PolicyCatalog, PolicyError, ShopPricingPolicy};
pub use profitability::{
    AmazonListingFees, Evaluation, IncompleteReason, Profitability, ProfitabilityResult,
    compute_profitability, evaluate,
};
pub use ranking::{SortKey, SortKeyError, compare};
