//! CLI command implementations.

pub mod cost;
pub mod evaluate;
pub mod policies;
pub mod profit;
