//! The module contains the errors the engine can return.
//!
//! Only the split calculators can fail. Aggregation and simplification
//! degrade gracefully on incomplete records instead.
//!
//! - [`SplitError`] returned by [`compute_splits`] when a request cannot be
//!   allocated.
//! - [`InvalidAmount`] returned when a decimal string is not a valid amount.
//! - [`UnsupportedCurrency`] returned for an unknown currency code.
//!
//!  [`compute_splits`]: crate::compute_splits
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`UnsupportedCurrency`]: EngineError::UnsupportedCurrency
use rust_decimal::Decimal;
use thiserror::Error;

use crate::Money;

/// Reasons a split request is rejected.
///
/// Every variant carries enough data to render a precise message to the
/// user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("amounts sum to {sum} but total is {target} (difference {diff})")]
    SplitMismatch {
        sum: Money,
        target: Money,
        diff: Money,
    },
    #[error("percentages sum to {sum}%, must equal 100%")]
    PercentageMismatch { sum: Decimal },
    #[error("item \"{item}\" has no assignments")]
    UnassignedItem { item: String },
}

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error(transparent)]
    Split(#[from] SplitError),
}
