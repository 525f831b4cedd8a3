//! Errors raised by the ledger operations.
//!
//! - [`InvalidAmount`] when an expense amount is not strictly positive.
//! - [`MissingCategory`] when an expense is submitted without a category.
//! - [`InvalidLimits`] when one or more category limits are negative.
//! - [`NotFound`] when an operation references an unknown expense id.
//! - [`MalformedDate`] when a stored date does not have three components.
//! - [`IdsExhausted`] when no id is left above the largest one in use.
//!
//!  [`InvalidAmount`]: LedgerError::InvalidAmount
//!  [`MissingCategory`]: LedgerError::MissingCategory
//!  [`InvalidLimits`]: LedgerError::InvalidLimits
//!  [`NotFound`]: LedgerError::NotFound
//!  [`MalformedDate`]: LedgerError::MalformedDate
//!  [`IdsExhausted`]: LedgerError::IdsExhausted
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum LedgerError {
    #[error("Please enter a valid expense amount (got {0})")]
    InvalidAmount(Decimal),
    #[error("Please select a category")]
    MissingCategory,
    #[error("Please enter a valid limit value for {}", .0.join(", "))]
    InvalidLimits(Vec<String>),
    #[error("Expense {0} not found")]
    NotFound(u64),
    #[error("Malformed date: `{0}`")]
    MalformedDate(String),
    #[error("No expense ids left above {0}")]
    IdsExhausted(u64),
}
