//! Errors raised by the ledger crate.
//!
//! The reducer itself is total and never fails. Errors only come from parsing
//! user input and from the configurable [`ValidationPolicy`].
//!
//!  [`ValidationPolicy`]: crate::ValidationPolicy
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Validation failed: {0}")]
    ValidationFailure(String),
}
