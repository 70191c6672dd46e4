//! The module contains the errors the gateway can return.
//!
//! - [`RevisionConflict`] the caller's revision is stale; re-read and retry.
//! - [`NotFound`] no document has the requested id.
//! - [`StoreUnavailable`] the store could not be reached or failed mid-call.
//!
//!  [`RevisionConflict`]: GatewayError::RevisionConflict
//!  [`NotFound`]: GatewayError::NotFound
//!  [`StoreUnavailable`]: GatewayError::StoreUnavailable
use ledger::LedgerError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Validation failed: {0}")]
    ValidationFailure(String),
    #[error("Revision conflict on \"{id}\": expected {expected}, current is {current}")]
    RevisionConflict {
        id: String,
        expected: String,
        current: String,
    },
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("Corrupted document \"{0}\"")]
    Corrupted(String),
    #[error(transparent)]
    StoreUnavailable(#[from] DbErr),
}

impl GatewayError {
    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

impl From<LedgerError> for GatewayError {
    fn from(value: LedgerError) -> Self {
        match value {
            LedgerError::ValidationFailure(msg)
            | LedgerError::InvalidAmount(msg)
            | LedgerError::InvalidId(msg) => Self::ValidationFailure(msg),
        }
    }
}

impl PartialEq for GatewayError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ValidationFailure(a), Self::ValidationFailure(b)) => a == b,
            (
                Self::RevisionConflict {
                    id: a,
                    expected: ea,
                    current: ca,
                },
                Self::RevisionConflict {
                    id: b,
                    expected: eb,
                    current: cb,
                },
            ) => a == b && ea == eb && ca == cb,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Corrupted(a), Self::Corrupted(b)) => a == b,
            (Self::StoreUnavailable(a), Self::StoreUnavailable(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
