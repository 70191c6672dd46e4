//! In-memory expense ledger.
//!
//! - [`Ledger`] and [`reduce`]: the pure, ordered record collection.
//! - [`aggregate`]: totals and filtered views.
//! - [`ThresholdMonitor`]: spending ceiling warnings.
//! - [`LedgerStore`]: observable holder wiring the three together.
//!
//! No I/O happens in this crate.

pub use aggregate::{CategoryTotal, ExpenseFilter, filter, filter_by, total, totals_by_category};
pub use error::LedgerError;
pub use money::Amount;
pub use record::{
    Category, CategorySet, DEFAULT_CATEGORIES, Expense, ExpenseFields, ExpenseId,
};
pub use reducer::{Ledger, LedgerAction, reduce};
pub use store::{LedgerStore, SubscriptionId};
pub use threshold::{ThresholdMonitor, ThresholdWarning};
pub use validation::ValidationPolicy;

pub mod aggregate;
mod error;
mod money;
mod record;
mod reducer;
mod store;
mod threshold;
mod validation;

pub type ResultLedger<T> = Result<T, LedgerError>;
