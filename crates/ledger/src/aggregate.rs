//! Totals and filtered views derived from a slice of expenses.
//!
//! Everything here is computed from the records passed in on each call;
//! nothing is cached.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Amount, Category, Expense, LedgerError, ResultLedger};

fn sum_overflow(total: Amount, amount: Amount) -> LedgerError {
    LedgerError::InvalidAmount(format!("total overflows adding {amount} to {total}"))
}

/// Sum of every amount, `0` for no records.
///
/// Fails with [`LedgerError::InvalidAmount`] when the sum leaves the `i64`
/// range of minor units.
pub fn total(records: &[Expense]) -> ResultLedger<Amount> {
    records.iter().try_fold(Amount::ZERO, |total, expense| {
        total
            .checked_add(expense.amount)
            .ok_or_else(|| sum_overflow(total, expense.amount))
    })
}

/// Predicate used by [`filter`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum ExpenseFilter {
    #[default]
    All,
    /// Exact category name.
    Category(Category),
    /// Same UTC calendar day.
    OccurredOn(NaiveDate),
    /// Same instant, to the millisecond.
    OccurredAt(DateTime<Utc>),
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => expense.category == *category,
            Self::OccurredOn(day) => expense.occurred_on() == *day,
            Self::OccurredAt(at) => {
                expense.occurred_at.timestamp_millis() == at.timestamp_millis()
            }
        }
    }
}

/// Records matching `filter`, in their original order.
pub fn filter<'a>(records: &'a [Expense], filter: &ExpenseFilter) -> Vec<&'a Expense> {
    filter_by(records, |expense| filter.matches(expense))
}

/// Records matching an arbitrary predicate, in their original order.
pub fn filter_by<'a, F>(records: &'a [Expense], predicate: F) -> Vec<&'a Expense>
where
    F: Fn(&Expense) -> bool,
{
    records.iter().filter(|expense| predicate(expense)).collect()
}

/// Total spent in one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Amount,
}

/// Per-category totals, ordered by the first appearance of each category.
pub fn totals_by_category(records: &[Expense]) -> ResultLedger<Vec<CategoryTotal>> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in records {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(entry) => {
                entry.total = entry
                    .total
                    .checked_add(expense.amount)
                    .ok_or_else(|| sum_overflow(entry.total, expense.amount))?;
            }
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                total: expense.amount,
            }),
        }
    }
    Ok(totals)
}
