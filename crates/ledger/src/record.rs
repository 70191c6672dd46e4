//! The expense record and its identifiers.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Amount, LedgerError};

/// Stable identifier of an expense.
///
/// Generated with UUID v4 both by in-memory callers ([`ExpenseId::new`]) and
/// by the durable store on create, so ids never collide across the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for ExpenseId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ExpenseId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| LedgerError::InvalidId(s.to_string()))
    }
}

/// Expense category.
///
/// The set of valid categories is configuration owned by the caller (see
/// [`CategorySet`]); the ledger only compares names exactly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Categories offered when none are configured.
pub const DEFAULT_CATEGORIES: [&str; 5] =
    ["Personal", "Education", "Transport", "Food", "Entertainment"];

/// The configured enumeration of expense categories, in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    /// Builds a set from names, dropping blanks and duplicates while keeping
    /// the first occurrence's position.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories: Vec<Category> = Vec::new();
        for name in names {
            let name = name.into();
            let name = name.trim();
            if name.is_empty() || categories.iter().any(|c| c.as_str() == name) {
                continue;
            }
            categories.push(Category::new(name));
        }
        Self { categories }
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES)
    }
}

/// The replaceable part of an expense: everything except its identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseFields {
    pub description: String,
    pub amount: Amount,
    pub occurred_at: DateTime<Utc>,
    pub category: Category,
}

impl ExpenseFields {
    pub fn new(
        description: impl Into<String>,
        amount: Amount,
        occurred_at: DateTime<Utc>,
        category: impl Into<Category>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            occurred_at,
            category: category.into(),
        }
    }
}

/// A single expense.
///
/// `occurred_at` is when the money was spent, not when it was recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Amount,
    pub occurred_at: DateTime<Utc>,
    pub category: Category,
}

impl Expense {
    /// Creates an expense with a freshly generated id.
    pub fn new(fields: ExpenseFields) -> Self {
        Self::with_id(ExpenseId::new(), fields)
    }

    pub fn with_id(id: ExpenseId, fields: ExpenseFields) -> Self {
        Self {
            id,
            description: fields.description,
            amount: fields.amount,
            occurred_at: fields.occurred_at,
            category: fields.category,
        }
    }

    pub fn fields(&self) -> ExpenseFields {
        ExpenseFields {
            description: self.description.clone(),
            amount: self.amount,
            occurred_at: self.occurred_at,
            category: self.category.clone(),
        }
    }

    /// Replaces every mutable field, keeping the id.
    pub fn replace_fields(&mut self, fields: ExpenseFields) {
        self.description = fields.description;
        self.amount = fields.amount;
        self.occurred_at = fields.occurred_at;
        self.category = fields.category;
    }

    /// Calendar day (UTC) the expense occurred on.
    pub fn occurred_on(&self) -> NaiveDate {
        self.occurred_at.date_naive()
    }
}
