//! Optional field-level checks applied before records are written.
//!
//! Every check is off by default, which accepts any record: empty
//! descriptions, zero or negative amounts, and categories outside the
//! configured set.

use crate::{CategorySet, ExpenseFields, LedgerError, ResultLedger};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub reject_non_positive_amount: bool,
    pub reject_empty_description: bool,
    pub restrict_categories: bool,
    pub categories: CategorySet,
}

impl ValidationPolicy {
    /// Policy that accepts every record.
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Policy with every check enabled.
    pub fn strict(categories: CategorySet) -> Self {
        Self {
            reject_non_positive_amount: true,
            reject_empty_description: true,
            restrict_categories: true,
            categories,
        }
    }

    pub fn validate(&self, fields: &ExpenseFields) -> ResultLedger<()> {
        if self.reject_non_positive_amount && !fields.amount.is_positive() {
            return Err(LedgerError::ValidationFailure(format!(
                "amount must be > 0, got {}",
                fields.amount
            )));
        }
        if self.reject_empty_description && fields.description.trim().is_empty() {
            return Err(LedgerError::ValidationFailure(
                "description must not be empty".to_string(),
            ));
        }
        if self.restrict_categories && !self.categories.contains(&fields.category) {
            return Err(LedgerError::ValidationFailure(format!(
                "unknown category '{}'",
                fields.category
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::Amount;

    fn fields(description: &str, minor: i64, category: &str) -> ExpenseFields {
        ExpenseFields::new(description, Amount::new(minor), Utc::now(), category)
    }

    #[test]
    fn permissive_accepts_anything() {
        let policy = ValidationPolicy::permissive();
        assert!(policy.validate(&fields("", -10, "Whatever")).is_ok());
    }

    #[test]
    fn strict_rejects_each_condition() {
        let policy = ValidationPolicy::strict(CategorySet::default());

        assert!(policy.validate(&fields("Coffee", 350, "Food")).is_ok());
        assert!(matches!(
            policy.validate(&fields("Coffee", 0, "Food")),
            Err(LedgerError::ValidationFailure(_))
        ));
        assert!(matches!(
            policy.validate(&fields("   ", 350, "Food")),
            Err(LedgerError::ValidationFailure(_))
        ));
        assert_eq!(
            policy.validate(&fields("Coffee", 350, "Snacks")),
            Err(LedgerError::ValidationFailure(
                "unknown category 'Snacks'".to_string()
            ))
        );
    }

    #[test]
    fn checks_are_independent() {
        let policy = ValidationPolicy {
            reject_empty_description: true,
            ..ValidationPolicy::default()
        };
        assert!(policy.validate(&fields("Refund", -500, "Snacks")).is_ok());
        assert!(policy.validate(&fields("", 500, "Food")).is_err());
    }
}
