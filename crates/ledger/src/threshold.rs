//! Spending ceiling warnings.

use serde::{Deserialize, Serialize};

use crate::{Amount, Expense, ResultLedger, aggregate};

/// Warning raised when the ledger total reaches 90% of the ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdWarning {
    pub total: Amount,
    pub ceiling: Amount,
}

/// Compares the ledger total against a configured ceiling.
///
/// The monitor keeps no state: every call reports independently, and callers
/// decide how to de-duplicate alerts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdMonitor {
    ceiling: Amount,
}

impl ThresholdMonitor {
    /// Share of the ceiling (in tenths) at which warnings start.
    const WARN_TENTHS: i128 = 9;

    pub fn new(ceiling: Amount) -> Self {
        Self { ceiling }
    }

    pub fn ceiling(&self) -> Amount {
        self.ceiling
    }

    /// Fails only when the records cannot be totalled.
    pub fn check(&self, records: &[Expense]) -> ResultLedger<Option<ThresholdWarning>> {
        Ok(self.check_total(aggregate::total(records)?))
    }

    /// `total >= 0.9 * ceiling`, in integer arithmetic.
    pub fn check_total(&self, total: Amount) -> Option<ThresholdWarning> {
        let total_tenths = i128::from(total.minor()) * 10;
        let limit_tenths = i128::from(self.ceiling.minor()) * Self::WARN_TENTHS;
        (total_tenths >= limit_tenths).then_some(ThresholdWarning {
            total,
            ceiling: self.ceiling,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{ExpenseFields, LedgerError};

    fn spent(units: i64) -> Vec<Expense> {
        vec![Expense::new(ExpenseFields::new(
            "rent",
            Amount::from_units(units),
            Utc::now(),
            "Personal",
        ))]
    }

    #[test]
    fn warns_above_ninety_percent() {
        let monitor = ThresholdMonitor::new(Amount::from_units(10_000));
        let warning = monitor.check(&spent(9_500)).unwrap().unwrap();
        assert_eq!(warning.total, Amount::from_units(9_500));
        assert_eq!(warning.ceiling, Amount::from_units(10_000));
    }

    #[test]
    fn silent_below_ninety_percent() {
        let monitor = ThresholdMonitor::new(Amount::from_units(10_000));
        assert_eq!(monitor.check(&spent(8_999)), Ok(None));
    }

    #[test]
    fn boundary_is_inclusive() {
        let monitor = ThresholdMonitor::new(Amount::from_units(10_000));
        assert!(monitor.check(&spent(9_000)).unwrap().is_some());
        assert!(monitor.check_total(Amount::new(899_999)).is_none());
    }

    #[test]
    fn repeats_on_every_call() {
        let monitor = ThresholdMonitor::new(Amount::from_units(100));
        let records = spent(95);
        assert!(monitor.check(&records).unwrap().is_some());
        assert!(monitor.check(&records).unwrap().is_some());
    }

    #[test]
    fn empty_ledger_warns_only_for_non_positive_ceiling() {
        assert!(ThresholdMonitor::new(Amount::from_units(1)).check(&[]).unwrap().is_none());
        assert!(ThresholdMonitor::new(Amount::ZERO).check(&[]).unwrap().is_some());
    }

    #[test]
    fn overflowing_total_is_reported_not_wrapped() {
        let monitor = ThresholdMonitor::new(Amount::new(10_000));
        let records = [
            Expense::new(ExpenseFields::new("a", Amount::new(i64::MAX), Utc::now(), "Food")),
            Expense::new(ExpenseFields::new("b", Amount::new(1), Utc::now(), "Food")),
        ];

        assert!(matches!(
            monitor.check(&records),
            Err(LedgerError::InvalidAmount(_))
        ));
    }
}
