//! The ledger value and its pure state transitions.
//!
//! A [`Ledger`] is never mutated in place: [`reduce`] returns a new value and
//! leaves the input untouched, so older values stay valid (undo, diffing,
//! snapshots in tests).

use serde::{Deserialize, Serialize};

use crate::{
    Amount, Expense, ExpenseId, ResultLedger,
    aggregate::{self, ExpenseFilter},
};

/// Operations accepted by the reducer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum LedgerAction {
    /// Append a new expense. Its id must not be present yet.
    Add(Expense),
    /// Replace the fields of the expense with the same id.
    Update(Expense),
    /// Drop the expense with this id.
    Remove(ExpenseId),
}

impl LedgerAction {
    /// The expense carried by the action, if any.
    pub fn expense(&self) -> Option<&Expense> {
        match self {
            Self::Add(expense) | Self::Update(expense) => Some(expense),
            Self::Remove(_) => None,
        }
    }
}

/// Ordered collection of expenses, unique by id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from records, keeping the first record of any
    /// duplicated id.
    pub fn from_records(records: impl IntoIterator<Item = Expense>) -> Self {
        records
            .into_iter()
            .fold(Self::new(), |ledger, expense| {
                reduce(&ledger, &LedgerAction::Add(expense))
            })
    }

    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: ExpenseId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.records.iter().find(|expense| expense.id == id)
    }

    pub fn apply(&self, action: &LedgerAction) -> Ledger {
        reduce(self, action)
    }

    pub fn total(&self) -> ResultLedger<Amount> {
        aggregate::total(&self.records)
    }

    pub fn filter(&self, filter: &ExpenseFilter) -> Vec<&Expense> {
        aggregate::filter(&self.records, filter)
    }
}

/// Computes the ledger that results from applying `action` to `ledger`.
///
/// Never fails. Adding an id that already exists, and updating or removing an
/// id that does not, all return an unchanged copy of `ledger`.
pub fn reduce(ledger: &Ledger, action: &LedgerAction) -> Ledger {
    match action {
        LedgerAction::Add(expense) => {
            if ledger.contains(expense.id) {
                return ledger.clone();
            }
            let mut records = Vec::with_capacity(ledger.records.len() + 1);
            records.extend_from_slice(&ledger.records);
            records.push(expense.clone());
            Ledger { records }
        }
        LedgerAction::Update(updated) => Ledger {
            records: ledger
                .records
                .iter()
                .map(|expense| {
                    if expense.id == updated.id {
                        let mut replaced = expense.clone();
                        replaced.replace_fields(updated.fields());
                        replaced
                    } else {
                        expense.clone()
                    }
                })
                .collect(),
        },
        LedgerAction::Remove(id) => Ledger {
            records: ledger
                .records
                .iter()
                .filter(|expense| expense.id != *id)
                .cloned()
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::ExpenseFields;

    fn expense(description: &str, units: i64, category: &str) -> Expense {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        Expense::new(ExpenseFields::new(
            description,
            Amount::from_units(units),
            at,
            category,
        ))
    }

    fn sample() -> Ledger {
        Ledger::from_records([
            expense("Groceries", 40, "Food"),
            expense("Train", 12, "Transport"),
            expense("Book", 20, "Education"),
        ])
    }

    #[test]
    fn add_appends_at_the_end() {
        let before = sample();
        let coffee = expense("Coffee", 3, "Food");

        let after = reduce(&before, &LedgerAction::Add(coffee.clone()));

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after.records()[..before.len()], before.records());
        assert_eq!(after.records().last(), Some(&coffee));
    }

    #[test]
    fn add_with_existing_id_is_a_no_op() {
        let before = sample();
        let mut clash = expense("Other", 1, "Personal");
        clash.id = before.records()[1].id;

        let after = reduce(&before, &LedgerAction::Add(clash));

        assert_eq!(after, before);
    }

    #[test]
    fn add_accepts_odd_values() {
        let mut odd = expense("", 0, "Food");
        odd.amount = Amount::new(-500);

        let after = reduce(&Ledger::new(), &LedgerAction::Add(odd.clone()));

        assert_eq!(after.records(), &[odd]);
    }

    #[test]
    fn remove_is_idempotent() {
        let before = sample();
        let id = before.records()[0].id;

        let once = reduce(&before, &LedgerAction::Remove(id));
        let twice = reduce(&once, &LedgerAction::Remove(id));

        assert_eq!(once.len(), 2);
        assert!(!once.contains(id));
        assert_eq!(once, twice);
    }

    #[test]
    fn remove_missing_id_is_a_no_op() {
        let before = sample();
        let after = reduce(&before, &LedgerAction::Remove(ExpenseId::new()));
        assert_eq!(after, before);
    }

    #[test]
    fn update_replaces_fields_in_place() {
        let before = sample();
        let mut changed = before.records()[1].clone();
        changed.description = "Night train".to_string();
        changed.amount = Amount::from_units(30);

        let after = reduce(&before, &LedgerAction::Update(changed.clone()));

        assert_eq!(after.len(), before.len());
        assert_eq!(after.records()[1], changed);
        assert_eq!(after.records()[0], before.records()[0]);
        assert_eq!(after.records()[2], before.records()[2]);
    }

    #[test]
    fn update_unknown_id_is_a_no_op() {
        let before = sample();
        let stranger = expense("Ghost", 99, "Personal");

        let after = reduce(&before, &LedgerAction::Update(stranger));

        assert_eq!(after, before);
    }

    #[test]
    fn previous_value_is_left_untouched() {
        let before = sample();
        let snapshot = before.clone();

        let _ = before.apply(&LedgerAction::Add(expense("Coffee", 3, "Food")));
        let _ = before.apply(&LedgerAction::Remove(before.records()[0].id));

        assert_eq!(before, snapshot);
    }

    #[test]
    fn from_records_drops_duplicate_ids() {
        let first = expense("Lunch", 10, "Food");
        let mut dup = expense("Dinner", 25, "Food");
        dup.id = first.id;

        let ledger = Ledger::from_records([first.clone(), dup]);

        assert_eq!(ledger.records(), &[first]);
    }

    #[test]
    fn action_serializes_with_type_tag() {
        let id = ExpenseId::new();
        let json = serde_json::to_value(LedgerAction::Remove(id)).unwrap();
        assert_eq!(json["type"], "remove");
        assert_eq!(json["payload"], id.to_string());
    }
}
