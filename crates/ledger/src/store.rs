//! Observable holder of the current ledger.
//!
//! The presentation layer dispatches [`LedgerAction`]s and subscribes to
//! changes; after each dispatch the new ledger and the threshold check are
//! pushed to every listener in registration order.
//!
//! The store has no internal synchronization. Share it behind a mutex (or a
//! single-owner task) so that one dispatch runs at a time.

use crate::{
    Ledger, LedgerAction, ResultLedger, ThresholdMonitor, ThresholdWarning, ValidationPolicy,
    reduce,
};

/// Handle returned by [`LedgerStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&Ledger, Option<&ThresholdWarning>) + Send + Sync>;

pub struct LedgerStore {
    ledger: Ledger,
    monitor: ThresholdMonitor,
    policy: ValidationPolicy,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl LedgerStore {
    pub fn new(monitor: ThresholdMonitor, policy: ValidationPolicy) -> Self {
        Self::with_ledger(Ledger::new(), monitor, policy)
    }

    pub fn with_ledger(ledger: Ledger, monitor: ThresholdMonitor, policy: ValidationPolicy) -> Self {
        Self {
            ledger,
            monitor,
            policy,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The current ledger value.
    pub fn state(&self) -> &Ledger {
        &self.ledger
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&Ledger, Option<&ThresholdWarning>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Validates, reduces and notifies.
    ///
    /// A record rejected by the validation policy, or one that would push the
    /// total out of range, leaves the ledger untouched and notifies nobody.
    /// Otherwise the threshold check runs on the new ledger and its result is
    /// returned.
    pub fn dispatch(&mut self, action: LedgerAction) -> ResultLedger<Option<ThresholdWarning>> {
        if let Some(expense) = action.expense() {
            self.policy.validate(&expense.fields())?;
        }

        match &action {
            LedgerAction::Add(expense) if self.ledger.contains(expense.id) => {
                tracing::warn!("ignoring add of already present expense {}", expense.id);
            }
            LedgerAction::Update(expense) if !self.ledger.contains(expense.id) => {
                tracing::debug!("ignoring update of unknown expense {}", expense.id);
            }
            LedgerAction::Remove(id) if !self.ledger.contains(*id) => {
                tracing::debug!("ignoring remove of unknown expense {id}");
            }
            _ => {}
        }

        let next = reduce(&self.ledger, &action);
        let warning = self.monitor.check(next.records())?;
        self.ledger = next;

        if let Some(warning) = &warning {
            tracing::warn!(
                "expenses total {} reached 90% of ceiling {}",
                warning.total,
                warning.ceiling
            );
        }

        for (_, listener) in &self.listeners {
            listener(&self.ledger, warning.as_ref());
        }

        Ok(warning)
    }
}

impl std::fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStore")
            .field("ledger", &self.ledger)
            .field("monitor", &self.monitor)
            .field("policy", &self.policy)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
