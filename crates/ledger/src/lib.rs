//! In-memory expense ledger with write-through persistence.
//!
//! [`Ledger`] owns the ordered record collection. It is seeded from a
//! [`Store`] when opened and rewrites the whole collection through the store
//! after every append; reads never touch the store. All mutation goes
//! through [`Ledger::add_expense`], which validates the raw user input
//! before anything changes.

use tokio::sync::broadcast;

pub use error::{StoreError, ValidationError};
pub use events::LedgerEvent;
pub use record::Record;
pub use store::{JsonStore, LEDGER_KEY, MemoryStore, Store};

mod error;
mod events;
mod record;
mod store;

/// The authoritative expense collection and its persistence hook.
///
/// One instance per process, driven from a single task: `&mut self` on the
/// only mutating operation keeps appends serialized without internal locks.
#[derive(Debug)]
pub struct Ledger<S: Store> {
    records: Vec<Record>,
    store: S,
    events: broadcast::Sender<LedgerEvent>,
    startup_error: Option<StoreError>,
}

impl<S: Store> Ledger<S> {
    /// Seed a ledger from `store`.
    ///
    /// Never fails the caller: no prior data starts the ledger empty, and a
    /// load error does too. The error is logged, kept readable through
    /// [`Ledger::startup_error`] and the ledger stays fully usable.
    pub async fn open(store: S) -> Ledger<S> {
        let (records, startup_error) = match store.load().await {
            Ok(Some(records)) => (records, None),
            Ok(None) => (Vec::new(), None),
            Err(err) => {
                tracing::warn!("failed to load stored expenses, starting empty: {err}");
                (Vec::new(), Some(err))
            }
        };
        tracing::debug!("ledger opened with {} records", records.len());

        Ledger {
            records,
            store,
            events: events::channel(),
            startup_error,
        }
    }

    /// Validate raw user input and append a new expense.
    ///
    /// Both fields arrive as typed text. The trimmed name must be non-empty
    /// and the amount must parse to a finite number; any rejection leaves
    /// the ledger untouched. A successful append rewrites the whole
    /// collection through the store. A failed save is NOT rolled back: the
    /// record stays visible, the failure goes out as
    /// [`LedgerEvent::SaveFailed`] and the call still returns `Ok`.
    pub async fn add_expense(
        &mut self,
        name: &str,
        amount: &str,
    ) -> Result<&Record, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let raw_amount = amount.trim();
        if raw_amount.is_empty() {
            return Err(ValidationError::EmptyAmount);
        }
        let amount: f64 = raw_amount
            .parse()
            .map_err(|_| ValidationError::InvalidAmount(raw_amount.to_string()))?;
        if !amount.is_finite() {
            return Err(ValidationError::InvalidAmount(raw_amount.to_string()));
        }

        let record = Record::new(name.to_string(), amount);
        debug_assert!(
            self.records.iter().all(|existing| existing.id != record.id),
            "duplicate record id {}",
            record.id
        );
        tracing::debug!("appending expense {record}");
        self.records.push(record);

        if let Err(err) = self.store.save(&self.records).await {
            tracing::warn!("failed to persist {} records: {err}", self.records.len());
            let _ = self.events.send(LedgerEvent::SaveFailed(err.to_string()));
        }
        let _ = self.events.send(LedgerEvent::Changed);

        Ok(&self.records[self.records.len() - 1])
    }

    /// Current records, oldest first. The slice is a read-only view;
    /// mutation goes through [`Ledger::add_expense`] only.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Sum of all amounts, recomputed in insertion order on every call.
    pub fn total(&self) -> f64 {
        self.records.iter().map(|record| record.amount).sum()
    }

    /// Subscribe to change and storage-failure notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    /// Load error swallowed while opening, if any. The ledger started empty
    /// and keeps working; the caller decides how loudly to warn.
    pub fn startup_error(&self) -> Option<&StoreError> {
        self.startup_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn ledger() -> Ledger<MemoryStore> {
        Ledger::open(MemoryStore::new()).await
    }

    #[tokio::test]
    async fn add_expense() {
        let mut ledger = ledger().await;
        ledger.add_expense("Coffee", "3.50").await.unwrap();
        let record = &ledger.records()[0];

        assert_eq!(record.name, "Coffee");
        assert_eq!(record.amount, 3.50);
        assert_eq!(ledger.total(), 3.50);
    }

    #[tokio::test]
    async fn add_expense_trims_input() {
        let mut ledger = ledger().await;
        ledger.add_expense("  Coffee  ", "  3.50  ").await.unwrap();

        assert_eq!(ledger.records()[0].name, "Coffee");
        assert_eq!(ledger.records()[0].amount, 3.50);
    }

    #[tokio::test]
    async fn negative_amounts_are_permitted() {
        let mut ledger = ledger().await;
        ledger.add_expense("Coffee", "3.50").await.unwrap();
        ledger.add_expense("Refund", "-3.50").await.unwrap();

        assert_eq!(ledger.records().len(), 2);
        assert_eq!(ledger.total(), 0.0);
    }

    #[tokio::test]
    async fn rejects_blank_name() {
        let mut ledger = ledger().await;
        let err = ledger.add_expense("   ", "10").await.unwrap_err();

        assert_eq!(err, ValidationError::EmptyName);
        assert!(ledger.records().is_empty());
    }

    #[tokio::test]
    async fn rejects_non_finite_amount() {
        let mut ledger = ledger().await;

        for raw in ["NaN", "inf", "-inf"] {
            let err = ledger.add_expense("Coffee", raw).await.unwrap_err();
            assert_eq!(err, ValidationError::InvalidAmount(raw.to_string()));
        }
        assert!(ledger.records().is_empty());
        assert_eq!(ledger.total(), 0.0);
    }
}
