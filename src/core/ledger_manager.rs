use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::core::services::{BudgetSummary, NewTransaction, SummaryService};
use crate::errors::LedgerError;
use crate::ledger::{seed_ledger, Ledger, Transaction, TransactionKind};
use crate::storage::SnapshotStore;

/// Notifications emitted after the ledger changes.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    SampleDataLoaded { count: usize },
    TransactionAdded(Transaction),
    TransactionRemoved(Transaction),
    PersistenceFailed(String),
}

/// Receives ledger events, typically to re-render totals and lists.
pub trait LedgerObserver {
    fn on_event(&self, event: &LedgerEvent, ledger: &Ledger);
}

impl<F> LedgerObserver for F
where
    F: Fn(&LedgerEvent, &Ledger),
{
    fn on_event(&self, event: &LedgerEvent, ledger: &Ledger) {
        self(event, ledger)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ManagerOptions {
    /// Insert the sample records when the slot has never been written.
    pub seed_sample_data: bool,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
        }
    }
}

/// Where the initial ledger contents came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// The slot had never been written.
    Empty,
    /// The slot held a valid snapshot (possibly an empty one).
    Restored,
    /// The slot was unreadable or malformed and was ignored.
    Recovered { reason: String },
}

/// Metadata describing the outcome of opening the ledger.
#[derive(Debug, Clone)]
pub struct LoadMetadata {
    pub source: LoadSource,
    pub location: String,
    pub loaded: usize,
    pub seeded: usize,
}

/// Facade that owns the ledger, its persistence slot, and its observers.
pub struct LedgerManager {
    ledger: Ledger,
    storage: Box<dyn SnapshotStore>,
    observers: Vec<Box<dyn LedgerObserver>>,
    metadata: LoadMetadata,
    last_save_error: Option<String>,
}

impl LedgerManager {
    /// Loads the snapshot from `storage`, seeding sample data into a never-used slot.
    pub fn open(storage: Box<dyn SnapshotStore>, options: ManagerOptions) -> Self {
        Self::open_observed(storage, options, Vec::new())
    }

    /// Like [`LedgerManager::open`], with observers attached before seeding runs.
    pub fn open_observed(
        storage: Box<dyn SnapshotStore>,
        options: ManagerOptions,
        observers: Vec<Box<dyn LedgerObserver>>,
    ) -> Self {
        let location = storage.describe();
        let (ledger, source) = load_initial(storage.as_ref());
        let loaded = ledger.len();
        let mut manager = Self {
            ledger,
            storage,
            observers,
            metadata: LoadMetadata {
                source,
                location,
                loaded,
                seeded: 0,
            },
            last_save_error: None,
        };

        let slot_unused = !matches!(manager.metadata.source, LoadSource::Restored);
        if options.seed_sample_data && slot_unused && !manager.ledger.has_history() {
            manager.seed();
        }
        tracing::info!(
            location = %manager.metadata.location,
            loaded = manager.metadata.loaded,
            seeded = manager.metadata.seeded,
            "ledger opened"
        );
        manager
    }

    pub fn subscribe(&mut self, observer: Box<dyn LedgerObserver>) {
        self.observers.push(observer);
    }

    /// Adds a record and persists the full snapshot.
    ///
    /// A failed save does not undo the mutation; the ledger stays dirty and
    /// observers receive [`LedgerEvent::PersistenceFailed`].
    pub fn add(
        &mut self,
        kind: TransactionKind,
        label: &str,
        amount: Decimal,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Transaction, LedgerError> {
        let transaction = self.ledger.add(kind, label, amount, timestamp)?;
        self.persist();
        self.notify(&LedgerEvent::TransactionAdded(transaction.clone()));
        Ok(transaction)
    }

    pub fn add_request(&mut self, request: NewTransaction) -> Result<Transaction, LedgerError> {
        self.add(request.kind, &request.label, request.amount, None)
    }

    /// Removes a record and persists the full snapshot. Callers confirm with the user first.
    pub fn remove_by_id(&mut self, id: u64) -> Result<Transaction, LedgerError> {
        let removed = self.ledger.remove_by_id(id)?;
        self.persist();
        self.notify(&LedgerEvent::TransactionRemoved(removed.clone()));
        Ok(removed)
    }

    /// Retries persisting the current snapshot, e.g. after an earlier failure.
    pub fn save(&mut self) -> Result<(), LedgerError> {
        self.storage.save_snapshot(self.ledger.all())?;
        tracing::debug!(
            location = %self.metadata.location,
            records = self.ledger.len(),
            "snapshot saved"
        );
        self.ledger.mark_clean();
        self.last_save_error = None;
        Ok(())
    }

    pub fn list_by_kind(&self, kind: TransactionKind) -> Vec<&Transaction> {
        self.ledger.list_by_kind(kind)
    }

    pub fn all(&self) -> &[Transaction] {
        self.ledger.all()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn summary(&self) -> BudgetSummary {
        SummaryService::summarize(self.ledger.all())
    }

    pub fn load_metadata(&self) -> &LoadMetadata {
        &self.metadata
    }

    pub fn is_dirty(&self) -> bool {
        self.ledger.is_dirty()
    }

    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    fn seed(&mut self) {
        match seed_ledger(&mut self.ledger) {
            Ok(inserted) => {
                self.metadata.seeded = inserted.len();
                tracing::info!(count = inserted.len(), "sample data loaded");
                self.persist();
                self.notify(&LedgerEvent::SampleDataLoaded {
                    count: inserted.len(),
                });
            }
            Err(err) => tracing::warn!(error = %err, "sample data was not loaded"),
        }
    }

    fn persist(&mut self) {
        if let Err(err) = self.save() {
            let message = err.to_string();
            tracing::warn!(
                location = %self.metadata.location,
                error = %message,
                "snapshot save failed; keeping in-memory state"
            );
            self.last_save_error = Some(message.clone());
            self.notify(&LedgerEvent::PersistenceFailed(message));
        }
    }

    fn notify(&self, event: &LedgerEvent) {
        for observer in &self.observers {
            observer.on_event(event, &self.ledger);
        }
    }
}

fn load_initial(storage: &dyn SnapshotStore) -> (Ledger, LoadSource) {
    let outcome = storage
        .load_snapshot()
        .and_then(|snapshot| snapshot.map(Ledger::from_records).transpose());
    match outcome {
        Ok(Some(ledger)) => (ledger, LoadSource::Restored),
        Ok(None) => (Ledger::new(), LoadSource::Empty),
        Err(err) => {
            tracing::warn!(
                location = %storage.describe(),
                error = %err,
                "stored snapshot unreadable; starting with an empty ledger"
            );
            (
                Ledger::new(),
                LoadSource::Recovered {
                    reason: err.to_string(),
                },
            )
        }
    }
}
