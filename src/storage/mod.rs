pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use crate::{domain::transaction::Transaction, errors::LedgerError};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over the single durable slot that holds the ledger snapshot.
pub trait SnapshotStore: Send + Sync {
    /// Reads the stored snapshot. `Ok(None)` means the slot has never been written.
    fn load_snapshot(&self) -> Result<Option<Vec<Transaction>>>;

    /// Replaces the whole snapshot. A failed write must leave the previous one intact.
    fn save_snapshot(&self, records: &[Transaction]) -> Result<()>;

    /// Human readable location of the slot, used in logs.
    fn describe(&self) -> String;
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for Arc<T> {
    fn load_snapshot(&self) -> Result<Option<Vec<Transaction>>> {
        (**self).load_snapshot()
    }

    fn save_snapshot(&self, records: &[Transaction]) -> Result<()> {
        (**self).save_snapshot(records)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

pub use json_backend::{JsonFileStore, DEFAULT_SLOT_NAME};
pub use memory::MemoryStore;

pub(crate) fn serialize_snapshot(records: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parses a stored snapshot; a literal `null` counts as an empty slot.
pub(crate) fn deserialize_snapshot(data: &str) -> Result<Option<Vec<Transaction>>> {
    if data.trim().is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_str::<Option<Vec<Transaction>>>(data)?)
}
