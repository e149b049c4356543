use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use crate::{domain::transaction::Transaction, errors::LedgerError};

use super::{deserialize_snapshot, serialize_snapshot, Result, SnapshotStore};

/// In-process slot holding the serialized snapshot, like a browser key-value entry.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with raw slot contents, which need not be valid.
    pub fn with_raw(data: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(data.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes subsequent saves fail without touching the stored data.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current raw slot contents.
    pub fn raw(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|_| LedgerError::Persistence("memory slot lock poisoned".into()))
    }
}

impl SnapshotStore for MemoryStore {
    fn load_snapshot(&self) -> Result<Option<Vec<Transaction>>> {
        match self.lock()?.as_deref() {
            Some(data) => deserialize_snapshot(data),
            None => Ok(None),
        }
    }

    fn save_snapshot(&self, records: &[Transaction]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::Persistence("memory slot is read-only".into()));
        }
        let json = serialize_snapshot(records)?;
        *self.lock()? = Some(json);
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory slot".into()
    }
}
