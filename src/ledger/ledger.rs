use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    common::Displayable,
    transaction::{Transaction, TransactionKind},
};
use crate::errors::LedgerError;

const FIRST_ID: u64 = 1;

/// Ordered collection of transactions plus the id-assignment authority.
///
/// The ledger performs no I/O. Every successful mutation leaves it dirty until
/// the owner reports a durable save through [`Ledger::mark_clean`].
#[derive(Debug, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    next_id: u64,
    dirty: bool,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: FIRST_ID,
            dirty: false,
        }
    }

    /// Rebuilds a ledger from a persisted snapshot, deriving the id counter from the data.
    pub fn from_records(records: Vec<Transaction>) -> Result<Self, LedgerError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.validate()?;
            if !seen.insert(record.id()) {
                return Err(LedgerError::Validation(format!(
                    "duplicate transaction id {} in snapshot",
                    record.id()
                )));
            }
        }
        let next_id = match records.iter().map(Transaction::id).max() {
            Some(max) => max.checked_add(1).ok_or_else(|| {
                LedgerError::Validation(format!("transaction id {max} leaves no room for new ids"))
            })?,
            None => FIRST_ID,
        };
        Ok(Self {
            transactions: records,
            next_id,
            dirty: false,
        })
    }

    /// Validates and appends a new record, assigning it the next id.
    pub fn add(
        &mut self,
        kind: TransactionKind,
        label: &str,
        amount: Decimal,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Transaction, LedgerError> {
        let transaction = Transaction::new(
            self.next_id,
            kind,
            label,
            amount,
            timestamp.unwrap_or_else(Utc::now),
        )?;
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| LedgerError::Validation("transaction ids are exhausted".into()))?;
        self.ensure_total_fits(kind, amount)?;
        self.next_id = next_id;
        self.transactions.push(transaction.clone());
        self.dirty = true;
        tracing::debug!(record = %transaction.display_label(), "transaction added");
        Ok(transaction)
    }

    /// Removes the record with `id`, preserving the order of the remaining ones.
    pub fn remove_by_id(&mut self, id: u64) -> Result<Transaction, LedgerError> {
        let index = self
            .transactions
            .iter()
            .position(|txn| txn.id() == id)
            .ok_or(LedgerError::NotFound(id))?;
        let removed = self.transactions.remove(index);
        self.dirty = true;
        tracing::debug!(record = %removed.display_label(), "transaction removed");
        Ok(removed)
    }

    /// Rejects amounts whose kind total could no longer be summed or turned into a percentage.
    fn ensure_total_fits(&self, kind: TransactionKind, amount: Decimal) -> Result<(), LedgerError> {
        let total = self
            .transactions
            .iter()
            .filter(|txn| txn.kind() == kind)
            .try_fold(amount, |acc, txn| acc.checked_add(txn.amount()));
        match total.and_then(|total| total.checked_mul(Decimal::ONE_HUNDRED)) {
            Some(_) => Ok(()),
            None => Err(LedgerError::Validation(format!(
                "amount {amount} is too large for the {kind} total"
            ))),
        }
    }

    pub fn list_by_kind(&self, kind: TransactionKind) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| txn.kind() == kind)
            .collect()
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id() == id)
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// True once any id has been handed out (or loaded), even if the records were deleted since.
    pub fn has_history(&self) -> bool {
        self.next_id > FIRST_ID
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
