//! In-memory ledger of income and expense records.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod seed;

pub use crate::domain::transaction::{Transaction, TransactionKind};
pub use ledger::Ledger;
pub use seed::{seed_ledger, SampleEntry, SAMPLE_ENTRIES};
