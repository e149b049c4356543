pub mod common;
pub mod transaction;

pub use common::Displayable;
pub use transaction::{Transaction, TransactionKind};
