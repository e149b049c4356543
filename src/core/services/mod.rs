pub mod summary_service;
pub mod transaction_service;

pub use summary_service::{BudgetSummary, ExpenseShare, SummaryService};
pub use transaction_service::{NewTransaction, TransactionService};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}
