use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid transaction: {0}")]
    Validation(String),
    #[error("Transaction not found: {0}")]
    NotFound(u64),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    /// Validation and lookup failures are recoverable user input problems.
    pub fn is_user_error(&self) -> bool {
        matches!(self, LedgerError::Validation(_) | LedgerError::NotFound(_))
    }
}
