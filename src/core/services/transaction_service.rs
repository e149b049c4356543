//! Turns raw user input into validated ledger requests.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::transaction::TransactionKind;
use crate::errors::LedgerError;

/// A parsed, not yet persisted, add request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub label: String,
    pub amount: Decimal,
}

/// Provides parsing helpers shared by every presentation front-end.
pub struct TransactionService;

impl TransactionService {
    /// Parses kind, description and amount exactly as typed by the user.
    pub fn parse_request(kind: &str, label: &str, amount: &str) -> ServiceResult<NewTransaction> {
        if kind.trim().is_empty() || label.trim().is_empty() || amount.trim().is_empty() {
            return Err(LedgerError::Validation(
                "please fill in kind, description and amount".into(),
            )
            .into());
        }
        let kind = TransactionKind::from_str(kind)?;
        let amount = Self::parse_amount(amount)?;
        if amount <= Decimal::ZERO {
            return Err(LedgerError::Validation(format!(
                "amount must be greater than zero (got {amount})"
            ))
            .into());
        }
        Ok(NewTransaction {
            kind,
            label: label.trim().to_string(),
            amount,
        })
    }

    /// Accepts `1200`, `1200.50`, `1,200.50` and `$1200.50`.
    pub fn parse_amount(raw: &str) -> ServiceResult<Decimal> {
        let cleaned: String = raw
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();
        Decimal::from_str(cleaned.trim()).map_err(|_| {
            ServiceError::from(LedgerError::Validation(format!(
                "`{}` is not a valid amount",
                raw.trim()
            )))
        })
    }

    /// Parses a transaction id typed by the user.
    pub fn parse_id(raw: &str) -> ServiceResult<u64> {
        raw.trim()
            .trim_start_matches('#')
            .parse::<u64>()
            .map_err(|_| ServiceError::Invalid(format!("`{}` is not a valid id", raw.trim())))
    }
}
