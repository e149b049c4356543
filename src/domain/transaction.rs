//! Domain model for a single income or expense entry.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;
use crate::errors::LedgerError;

/// Income or expense classification of a record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "ingreso" => Ok(TransactionKind::Income),
            "expense" | "egreso" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::Validation(format!(
                "unrecognized transaction kind `{other}` (expected `income` or `expense`)"
            ))),
        }
    }
}

/// A recorded income or expense. Fields are fixed once the ledger creates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    id: u64,
    #[serde(alias = "type")]
    kind: TransactionKind,
    #[serde(alias = "description")]
    label: String,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    #[serde(alias = "date", default = "Utc::now")]
    timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Builds a record after validating label and amount. Ids come from the ledger.
    pub(crate) fn new(
        id: u64,
        kind: TransactionKind,
        label: &str,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, LedgerError> {
        let label = validate_label(label)?;
        validate_amount(amount)?;
        Ok(Self {
            id,
            kind,
            label,
            amount,
            timestamp,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Re-checks invariants on a record that came from outside the ledger (e.g. a snapshot).
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.id == 0 {
            return Err(LedgerError::Validation(
                "transaction id must be positive".into(),
            ));
        }
        validate_label(&self.label)?;
        validate_amount(self.amount)
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("#{} {} [{}]", self.id, self.label, self.kind)
    }
}

fn validate_label(label: &str) -> Result<String, LedgerError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::Validation(
            "description must not be empty".into(),
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "amount must be greater than zero (got {amount})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(
            "Income".parse::<TransactionKind>().unwrap(),
            TransactionKind::Income
        );
        assert_eq!(
            " EXPENSE ".parse::<TransactionKind>().unwrap(),
            TransactionKind::Expense
        );
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn new_rejects_blank_label_and_non_positive_amounts() {
        let now = Utc::now();
        assert!(Transaction::new(1, TransactionKind::Expense, "   ", dec!(5), now).is_err());
        assert!(Transaction::new(1, TransactionKind::Expense, "Rent", dec!(0), now).is_err());
        assert!(Transaction::new(1, TransactionKind::Expense, "Rent", dec!(-3.5), now).is_err());

        let txn = Transaction::new(1, TransactionKind::Expense, "  Rent ", dec!(3.5), now)
            .expect("valid transaction");
        assert_eq!(txn.label(), "Rent");
    }

    #[test]
    fn serializes_kind_and_amount_as_plain_values() {
        let txn = Transaction::new(
            7,
            TransactionKind::Income,
            "Salario",
            dec!(2500.5),
            Utc::now(),
        )
        .unwrap();
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["kind"], "income");
        assert_eq!(value["amount"].as_f64(), Some(2500.5));
        assert_eq!(value["id"], 7);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn deserializes_records_written_with_legacy_field_names() {
        let raw = r#"{"id":3,"type":"expense","description":"Alquiler","amount":1200,"date":"2024-03-01T10:00:00.000Z"}"#;
        let txn: Transaction = serde_json::from_str(raw).expect("legacy record");
        assert_eq!(txn.id(), 3);
        assert!(txn.is_expense());
        assert_eq!(txn.label(), "Alquiler");
        assert_eq!(txn.amount(), dec!(1200));
    }

    #[test]
    fn display_label_names_id_and_kind() {
        let txn = Transaction::new(4, TransactionKind::Expense, "Luz", dec!(60), Utc::now()).unwrap();
        assert_eq!(txn.display_label(), "#4 Luz [Expense]");
    }
}
