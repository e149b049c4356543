//! Sample data written into a brand new ledger.

use rust_decimal::Decimal;

use super::{Ledger, Transaction, TransactionKind};
use crate::errors::LedgerError;

/// One sample record, amount expressed in cents.
#[derive(Debug, Clone, Copy)]
pub struct SampleEntry {
    pub kind: TransactionKind,
    pub label: &'static str,
    pub amount_cents: i64,
}

impl SampleEntry {
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.amount_cents, 2)
    }
}

/// Two incomes followed by three expenses, inserted in this order.
pub const SAMPLE_ENTRIES: [SampleEntry; 5] = [
    SampleEntry {
        kind: TransactionKind::Income,
        label: "Salario",
        amount_cents: 250_000,
    },
    SampleEntry {
        kind: TransactionKind::Income,
        label: "Freelance",
        amount_cents: 80_000,
    },
    SampleEntry {
        kind: TransactionKind::Expense,
        label: "Alquiler",
        amount_cents: 120_000,
    },
    SampleEntry {
        kind: TransactionKind::Expense,
        label: "Supermercado",
        amount_cents: 35_000,
    },
    SampleEntry {
        kind: TransactionKind::Expense,
        label: "Transporte",
        amount_cents: 15_000,
    },
];

/// Inserts the sample set through the regular `add` path.
///
/// Refuses to touch a ledger that has ever held a record.
pub fn seed_ledger(ledger: &mut Ledger) -> Result<Vec<Transaction>, LedgerError> {
    if ledger.has_history() {
        return Err(LedgerError::Validation(
            "sample data can only be loaded into a fresh ledger".into(),
        ));
    }
    SAMPLE_ENTRIES
        .iter()
        .map(|entry| ledger.add(entry.kind, entry.label, entry.amount(), None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn seeds_fresh_ledger_in_fixed_order() {
        let mut ledger = Ledger::new();
        let inserted = seed_ledger(&mut ledger).expect("seed fresh ledger");
        let labels: Vec<_> = inserted.iter().map(|txn| txn.label()).collect();
        assert_eq!(
            labels,
            ["Salario", "Freelance", "Alquiler", "Supermercado", "Transporte"]
        );
        assert_eq!(ledger.next_id(), 6);
        assert_eq!(inserted[0].amount(), dec!(2500.00));
    }

    #[test]
    fn refuses_ledger_that_was_emptied_by_deletion() {
        let mut ledger = Ledger::new();
        let txn = ledger
            .add(TransactionKind::Income, "Bonus", dec!(10), None)
            .unwrap();
        ledger.remove_by_id(txn.id()).unwrap();

        assert!(seed_ledger(&mut ledger).is_err());
        assert!(ledger.is_empty());
    }
}
