//! Totals and percentages derived from a ledger snapshot.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::transaction::{Transaction, TransactionKind};

/// Aggregate figures for a snapshot, kept at full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
    pub expense_percentage: Decimal,
    pub expense_shares: Vec<ExpenseShare>,
}

/// Fraction of total income consumed by a single expense.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseShare {
    pub id: u64,
    pub label: String,
    pub amount: Decimal,
    pub share: Decimal,
}

pub struct SummaryService;

impl SummaryService {
    pub fn total_income(records: &[Transaction]) -> Decimal {
        sum_kind(records, TransactionKind::Income)
    }

    pub fn total_expense(records: &[Transaction]) -> Decimal {
        sum_kind(records, TransactionKind::Expense)
    }

    /// Income minus expense. Negative balances are reported as such.
    pub fn net_balance(records: &[Transaction]) -> Decimal {
        Self::total_income(records) - Self::total_expense(records)
    }

    /// Total expense as a percentage of total income; zero without income.
    pub fn expense_percentage_of_income(records: &[Transaction]) -> Decimal {
        percentage_of(
            Self::total_expense(records),
            Self::total_income(records),
        )
    }

    /// Percentage of total income consumed by `record`; zero without income.
    ///
    /// Shares are measured against income, so they need not add up to 100.
    pub fn per_expense_share(record: &Transaction, records: &[Transaction]) -> Decimal {
        percentage_of(record.amount(), Self::total_income(records))
    }

    pub fn summarize(records: &[Transaction]) -> BudgetSummary {
        let total_income = Self::total_income(records);
        let total_expense = Self::total_expense(records);
        let expense_shares = records
            .iter()
            .filter(|txn| txn.is_expense())
            .map(|txn| ExpenseShare {
                id: txn.id(),
                label: txn.label().to_string(),
                amount: txn.amount(),
                share: percentage_of(txn.amount(), total_income),
            })
            .collect();
        BudgetSummary {
            total_income,
            total_expense,
            net_balance: total_income - total_expense,
            expense_percentage: percentage_of(total_expense, total_income),
            expense_shares,
        }
    }
}

/// Saturates at `Decimal::MAX`; only a hand-edited snapshot can get there.
fn sum_kind(records: &[Transaction], kind: TransactionKind) -> Decimal {
    records
        .iter()
        .filter(|txn| txn.kind() == kind)
        .try_fold(Decimal::ZERO, |acc, txn| acc.checked_add(txn.amount()))
        .unwrap_or(Decimal::MAX)
}

fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        part.checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(whole))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    }
}
