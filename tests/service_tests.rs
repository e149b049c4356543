use budget_tracker::{
    core::ledger_manager::{LedgerManager, ManagerOptions},
    core::services::{SummaryService, TransactionService},
    currency::{format_amount, format_ratio, format_share},
    errors::LedgerError,
    ledger::TransactionKind,
    storage::MemoryStore,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn seeded() -> LedgerManager {
    LedgerManager::open(Box::new(MemoryStore::new()), ManagerOptions::default())
}

fn empty() -> LedgerManager {
    LedgerManager::open(
        Box::new(MemoryStore::new()),
        ManagerOptions {
            seed_sample_data: false,
        },
    )
}

#[test]
fn sample_data_totals() {
    let manager = seeded();
    let summary = manager.summary();
    assert_eq!(summary.total_income, dec!(3300));
    assert_eq!(summary.total_expense, dec!(1700));
    assert_eq!(summary.net_balance, dec!(1600));
    assert_eq!(format_ratio(summary.expense_percentage), "52%");
    assert_eq!(format_amount(summary.net_balance, "$"), "$1600.00");

    let labels: Vec<&str> = summary
        .expense_shares
        .iter()
        .map(|share| share.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Alquiler", "Supermercado", "Transporte"]);
    assert_eq!(format_share(summary.expense_shares[2].share), "4.5%");
}

#[test]
fn expense_share_is_measured_against_income() {
    let mut manager = empty();
    manager
        .add(TransactionKind::Income, "Salary", dec!(2500), None)
        .unwrap();
    let groceries = manager
        .add(TransactionKind::Expense, "Groceries", dec!(350), None)
        .unwrap();
    let share = SummaryService::per_expense_share(&groceries, manager.all());
    assert_eq!(format_share(share), "14.0%");
}

#[test]
fn no_income_means_zero_percentages() {
    let mut manager = empty();
    let rent = manager
        .add(TransactionKind::Expense, "Rent", dec!(800), None)
        .unwrap();
    let summary = manager.summary();
    assert_eq!(summary.net_balance, dec!(-800));
    assert_eq!(summary.expense_percentage, Decimal::ZERO);
    assert_eq!(
        SummaryService::per_expense_share(&rent, manager.all()),
        Decimal::ZERO
    );
}

#[test]
fn overspending_pushes_ratio_past_one_hundred() {
    let mut manager = empty();
    manager
        .add(TransactionKind::Income, "Part time", dec!(1000), None)
        .unwrap();
    manager
        .add(TransactionKind::Expense, "Rent", dec!(1500), None)
        .unwrap();
    assert_eq!(format_ratio(manager.summary().expense_percentage), "150%");
}

#[test]
fn parsed_requests_flow_into_the_ledger() {
    let mut manager = empty();
    let request = TransactionService::parse_request("ingreso", "  Freelance  ", "$1,250.50").unwrap();
    let txn = manager.add_request(request).unwrap();
    assert_eq!(txn.label(), "Freelance");
    assert_eq!(txn.amount(), dec!(1250.50));
    assert_eq!(manager.list_by_kind(TransactionKind::Income).len(), 1);
}

#[test]
fn blank_description_is_rejected_without_side_effects() {
    let mut manager = empty();
    let err = manager
        .add(TransactionKind::Expense, "   ", dec!(10), None)
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert!(manager.all().is_empty());
    assert_eq!(manager.ledger().next_id(), 1);
}

#[test]
fn removing_unknown_id_is_not_found() {
    let mut manager = seeded();
    let err = manager.remove_by_id(42).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(42)));
    assert_eq!(manager.all().len(), 5);
}

#[test]
fn list_by_kind_preserves_insertion_order() {
    let manager = seeded();
    let incomes: Vec<u64> = manager
        .list_by_kind(TransactionKind::Income)
        .iter()
        .map(|txn| txn.id())
        .collect();
    let expenses: Vec<u64> = manager
        .list_by_kind(TransactionKind::Expense)
        .iter()
        .map(|txn| txn.id())
        .collect();
    assert_eq!(incomes, vec![1, 2]);
    assert_eq!(expenses, vec![3, 4, 5]);
}

#[test]
fn amounts_too_large_to_total_are_rejected() {
    let mut manager = empty();
    let huge = "79228162514264337593543950335";
    let request = TransactionService::parse_request("income", "Jackpot", huge).unwrap();
    let err = manager.add_request(request).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert!(manager.all().is_empty());

    manager
        .add(TransactionKind::Income, "Salary", dec!(2500), None)
        .unwrap();
    let summary = manager.summary();
    assert_eq!(summary.total_income, dec!(2500));
}

#[test]
fn deleting_a_middle_record_keeps_the_others_in_order() {
    let mut manager = seeded();
    manager.remove_by_id(3).unwrap();
    let ids: Vec<u64> = manager.all().iter().map(|txn| txn.id()).collect();
    assert_eq!(ids, vec![1, 2, 4, 5]);
}

#[test]
fn add_then_remove_returns_to_previous_content() {
    let mut manager = seeded();
    let before = manager.all().to_vec();
    let next_before = manager.ledger().next_id();

    let txn = manager
        .add(TransactionKind::Expense, "Cinema", dec!(12), None)
        .unwrap();
    manager.remove_by_id(txn.id()).unwrap();

    assert_eq!(manager.all(), before.as_slice());
    assert!(manager.ledger().next_id() > next_before);
}
