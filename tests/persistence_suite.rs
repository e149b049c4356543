mod common;

use std::fs;

use budget_tracker::{
    core::ledger_manager::LoadSource,
    ledger::TransactionKind,
    storage::{JsonFileStore, SnapshotStore},
};
use rust_decimal_macros::dec;

#[test]
fn first_session_seeds_and_second_session_restores() {
    let (manager, _config, data_dir) = common::setup_test_env(true);
    assert_eq!(manager.load_metadata().source, LoadSource::Empty);
    assert_eq!(manager.all().len(), 5);
    drop(manager);

    let reopened = common::open_in(&data_dir, true);
    assert_eq!(reopened.load_metadata().source, LoadSource::Restored);
    assert_eq!(reopened.load_metadata().seeded, 0);
    assert_eq!(reopened.all().len(), 5);
}

#[test]
fn mutations_survive_a_restart() {
    let (mut manager, _config, data_dir) = common::setup_test_env(false);
    manager
        .add(TransactionKind::Income, "Bonus", dec!(120.25), None)
        .unwrap();
    let rent = manager
        .add(TransactionKind::Expense, "Rent", dec!(900), None)
        .unwrap();
    manager.remove_by_id(rent.id()).unwrap();
    drop(manager);

    let mut reopened = common::open_in(&data_dir, false);
    assert_eq!(reopened.all().len(), 1);
    assert_eq!(reopened.all()[0].label(), "Bonus");
    assert_eq!(reopened.all()[0].amount(), dec!(120.25));

    // Numbering resumes after the highest stored id.
    let next = reopened
        .add(TransactionKind::Expense, "Coffee", dec!(3), None)
        .unwrap();
    assert_eq!(next.id(), 2);
}

#[test]
fn deleting_everything_does_not_bring_samples_back() {
    let (mut manager, _config, data_dir) = common::setup_test_env(true);
    let ids: Vec<u64> = manager.all().iter().map(|txn| txn.id()).collect();
    for id in ids {
        manager.remove_by_id(id).unwrap();
    }
    assert!(manager.all().is_empty());
    drop(manager);

    let reopened = common::open_in(&data_dir, true);
    assert_eq!(reopened.load_metadata().source, LoadSource::Restored);
    assert!(reopened.all().is_empty());
}

#[test]
fn malformed_slot_is_replaced_by_samples() {
    let data_dir = common::temp_base().join("data");
    let store = JsonFileStore::in_dir(&data_dir).unwrap();
    fs::write(store.path(), "{ not json").unwrap();

    let manager = common::open_in(&data_dir, true);
    assert!(matches!(
        manager.load_metadata().source,
        LoadSource::Recovered { .. }
    ));
    assert_eq!(manager.all().len(), 5);

    let rewritten = store.load_snapshot().unwrap().expect("slot rewritten");
    assert_eq!(rewritten.len(), 5);
}

#[test]
fn legacy_field_names_are_accepted() {
    let data_dir = common::temp_base().join("data");
    let store = JsonFileStore::in_dir(&data_dir).unwrap();
    fs::write(
        store.path(),
        r#"[{"id": 7, "type": "expense", "description": "Internet", "amount": 49.99, "date": "2026-10-01T10:00:00Z"}]"#,
    )
    .unwrap();

    let manager = common::open_in(&data_dir, true);
    assert_eq!(manager.load_metadata().source, LoadSource::Restored);
    let txn = &manager.all()[0];
    assert_eq!(txn.id(), 7);
    assert_eq!(txn.kind(), TransactionKind::Expense);
    assert_eq!(txn.label(), "Internet");
    assert_eq!(txn.amount(), dec!(49.99));
    assert_eq!(manager.ledger().next_id(), 8);
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let (mut manager, _config, data_dir) = common::setup_test_env(true);
    let store = JsonFileStore::in_dir(&data_dir).unwrap();
    let original = fs::read_to_string(store.path()).expect("read original file");

    // A directory at the temp path makes File::create fail.
    let mut tmp_path = store.path().to_path_buf();
    tmp_path.set_extension("json.tmp");
    fs::create_dir_all(&tmp_path).unwrap();

    manager
        .add(TransactionKind::Expense, "Cinema", dec!(12), None)
        .expect("in-memory add still succeeds");
    assert_eq!(manager.all().len(), 6);
    assert!(manager.is_dirty());
    assert!(manager.last_save_error().is_some());

    let after = fs::read_to_string(store.path()).expect("read after failed save");
    assert_eq!(original, after);

    fs::remove_dir_all(&tmp_path).unwrap();
    manager.save().expect("retry after clearing the obstacle");
    assert_eq!(store.load_snapshot().unwrap().unwrap().len(), 6);
}
