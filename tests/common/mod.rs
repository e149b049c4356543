#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use budget_tracker::{
    config::ConfigManager,
    core::ledger_manager::{LedgerManager, ManagerOptions},
    storage::JsonFileStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a file-backed manager in its own directory.
pub fn setup_test_env(seed: bool) -> (LedgerManager, ConfigManager, PathBuf) {
    let base = temp_base();
    let data_dir = base.join("data");
    let manager = open_in(&data_dir, seed);
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    (manager, config_manager, data_dir)
}

/// Re-opens the default slot under `data_dir`, as a new session would.
pub fn open_in(data_dir: &std::path::Path, seed: bool) -> LedgerManager {
    let store = JsonFileStore::in_dir(data_dir).expect("create json store");
    LedgerManager::open(
        Box::new(store),
        ManagerOptions {
            seed_sample_data: seed,
        },
    )
}
