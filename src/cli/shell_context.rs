use std::path::PathBuf;

use chrono::Local;
use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::ledger_manager::{LedgerEvent, LedgerManager, LedgerObserver, ManagerOptions},
    currency::month_title,
    ledger::{Ledger, TransactionKind},
    storage::JsonFileStore,
};

use super::core::CliError;
use super::output::{self, OutputPreferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub ledger_manager: LedgerManager,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub data_dir: PathBuf,
    pub running: bool,
}

impl ShellContext {
    /// Loads the configuration and opens the snapshot slot it points at.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        apply_config(&config);
        let data_dir = config.resolve_data_dir(config_manager.base_dir());
        let store = JsonFileStore::new(data_dir.clone(), &config.slot_name)?;
        let manager = LedgerManager::open_observed(
            Box::new(store),
            ManagerOptions {
                seed_sample_data: config.seed_sample_data,
            },
            vec![Box::new(ConsoleNotifier)],
        );
        Ok(Self::from_parts(mode, config_manager, config, data_dir, manager))
    }

    pub(crate) fn from_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        data_dir: PathBuf,
        ledger_manager: LedgerManager,
    ) -> Self {
        apply_config(&config);
        Self {
            mode,
            ledger_manager,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            data_dir,
            running: true,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        self.ledger_manager.ledger()
    }

    /// Localized header for the current month.
    pub fn title(&self) -> String {
        month_title(Local::now(), self.config.locale)
    }

    pub fn prompt(&self) -> String {
        format!("budget [{}]> ", self.ledger().len())
    }
}

pub(crate) fn apply_config(config: &Config) {
    output::set_preferences(OutputPreferences {
        color_enabled: config.ui_color_enabled,
    });
}

/// Prints a line for every ledger change so the user sees the effect immediately.
pub struct ConsoleNotifier;

impl LedgerObserver for ConsoleNotifier {
    fn on_event(&self, event: &LedgerEvent, ledger: &Ledger) {
        match event {
            LedgerEvent::SampleDataLoaded { count } => {
                output::success(format!("Sample data loaded ({count} records)."));
            }
            LedgerEvent::TransactionAdded(txn) => {
                let what = match txn.kind() {
                    TransactionKind::Income => "Income",
                    TransactionKind::Expense => "Expense",
                };
                output::success(format!(
                    "{what} added: #{} {} ({} records).",
                    txn.id(),
                    txn.label(),
                    ledger.len()
                ));
            }
            LedgerEvent::TransactionRemoved(txn) => {
                output::success(format!("Transaction \"{}\" deleted.", txn.label()));
            }
            LedgerEvent::PersistenceFailed(reason) => {
                output::warning(format!("Changes kept in memory but not saved: {reason}"));
            }
        }
    }
}
