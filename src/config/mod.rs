//! User preferences persisted next to the ledger data.

use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::core::utils::{ensure_dir, PathResolver};
use crate::currency::Locale;
use crate::storage::DEFAULT_SLOT_NAME;

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unknown setting `{0}`")]
    UnknownKey(String),
    #[error("Invalid value for `{key}`: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_slot_name")]
    pub slot_name: String,
    #[serde(default = "Config::default_true")]
    pub seed_sample_data: bool,
    #[serde(default = "Config::default_true")]
    pub ui_color_enabled: bool,
    /// Overrides where the snapshot slot lives. Defaults to `<base>/data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            currency_symbol: Self::default_currency_symbol(),
            slot_name: Self::default_slot_name(),
            seed_sample_data: true,
            ui_color_enabled: true,
            data_dir: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 5] = [
        "locale",
        "currency_symbol",
        "slot_name",
        "seed_sample_data",
        "ui_color_enabled",
    ];

    fn default_currency_symbol() -> String {
        "$".into()
    }

    fn default_slot_name() -> String {
        DEFAULT_SLOT_NAME.into()
    }

    fn default_true() -> bool {
        true
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathResolver::data_dir_in(base))
    }

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "locale" => self.locale = value.parse().map_err(|_| invalid())?,
            "currency_symbol" => {
                if value.trim().is_empty() {
                    return Err(invalid());
                }
                self.currency_symbol = value.trim().to_string();
            }
            "slot_name" => {
                if value.trim().is_empty() {
                    return Err(invalid());
                }
                self.slot_name = value.trim().to_string();
            }
            "seed_sample_data" => self.seed_sample_data = parse_bool(value).ok_or_else(invalid)?,
            "ui_color_enabled" => self.ui_color_enabled = parse_bool(value).ok_or_else(invalid)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        Ok(match key {
            "locale" => self.locale.to_string(),
            "currency_symbol" => self.currency_symbol.clone(),
            "slot_name" => self.slot_name.clone(),
            "seed_sample_data" => self.seed_sample_data.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Loads and saves [`Config`] as JSON under the application directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension(format!("json.{TMP_SUFFIX}"));
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.slot_name, "budget_transactions");
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("locale", "en-US").unwrap();
        config.set("seed_sample_data", "no").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.locale, Locale::English);
        assert!(!loaded.seed_sample_data);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"currency_symbol":"€"}"#).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert!(loaded.seed_sample_data);
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("theme", "dark"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set("ui_color_enabled", "maybe"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn data_dir_defaults_under_base() {
        let config = Config::default();
        let base = PathBuf::from("/srv/tracker");
        assert_eq!(config.resolve_data_dir(&base), base.join("data"));
    }
}
