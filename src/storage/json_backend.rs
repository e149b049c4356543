use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::ensure_dir, domain::transaction::Transaction, errors::LedgerError,
};

use super::{deserialize_snapshot, serialize_snapshot, Result, SnapshotStore};

pub const DEFAULT_SLOT_NAME: &str = "budget_transactions";
const SNAPSHOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed slot: one JSON document per slot name.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>, slot_name: &str) -> Result<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        let path = dir.join(format!(
            "{}.{}",
            canonical_name(slot_name),
            SNAPSHOT_EXTENSION
        ));
        Ok(Self { path })
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::new(dir, DEFAULT_SLOT_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load_snapshot(&self) -> Result<Option<Vec<Transaction>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        deserialize_snapshot(&data)
    }

    fn save_snapshot(&self, records: &[Transaction]) -> Result<()> {
        let json = serialize_snapshot(records)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path).map_err(|err| {
            LedgerError::Persistence(format!(
                "unable to replace `{}`: {err}",
                self.path.display()
            ))
        })?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        DEFAULT_SLOT_NAME.into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
