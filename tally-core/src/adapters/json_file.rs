//! JSON document repository
//!
//! Records live in a single pretty-printed JSON array. Every write rewrites
//! the whole document through a temporary file and a rename.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::domain::result::{Error, Result};
use crate::domain::{records_from_json, TransactionRecord};
use crate::ports::repository::{period_key, with_id};
use crate::ports::TransactionRepository;

/// File name used inside a data directory
pub const RECORDS_FILE: &str = "transactions.json";

/// Repository backed by a JSON file
pub struct JsonFileRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    /// Repository at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Repository using [`RECORDS_FILE`] inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(RECORDS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored record; a missing file is an empty store
    fn load(&self) -> Result<Vec<TransactionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let value: serde_json::Value = serde_json::from_str(&content)?;
        if !value.is_array() {
            return Err(Error::storage(format!(
                "{} does not contain a JSON array",
                self.path.display()
            )));
        }
        Ok(records_from_json(&value))
    }

    fn save(&self, records: &[TransactionRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(records)?;
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &self.path)?;
        debug!(path = %self.path.display(), count = records.len(), "saved records");
        Ok(())
    }
}

impl TransactionRepository for JsonFileRepository {
    fn name(&self) -> &str {
        "json"
    }

    fn list_records(&self, period: Option<&str>) -> Result<Vec<TransactionRecord>> {
        let records = self.load()?;
        Ok(match period {
            Some(p) => {
                let p = p.trim();
                records.into_iter().filter(|r| period_key(r) == p).collect()
            }
            None => records,
        })
    }

    fn add_record(&self, record: &TransactionRecord) -> Result<String> {
        let _guard = self.write_lock.lock().map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        let mut records = self.load()?;
        let (id, stored) = with_id(record);
        records.push(stored);
        self.save(&records)?;
        Ok(id)
    }

    fn remove_record(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id_str() != Some(id));
        if records.len() == before {
            return Ok(false);
        }
        self.save(&records)?;
        Ok(true)
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        self.save(&[])
    }
}
