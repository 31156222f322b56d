//! Record store persisted as a single JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::record::{ForwardingRecord, StoredRecord};

use super::{RecordStore, Result};

/// On-disk layout.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    next_id: u64,
    records: Vec<StoredRecord>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

/// Record store backed by a JSON file.
///
/// The file is read on every operation and rewritten on every change, so
/// several processes may use the same store one after another. It is
/// created, along with its parent directories, on the first write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open a store at `path`. Nothing is read until the first operation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreFile> {
        if !self.path.exists() {
            debug!("Store file {} does not exist yet", self.path.display());
            return Ok(StoreFile::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, file: &StoreFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn add(&mut self, record: ForwardingRecord) -> Result<u64> {
        let mut file = self.load()?;
        let id = file.next_id;
        file.next_id += 1;

        info!("Adding record {} for {}", id, record.recipient_name);
        file.records.push(StoredRecord {
            id,
            record,
            added_at: Utc::now(),
        });
        self.save(&file)?;
        Ok(id)
    }

    fn all(&self) -> Result<Vec<StoredRecord>> {
        Ok(self.load()?.records)
    }

    fn delete(&mut self, id: u64) -> Result<bool> {
        let mut file = self.load()?;
        let before = file.records.len();
        file.records.retain(|r| r.id != id);

        if file.records.len() == before {
            return Ok(false);
        }
        info!("Deleted record {}", id);
        self.save(&file)?;
        Ok(true)
    }
}
