//! In-memory record store.

use chrono::Utc;

use crate::models::record::{ForwardingRecord, StoredRecord};

use super::{RecordStore, Result};

/// Record store kept in process memory.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: Vec<StoredRecord>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn add(&mut self, record: ForwardingRecord) -> Result<u64> {
        let id = self.next_id;
        self.next_id += 1;
        self.records.push(StoredRecord {
            id,
            record,
            added_at: Utc::now(),
        });
        Ok(id)
    }

    fn all(&self) -> Result<Vec<StoredRecord>> {
        Ok(self.records.clone())
    }

    fn delete(&mut self, id: u64) -> Result<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        Ok(self.records.len() != before)
    }
}
