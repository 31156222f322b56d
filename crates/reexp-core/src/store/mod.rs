//! Forwarding record storage.

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use chrono::NaiveDate;
use tracing::info;

use crate::error::StoreError;
use crate::models::record::{ForwardingRecord, ForwardingType, StoredRecord};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Trait for forwarding record stores.
pub trait RecordStore {
    /// Add a record and return its generated identifier.
    fn add(&mut self, record: ForwardingRecord) -> Result<u64>;

    /// All stored records, in insertion order.
    fn all(&self) -> Result<Vec<StoredRecord>>;

    /// Delete a record. Returns `false` if no record had this identifier.
    fn delete(&mut self, id: u64) -> Result<bool>;

    /// Get a record by identifier.
    fn get(&self, id: u64) -> Result<Option<StoredRecord>> {
        Ok(self.all()?.into_iter().find(|r| r.id == id))
    }

    /// Records whose recipient name contains `term`, ignoring case.
    fn search_by_name(&self, term: &str) -> Result<Vec<StoredRecord>> {
        let term = term.trim().to_lowercase();
        Ok(self
            .all()?
            .into_iter()
            .filter(|r| r.record.recipient_name.to_lowercase().contains(&term))
            .collect())
    }

    /// Records of the given type; `None` returns everything.
    fn filter_by_type(&self, kind: Option<ForwardingType>) -> Result<Vec<StoredRecord>> {
        let all = self.all()?;
        Ok(match kind {
            Some(kind) => all
                .into_iter()
                .filter(|r| r.record.forwarding_type == kind)
                .collect(),
            None => all,
        })
    }

    /// Records ending between `today` and `today + days`, inclusive.
    fn expiring_within(&self, today: NaiveDate, days: i64) -> Result<Vec<StoredRecord>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|r| r.expires_within(today, days))
            .collect())
    }

    /// Delete every record that ended before `today`. Returns how many were
    /// removed.
    fn purge_expired(&mut self, today: NaiveDate) -> Result<usize> {
        let expired: Vec<u64> = self
            .all()?
            .into_iter()
            .filter(|r| r.is_expired(today))
            .map(|r| r.id)
            .collect();

        let mut removed = 0;
        for id in expired {
            if self.delete(id)? {
                removed += 1;
            }
        }

        if removed > 0 {
            info!("Purged {} expired record(s)", removed);
        }
        Ok(removed)
    }
}
