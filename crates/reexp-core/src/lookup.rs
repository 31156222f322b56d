//! Parcel lookup: find the forwarding order for a recipient named on a parcel.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::label::rules::name_candidates;
use crate::models::record::StoredRecord;
use crate::store::RecordStore;

/// First successful probe of the lookup flow.
#[derive(Debug, Clone, Serialize)]
pub struct LookupHit {
    /// Candidate name that matched.
    pub candidate: String,
    /// Records matching the candidate.
    pub records: Vec<StoredRecord>,
    /// Number of candidates tried, including the matching one.
    pub attempts: usize,
}

/// Probe `store` with every name candidate of `text`, in order, and stop at
/// the first candidate with matches.
///
/// `Ok(None)` means no candidate matched (or the text held none).
pub fn lookup<S: RecordStore + ?Sized>(
    store: &S,
    text: &str,
) -> Result<Option<LookupHit>, StoreError> {
    let candidates = name_candidates(text);
    debug!("Lookup with {} name candidate(s)", candidates.len());

    for (i, candidate) in candidates.into_iter().enumerate() {
        let records = store.search_by_name(&candidate)?;
        if !records.is_empty() {
            info!("Lookup matched {} record(s) for {}", records.len(), candidate);
            return Ok(Some(LookupHit {
                candidate,
                records,
                attempts: i + 1,
            }));
        }
    }

    Ok(None)
}
