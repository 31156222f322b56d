//! Core library for mail forwarding label processing.
//!
//! This crate provides:
//! - Field extraction from OCR text of forwarding-order labels (type,
//!   recipient, old and new address, validity period)
//! - Name candidate scanning for the parcel lookup flow
//! - Forwarding record model, record stores and lookup

pub mod error;
pub mod label;
pub mod lookup;
pub mod models;
pub mod store;

pub use error::{ExtractionError, ReexpError, Result, StoreError};
pub use label::{extract, ExtractionResult, Field, LabelParser, LabelText};
pub use label::rules::{name_candidates, to_iso_date, FieldExtractor};
pub use lookup::{lookup, LookupHit};
pub use models::config::ReexpConfig;
pub use models::record::{ForwardingRecord, ForwardingType, RecordDraft, StoredRecord};
pub use store::{JsonFileStore, MemoryStore, RecordStore};
