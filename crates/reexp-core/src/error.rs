//! Error types for the reexp-core library.

use thiserror::Error;

use crate::label::Field;

/// Main error type for the reexp library.
#[derive(Error, Debug)]
pub enum ReexpError {
    /// Label extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to label field extraction.
///
/// Every variant means the same thing to the caller: no record could be
/// read from this text and the label should be captured again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Neither type keyword family was found; the text is not a label.
    #[error("forwarding type not found")]
    UnknownType,

    /// One or more fields could not be extracted.
    #[error("missing fields: {}", format_fields(.0))]
    MissingFields(Vec<Field>),

    /// A fault inside the pipeline, caught at the entry point.
    #[error("internal extraction fault: {0}")]
    Internal(String),
}

fn format_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors related to the record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record with this identifier.
    #[error("record {0} not found")]
    NotFound(u64),

    /// A manually entered record failed validation.
    #[error("invalid {field}: {reason}")]
    Invalid { field: String, reason: String },

    /// Failed to read or write the store file.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The store file is not valid JSON.
    #[error("corrupt store file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the reexp library.
pub type Result<T> = std::result::Result<T, ReexpError>;
