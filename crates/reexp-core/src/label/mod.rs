//! Forwarding label field extraction.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, LabelParser};
pub use rules::{Field, FieldExtractor, LabelText};

use crate::models::record::ForwardingRecord;

/// Extract a forwarding record from OCR text, discarding diagnostics.
///
/// Returns `None` whenever the label cannot be read completely.
pub fn extract(text: &str) -> Option<ForwardingRecord> {
    LabelParser::new().parse(text).ok().map(|r| r.record)
}
