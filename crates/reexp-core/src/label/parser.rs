//! Label parser: runs the field extractors and assembles the record.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::ExtractionError;
use crate::models::record::ForwardingRecord;

use super::rules::{
    classify_type, DateRange, DateRangeExtractor, FieldExtractor, LabelText, NameExtractor,
    NewAddressExtractor, OldAddressExtractor,
};

/// Result of label extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: ForwardingRecord,
    /// Raw OCR text.
    pub raw_text: String,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Forwarding label parser.
///
/// Detects the forwarding type first and stops there if it is absent. The
/// four field extractors then run independently on the same normalized text
/// and the record is only produced when all of them succeed.
pub struct LabelParser<
    N = NameExtractor,
    O = OldAddressExtractor,
    A = NewAddressExtractor,
    D = DateRangeExtractor,
> {
    name: N,
    old_address: O,
    new_address: A,
    dates: D,
}

impl LabelParser {
    /// Create a parser with the standard extractors.
    pub fn new() -> Self {
        Self {
            name: NameExtractor::new(),
            old_address: OldAddressExtractor::new(),
            new_address: NewAddressExtractor::new(),
            dates: DateRangeExtractor::new(),
        }
    }
}

impl Default for LabelParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, O, A, D> LabelParser<N, O, A, D>
where
    N: FieldExtractor<Output = String>,
    O: FieldExtractor<Output = String>,
    A: FieldExtractor<Output = String>,
    D: FieldExtractor<Output = DateRange>,
{
    /// Create a parser from custom field extractors.
    pub fn with_extractors(name: N, old_address: O, new_address: A, dates: D) -> Self {
        Self {
            name,
            old_address,
            new_address,
            dates,
        }
    }

    /// Parse OCR text into a forwarding record.
    ///
    /// Never panics: a fault inside an extractor is reported as
    /// [`ExtractionError::Internal`].
    pub fn parse(&self, text: &str) -> Result<ExtractionResult, ExtractionError> {
        let start = Instant::now();

        info!("Parsing label from {} characters of text", text.len());

        let record = match panic::catch_unwind(AssertUnwindSafe(|| self.assemble(text))) {
            Ok(record) => record?,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Extraction aborted: {}", message);
                return Err(ExtractionError::Internal(message));
            }
        };

        debug!(
            "Extracted {} order for {}",
            record.forwarding_type, record.recipient_name
        );

        Ok(ExtractionResult {
            record,
            raw_text: text.to_string(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn assemble(&self, text: &str) -> Result<ForwardingRecord, ExtractionError> {
        let label = LabelText::new(text);

        let Some(forwarding_type) = classify_type(&label) else {
            warn!("No forwarding type keyword, not a forwarding label");
            return Err(ExtractionError::UnknownType);
        };

        let name = self.name.extract(&label);
        let old_address = self.old_address.extract(&label);
        let new_address = self.new_address.extract(&label);
        let dates = self.dates.extract(&label);

        match (name, old_address, new_address, dates) {
            (Some(recipient_name), Some(old_address), Some(new_address), Some(dates)) => {
                Ok(ForwardingRecord {
                    forwarding_type,
                    recipient_name,
                    old_address,
                    new_address,
                    start_date: dates.start,
                    end_date: dates.end,
                })
            }
            (name, old_address, new_address, dates) => {
                let missing: Vec<_> = [
                    (name.is_none(), self.name.field()),
                    (old_address.is_none(), self.old_address.field()),
                    (new_address.is_none(), self.new_address.field()),
                    (dates.is_none(), self.dates.field()),
                ]
                .into_iter()
                .filter_map(|(absent, field)| absent.then_some(field))
                .collect();

                warn!(?missing, "Incomplete label");
                Err(ExtractionError::MissingFields(missing))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown fault".to_string()
    }
}
