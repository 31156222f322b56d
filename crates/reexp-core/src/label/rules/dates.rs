//! Validity period extraction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::patterns::{date_tokens, DATE_RANGE};
use super::{Field, FieldExtractor, LabelText};

/// Start and end of a forwarding order, both `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Validity period extractor.
///
/// Looks for "Temporaire 06/12/2024 au 05/12/2025" first, then falls back
/// to the first two date tokens of the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRangeExtractor;

impl DateRangeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for DateRangeExtractor {
    type Output = DateRange;

    fn field(&self) -> Field {
        Field::Dates
    }

    fn extract(&self, text: &LabelText) -> Option<DateRange> {
        let text = text.normalized();

        if let Some(caps) = DATE_RANGE.captures(text) {
            if let (Some(start), Some(end)) = (to_iso_date(&caps[1]), to_iso_date(&caps[2])) {
                debug!("Date range found after type keyword: {} -> {}", start, end);
                return Some(DateRange { start, end });
            }
        }

        let mut tokens = date_tokens(text).filter_map(to_iso_date);
        let start = tokens.next()?;
        let end = tokens.next()?;

        debug!("Date range taken from first two dates: {} -> {}", start, end);
        Some(DateRange { start, end })
    }
}

/// Convert `DD/MM/YYYY` (or `DD-MM-YYYY`) to `YYYY-MM-DD`.
///
/// The fields are only reordered: `31/11/2025` becomes `2025-11-31`.
pub fn to_iso_date(token: &str) -> Option<String> {
    let parts: Vec<&str> = token.trim().split(['/', '-']).collect();

    match parts.as_slice() {
        [day, month, year]
            if day.len() == 2
                && month.len() == 2
                && year.len() == 4
                && parts.iter().all(|p| p.bytes().all(|b| b.is_ascii_digit())) =>
        {
            Some(format!("{}-{}-{}", year, month, day))
        }
        _ => None,
    }
}
