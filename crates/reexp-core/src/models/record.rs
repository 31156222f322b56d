//! Forwarding record data model.
//!
//! Dates are kept as `YYYY-MM-DD` strings. Extraction reorders the fields of
//! the printed date without checking it against the calendar, so a record can
//! hold a date such as `2025-11-31`; only the manual entry path
//! ([`RecordDraft`]) checks the format and the start/end order.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Kind of forwarding order printed on the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForwardingType {
    /// Temporary forwarding (réexpédition temporaire).
    #[serde(rename = "TEMPORAIRE")]
    Temporary,
    /// Permanent forwarding (réexpédition définitive).
    #[serde(rename = "DÉFINITIVE", alias = "DEFINITIVE")]
    Permanent,
}

impl ForwardingType {
    /// Canonical label as printed and stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temporary => "TEMPORAIRE",
            Self::Permanent => "DÉFINITIVE",
        }
    }

    /// Parse a user-supplied type name (accents and case ignored).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "TEMPORAIRE" | "TEMPORARY" | "T" => Some(Self::Temporary),
            "DÉFINITIVE" | "DEFINITIVE" | "DÉFINITIF" | "DEFINITIF" | "PERMANENT" | "D" => {
                Some(Self::Permanent)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ForwardingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully populated forwarding order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardingRecord {
    /// Temporary or permanent.
    #[serde(rename = "type")]
    pub forwarding_type: ForwardingType,

    /// Recipient name, uppercase letters, spaces and hyphens.
    pub recipient_name: String,

    /// Address mail is forwarded from.
    pub old_address: String,

    /// Address mail is forwarded to.
    pub new_address: String,

    /// First day of the order (`YYYY-MM-DD`).
    pub start_date: String,

    /// Last day of the order (`YYYY-MM-DD`).
    pub end_date: String,
}

/// A record held by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    /// Identifier assigned by the store.
    pub id: u64,

    #[serde(flatten)]
    pub record: ForwardingRecord,

    /// When the record was added.
    pub added_at: DateTime<Utc>,
}

impl StoredRecord {
    /// Whether the order ended before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.record.end_date.as_str() < today.format("%Y-%m-%d").to_string().as_str()
    }

    /// Whether the order ends within `days` days from `today` (inclusive).
    ///
    /// An end date that is not a real calendar date never counts as expiring.
    pub fn expires_within(&self, today: NaiveDate, days: i64) -> bool {
        match days_until(&self.record.end_date, today) {
            Some(left) => (0..=days).contains(&left),
            None => false,
        }
    }
}

/// A manually entered record, validated before it becomes a
/// [`ForwardingRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    pub forwarding_type: Option<ForwardingType>,
    pub recipient_name: String,
    pub old_address: String,
    pub new_address: String,
    pub start_date: String,
    pub end_date: String,
}

impl RecordDraft {
    /// Validate the draft.
    ///
    /// Every field must be present, both dates must be `YYYY-MM-DD` calendar
    /// dates and the start date must not come after the end date.
    pub fn into_record(self) -> Result<ForwardingRecord, StoreError> {
        let forwarding_type = self
            .forwarding_type
            .ok_or_else(|| invalid("type", "missing"))?;

        let recipient_name = required("recipientName", &self.recipient_name)?;
        let old_address = required("oldAddress", &self.old_address)?;
        let new_address = required("newAddress", &self.new_address)?;

        let start = parse_iso("startDate", &self.start_date)?;
        let end = parse_iso("endDate", &self.end_date)?;
        if start > end {
            return Err(invalid("endDate", "ends before the start date"));
        }

        Ok(ForwardingRecord {
            forwarding_type,
            recipient_name: recipient_name.to_uppercase(),
            old_address,
            new_address,
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
        })
    }
}

fn required(field: &str, value: &str) -> Result<String, StoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(invalid(field, "missing"));
    }
    Ok(value.to_string())
}

fn parse_iso(field: &str, value: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| invalid(field, &format!("expected YYYY-MM-DD, got '{}'", value)))
}

fn invalid(field: &str, reason: &str) -> StoreError {
    StoreError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Format `YYYY-MM-DD` as `DD/MM/YYYY` for display.
pub fn display_date(iso: &str) -> String {
    let parts: Vec<&str> = iso.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{}/{}/{}", day, month, year),
        _ => iso.to_string(),
    }
}

/// Days left from `today` until the `YYYY-MM-DD` date `iso`.
pub fn days_until(iso: &str, today: NaiveDate) -> Option<i64> {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()
        .map(|date| (date - today).num_days())
}
