//! Rule-based field extractors for forwarding labels.
//!
//! Each extractor tries an ordered list of strategies and returns the first
//! accepted candidate. Strategies never merge partial results and never
//! fail with an error: a field that cannot be read is `None`.

pub mod address;
pub mod candidates;
pub mod dates;
pub mod kind;
pub mod name;
pub mod normalize;
pub mod patterns;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use address::{NewAddressExtractor, OldAddressExtractor};
pub use candidates::name_candidates;
pub use dates::{to_iso_date, DateRange, DateRangeExtractor};
pub use kind::classify_type;
pub use name::NameExtractor;
pub use normalize::LabelText;

/// A field of the forwarding record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Type,
    RecipientName,
    OldAddress,
    NewAddress,
    Dates,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::RecipientName => "recipientName",
            Self::OldAddress => "oldAddress",
            Self::NewAddress => "newAddress",
            Self::Dates => "dates",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// The record field this extractor fills.
    fn field(&self) -> Field;

    /// Extract the field from normalized label text.
    fn extract(&self, text: &LabelText) -> Option<Self::Output>;
}

impl<E: FieldExtractor + ?Sized> FieldExtractor for &E {
    type Output = E::Output;

    fn field(&self) -> Field {
        (**self).field()
    }

    fn extract(&self, text: &LabelText) -> Option<Self::Output> {
        (**self).extract(text)
    }
}
