//! Forwarding type detection.

use crate::models::record::ForwardingType;

use super::LabelText;

// Truncated forms cover OCR dropping the last letters of the word.
const TEMPORARY_TOKENS: &[&str] = &["TEMPORAIRE", "TEMPORAIR"];
const PERMANENT_TOKENS: &[&str] = &["DÉFINITIVE", "DEFINITIVE", "DEFINITIV", "DEFINITIF"];

/// Classify the label as temporary or permanent forwarding.
///
/// Matching is case-insensitive on the normalized text. The temporary
/// family is checked first. `None` means the text is not a forwarding label.
pub fn classify_type(text: &LabelText) -> Option<ForwardingType> {
    let upper = text.normalized().to_uppercase();

    if TEMPORARY_TOKENS.iter().any(|t| upper.contains(t)) {
        return Some(ForwardingType::Temporary);
    }
    if PERMANENT_TOKENS.iter().any(|t| upper.contains(t)) {
        return Some(ForwardingType::Permanent);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(raw: &str) -> Option<ForwardingType> {
        classify_type(&LabelText::new(raw))
    }

    #[test]
    fn test_temporary() {
        assert_eq!(classify("REEXPEDITION TEMPORAIRE"), Some(ForwardingType::Temporary));
        assert_eq!(classify("reexpedition temporair"), Some(ForwardingType::Temporary));
    }

    #[test]
    fn test_permanent() {
        assert_eq!(classify("Réexpédition définitive"), Some(ForwardingType::Permanent));
        assert_eq!(classify("REEXP DEFINITIVE"), Some(ForwardingType::Permanent));
        assert_eq!(classify("definitiv"), Some(ForwardingType::Permanent));
        assert_eq!(classify("Definitif 03/05/2025"), Some(ForwardingType::Permanent));
    }

    #[test]
    fn test_temporary_wins() {
        assert_eq!(
            classify("DEFINITIVE\nTemporaire 06/12/2024 au 05/12/2025"),
            Some(ForwardingType::Temporary)
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify("COLIS POUR JEAN MARTIN"), None);
        assert_eq!(classify(""), None);
    }
}
