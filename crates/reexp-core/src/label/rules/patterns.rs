//! Common regex patterns for forwarding label extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Service/tracking annotation, e.g. "Et Serv 1 123456789012"
    pub static ref SERVICE_MARKER: Regex = Regex::new(
        r"(?i)(?:^|[^a-z])serv\s*[0-9]*[\s:.\-]*[0-9]{6,}"
    ).unwrap();

    // Civility token at line start followed by uppercase name words
    pub static ref CIVILITY_LINE: Regex = Regex::new(
        r"^(?i:MONSIEUR|MADAME|MME|MLE|MR|M)\.?\s+([A-Z][A-Z\-]*\b(?:\s+[A-Z][A-Z\-]*\b)*)"
    ).unwrap();

    // Civility token anywhere in the text
    pub static ref CIVILITY_ANY: Regex = Regex::new(
        r"(?:^|[^A-Za-z])(?i:MONSIEUR|MADAME|MME|MLE|MR|M)\.?\s+([A-Z][A-Z\-]*\b(?:\s+[A-Z][A-Z\-]*\b)*)"
    ).unwrap();

    // Standalone name line: uppercase letters, spaces and hyphens only
    pub static ref UPPERCASE_LINE: Regex = Regex::new(
        r"^[A-Z \-]+$"
    ).unwrap();

    // Address words and section markers that end a captured name
    pub static ref NAME_STOP: Regex = Regex::new(
        r"\s(?:RUE|AVENUE|ALLEE|CHEMIN|DESTINATAIRE|DESTINEE|NOUVELLE|NOUVEAU)\b"
    ).unwrap();

    // Section markers
    pub static ref RECIPIENT_MARKER: Regex = Regex::new(
        r"(?i)destinataire|destin[ée]e|nouveau\s+contrat"
    ).unwrap();

    pub static ref NEW_ADDRESS_MARKER: Regex = Regex::new(
        r"(?i)nouvelle\s+adresse"
    ).unwrap();

    pub static ref COUNTRY_MARKER: Regex = Regex::new(
        r"(?i)\bfrance\b"
    ).unwrap();

    pub static ref STREET_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:rue|avenue|all[ée]e|boulevard|chemin|impasse)\b"
    ).unwrap();

    // Type keyword and its OCR truncations, as printed next to the dates
    pub static ref TYPE_KEYWORD: Regex = Regex::new(
        r"(?i)temporair|d[ée]finiti[fv]"
    ).unwrap();

    // DD/MM/YYYY or DD-MM-YYYY; digit boundaries are checked by date_tokens()
    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"[0-9]{2}[/\-][0-9]{2}[/\-][0-9]{4}"
    ).unwrap();

    // "Temporaire 06/12/2024 au 05/12/2025"
    pub static ref DATE_RANGE: Regex = Regex::new(
        r"(?i)(?:temporaire|temporair|d[ée]finitif)\s+([0-9]{2}[/\-][0-9]{2}[/\-][0-9]{4})\s+(?:au|à)\s+([0-9]{2}[/\-][0-9]{2}[/\-][0-9]{4})(?:[^0-9]|$)"
    ).unwrap();

    // Digit runs; a run of exactly five is a postal code
    pub static ref DIGIT_RUN: Regex = Regex::new(
        r"[0-9]+"
    ).unwrap();

    // Token accepted by the name candidate scanner
    pub static ref CANDIDATE_TOKEN: Regex = Regex::new(
        r"^[A-Z\-]+$"
    ).unwrap();
}

/// Returns the byte range of every postal-code run (exactly five digits) in
/// `text`, in document order.
pub fn postal_codes(text: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    DIGIT_RUN
        .find_iter(text)
        .filter(|m| m.as_str().len() == 5)
        .map(|m| (m.start(), m.end()))
}

/// Returns every date token of `text` that is not glued to another digit,
/// in document order. Letters may touch the token ("le06/12/2024").
pub fn date_tokens(text: &str) -> impl Iterator<Item = &str> + '_ {
    DATE_TOKEN
        .find_iter(text)
        .filter(move |m| {
            let before = text[..m.start()].bytes().next_back();
            let after = text[m.end()..].bytes().next();
            !before.is_some_and(|b| b.is_ascii_digit()) && !after.is_some_and(|b| b.is_ascii_digit())
        })
        .map(|m| m.as_str())
}
