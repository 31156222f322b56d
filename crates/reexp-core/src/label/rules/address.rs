//! Old and new address extraction.
//!
//! Both extractors collect a small block of lines around a section marker
//! and split it on the first postal code into street and city:
//! `"{street}, {postal} {city}"`.

use tracing::debug;

use super::normalize::collapse_whitespace;
use super::patterns::{
    postal_codes, CIVILITY_LINE, COUNTRY_MARKER, DATE_TOKEN, NEW_ADDRESS_MARKER,
    RECIPIENT_MARKER, SERVICE_MARKER, STREET_KEYWORD, TYPE_KEYWORD,
};
use super::{Field, FieldExtractor, LabelText};

/// Lines read above the recipient marker.
const OLD_BLOCK_LINES: usize = 3;
/// Lines read below the new address anchor.
const NEW_BLOCK_LINES: usize = 6;
/// Lines read above the second postal code when no marker exists.
const FALLBACK_LINES_BEFORE: usize = 3;

/// Old address length bounds (exclusive).
const OLD_LEN: (usize, usize) = (0, 200);
/// New address length bounds (exclusive).
const NEW_LEN: (usize, usize) = (15, 300);

/// Extractor for the address mail is forwarded from.
#[derive(Debug, Clone, Copy, Default)]
pub struct OldAddressExtractor;

impl OldAddressExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for OldAddressExtractor {
    type Output = String;

    fn field(&self) -> Field {
        Field::OldAddress
    }

    fn extract(&self, text: &LabelText) -> Option<String> {
        let lines = text.lines();

        let address = match lines.iter().position(|l| RECIPIENT_MARKER.is_match(l)) {
            Some(anchor) => {
                let block: Vec<&str> = lines[anchor.saturating_sub(OLD_BLOCK_LINES)..anchor]
                    .iter()
                    .map(String::as_str)
                    .filter(|l| !SERVICE_MARKER.is_match(l) && !CIVILITY_LINE.is_match(l))
                    .collect();
                split_postal(&block)
            }
            None => after_street_line(lines),
        }?;

        if within(&address, OLD_LEN) {
            debug!("Old address: {}", address);
            Some(address)
        } else {
            None
        }
    }
}

/// First postal code line, with its street either before the code on the
/// same line or on the line directly above.
fn after_street_line(lines: &[String]) -> Option<String> {
    let idx = lines.iter().position(|l| postal_codes(l).next().is_some())?;
    let line = lines[idx].as_str();

    if let Some((start, _)) = postal_codes(line).next() {
        if STREET_KEYWORD.is_match(&line[..start]) {
            return split_postal(&[line]);
        }
    }

    let street = lines[..idx].last()?;
    if !STREET_KEYWORD.is_match(street) {
        return None;
    }
    split_postal(&[street.as_str(), line])
}

/// Extractor for the address mail is forwarded to.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewAddressExtractor;

impl NewAddressExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for NewAddressExtractor {
    type Output = String;

    fn field(&self) -> Field {
        Field::NewAddress
    }

    fn extract(&self, text: &LabelText) -> Option<String> {
        let lines = text.lines();

        let block = if let Some(idx) = lines.iter().position(|l| NEW_ADDRESS_MARKER.is_match(l)) {
            let mut block = Vec::new();
            // OCR often keeps the first address line on the marker line.
            if let Some(m) = NEW_ADDRESS_MARKER.find(&lines[idx]) {
                let tail = lines[idx][m.end()..].trim_start_matches([':', ' ', '-']);
                if !tail.is_empty() {
                    block.push(tail);
                }
            }
            block.extend(block_below(lines, idx));
            block
        } else if let Some(idx) = lines.iter().position(|l| RECIPIENT_MARKER.is_match(l)) {
            // The line right after the recipient marker is the anchor.
            block_below(lines, idx + 1)
        } else {
            return second_postal_window(lines);
        };

        if block.is_empty() {
            return None;
        }

        let address = match split_postal(&block) {
            Some(split) => split,
            None => collapse_whitespace(&block.join(" ")),
        };

        if within(&address, NEW_LEN) {
            debug!("New address: {}", address);
            Some(address)
        } else {
            None
        }
    }
}

/// Address lines following `anchor`, up to the country line.
fn block_below(lines: &[String], anchor: usize) -> Vec<&str> {
    let mut block = Vec::new();

    for line in lines.iter().skip(anchor + 1).take(NEW_BLOCK_LINES) {
        if DATE_TOKEN.is_match(line) || TYPE_KEYWORD.is_match(line) {
            continue;
        }
        block.push(line.as_str());
        if COUNTRY_MARKER.is_match(line) {
            break;
        }
    }

    block
}

/// Window ending at the line holding the second postal code of the text.
fn second_postal_window(lines: &[String]) -> Option<String> {
    let mut seen = 0;
    let idx = lines.iter().position(|l| {
        seen += postal_codes(l).count();
        seen >= 2
    })?;

    let window: Vec<&str> = lines[idx.saturating_sub(FALLBACK_LINES_BEFORE)..=idx]
        .iter()
        .map(String::as_str)
        .filter(|l| !RECIPIENT_MARKER.is_match(l) && !TYPE_KEYWORD.is_match(l))
        .collect();
    let address = collapse_whitespace(&window.join(" "));

    if within(&address, NEW_LEN) {
        debug!("New address from second postal code: {}", address);
        Some(address)
    } else {
        None
    }
}

/// Split a block of lines on its first postal code.
///
/// Everything before the code is the street; the rest of the code's line is
/// the city. Returns `None` when the block holds no postal code.
pub fn split_postal(lines: &[&str]) -> Option<String> {
    let block = lines.join("\n");
    let (start, end) = postal_codes(&block).next()?;

    let street = collapse_whitespace(&block[..start]);
    let postal = &block[start..end];
    let line_end = block[end..].find('\n').map_or(block.len(), |i| end + i);
    let city = collapse_whitespace(&block[end..line_end]);

    let address = if street.is_empty() {
        format!("{} {}", postal, city)
    } else {
        format!("{}, {} {}", street, postal, city)
    };
    Some(collapse_whitespace(&address))
}

fn within(address: &str, (min, max): (usize, usize)) -> bool {
    let len = address.chars().count();
    len > min && len < max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn old(raw: &str) -> Option<String> {
        OldAddressExtractor::new().extract(&LabelText::new(raw))
    }

    fn new(raw: &str) -> Option<String> {
        NewAddressExtractor::new().extract(&LabelText::new(raw))
    }

    #[test]
    fn test_split_postal() {
        assert_eq!(
            split_postal(&["12 RUE DES FLEURS", "75000 PARIS"]),
            Some("12 RUE DES FLEURS, 75000 PARIS".to_string())
        );
        assert_eq!(
            split_postal(&["12 RUE DES FLEURS 75000 PARIS CEDEX", "FRANCE"]),
            Some("12 RUE DES FLEURS, 75000 PARIS CEDEX".to_string())
        );
        assert_eq!(split_postal(&["75000  PARIS"]), Some("75000 PARIS".to_string()));
        assert_eq!(split_postal(&["12 RUE DES FLEURS"]), None);
    }

    #[test]
    fn test_old_address_above_recipient_marker() {
        let text = "Et Serv 1 123456789012\nMME JEANNE DUPONT\n12 RUE DES FLEURS\n75000 PARIS\nDestinataire\nJEANNE DUPONT";
        assert_eq!(old(text), Some("12 RUE DES FLEURS, 75000 PARIS".to_string()));
    }

    #[test]
    fn test_old_address_block_is_three_lines() {
        let text = "12 RUE DES FLEURS\nBATIMENT B\nESCALIER 4\n75000 PARIS\nnouveau contrat";
        assert_eq!(old(text), Some("BATIMENT B ESCALIER 4, 75000 PARIS".to_string()));
    }

    #[test]
    fn test_old_address_marker_without_postal_code() {
        let text = "12 RUE DES FLEURS\nDestinataire\n34 AVENUE VICTOR HUGO\n69000 LYON";
        assert_eq!(old(text), None);
    }

    #[test]
    fn test_old_address_street_fallback() {
        let text = "MME JEANNE DUPONT\n12 rue des Fleurs\n75000 PARIS\nNOUVELLE ADRESSE";
        assert_eq!(old(text), Some("12 rue des Fleurs, 75000 PARIS".to_string()));
    }

    #[test]
    fn test_old_address_street_on_postal_line() {
        let text = "MME JEANNE DUPONT\n12 RUE DES FLEURS 75000 PARIS\nNOUVELLE ADRESSE";
        assert_eq!(old(text), Some("12 RUE DES FLEURS, 75000 PARIS".to_string()));

        // Street keyword after the code does not count.
        assert_eq!(old("MME JEANNE DUPONT\n75000 PARIS RUE DES FLEURS"), None);
    }

    #[test]
    fn test_old_address_fallback_needs_street_line() {
        assert_eq!(old("MME JEANNE DUPONT\n75000 PARIS"), None);
        assert_eq!(old("75000 PARIS"), None);
    }

    #[test]
    fn test_new_address_after_marker() {
        let text = "NOUVELLE ADRESSE\n34 AVENUE VICTOR HUGO\n69000 LYON\nFRANCE\n75001 PARIS";
        assert_eq!(new(text), Some("34 AVENUE VICTOR HUGO, 69000 LYON".to_string()));
    }

    #[test]
    fn test_new_address_on_marker_line() {
        let text = "Nouvelle adresse : 34 AVENUE VICTOR HUGO\n69000 LYON";
        assert_eq!(new(text), Some("34 AVENUE VICTOR HUGO, 69000 LYON".to_string()));
    }

    #[test]
    fn test_new_address_drops_date_and_type_lines() {
        let text = "NOUVELLE ADRESSE\nTemporaire 06/12/2024 au 05/12/2025\n34 AVENUE VICTOR HUGO\n69000 LYON";
        assert_eq!(new(text), Some("34 AVENUE VICTOR HUGO, 69000 LYON".to_string()));
    }

    #[test]
    fn test_new_address_after_recipient_anchor() {
        let text = "12 RUE DES FLEURS\n75000 PARIS\nnouveau contrat\nJEANNE DUPONT\n34 AVENUE VICTOR HUGO\n69000 LYON\nFRANCE";
        assert_eq!(new(text), Some("34 AVENUE VICTOR HUGO, 69000 LYON".to_string()));
    }

    #[test]
    fn test_new_address_without_postal_code() {
        let text = "NOUVELLE ADRESSE\nPOSTE RESTANTE BUREAU CENTRAL\nFRANCE";
        assert_eq!(new(text), Some("POSTE RESTANTE BUREAU CENTRAL FRANCE".to_string()));
    }

    #[test]
    fn test_new_address_too_short() {
        assert_eq!(new("NOUVELLE ADRESSE\n69000 LYON"), None);
        assert_eq!(new("NOUVELLE ADRESSE"), None);
    }

    #[test]
    fn test_new_address_second_postal_code() {
        let text = "12 RUE DES FLEURS\n75000 PARIS\n34 AVENUE VICTOR HUGO\n69000 LYON";
        assert_eq!(
            new(text),
            Some("12 RUE DES FLEURS 75000 PARIS 34 AVENUE VICTOR HUGO 69000 LYON".to_string())
        );
    }

    #[test]
    fn test_new_address_single_postal_code() {
        assert_eq!(new("12 RUE DES FLEURS\n75000 PARIS"), None);
    }
}
