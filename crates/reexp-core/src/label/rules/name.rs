//! Recipient name extraction.

use tracing::debug;

use super::patterns::{CIVILITY_ANY, CIVILITY_LINE, NAME_STOP, SERVICE_MARKER, UPPERCASE_LINE};
use super::{Field, FieldExtractor, LabelText};

/// Minimum cleaned length of a name introduced by a civility token.
const CIVILITY_MIN_LEN: usize = 8;
/// Minimum cleaned length of a bare uppercase name line.
const UPPERCASE_MIN_LEN: usize = 10;
/// Names must be shorter than this.
const MAX_LEN: usize = 100;
/// Lines inspected after the service marker.
const LINES_AFTER_MARKER: usize = 3;

/// Recipient name extractor.
///
/// Strategies, first accepted candidate wins:
/// 1. the lines right after the service marker,
/// 2. the first civility token anywhere,
/// 3. the first line made only of uppercase letters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameExtractor;

impl NameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for NameExtractor {
    type Output = String;

    fn field(&self) -> Field {
        Field::RecipientName
    }

    fn extract(&self, text: &LabelText) -> Option<String> {
        let lines = text.lines();

        if let Some(name) = after_service_marker(lines) {
            debug!("Name found after service marker: {}", name);
            return Some(name);
        }

        if let Some(name) = first_civility(text) {
            debug!("Name found after civility token: {}", name);
            return Some(name);
        }

        if let Some(name) = first_uppercase_line(lines) {
            debug!("Name found from uppercase line: {}", name);
            return Some(name);
        }

        None
    }
}

fn after_service_marker(lines: &[String]) -> Option<String> {
    let marker = lines.iter().position(|l| SERVICE_MARKER.is_match(l))?;

    for line in lines.iter().skip(marker + 1).take(LINES_AFTER_MARKER) {
        if let Some(caps) = CIVILITY_LINE.captures(line) {
            if let Some(name) = accept(&cut_at_street(&caps[1]), CIVILITY_MIN_LEN) {
                return Some(name);
            }
        } else if is_uppercase_line(line) {
            if let Some(name) = accept(line, UPPERCASE_MIN_LEN) {
                return Some(name);
            }
        }
    }

    None
}

/// Runs on the normalized text so a civility token split from the name by
/// a line break is still found. The capture stops at the first digit.
fn first_civility(text: &LabelText) -> Option<String> {
    let caps = CIVILITY_ANY.captures(text.normalized())?;
    accept(&cut_at_street(&caps[1]), CIVILITY_MIN_LEN)
}

fn first_uppercase_line(lines: &[String]) -> Option<String> {
    let line = lines.iter().find(|l| is_uppercase_line(l))?;
    accept(line, UPPERCASE_MIN_LEN)
}

fn is_uppercase_line(line: &str) -> bool {
    UPPERCASE_LINE.is_match(line) && line.chars().count() >= UPPERCASE_MIN_LEN
}

/// Drop a street or section marker that follows the name.
fn cut_at_street(name: &str) -> &str {
    match NAME_STOP.find(name) {
        Some(m) => &name[..m.start()],
        None => name,
    }
}

/// Acceptance filter applied to every name candidate.
///
/// Keeps only `A-Z`, spaces and hyphens, collapses whitespace and checks
/// the length is in `[min_len, 100)`.
fn accept(candidate: &str, min_len: usize) -> Option<String> {
    let kept: String = candidate
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| c.is_ascii_uppercase() || *c == ' ' || *c == '-')
        .collect();
    let cleaned = kept.split_whitespace().collect::<Vec<_>>().join(" ");

    if (min_len..MAX_LEN).contains(&cleaned.len()) {
        Some(cleaned)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(raw: &str) -> Option<String> {
        NameExtractor::new().extract(&LabelText::new(raw))
    }

    fn civility(raw: &str) -> Option<String> {
        first_civility(&LabelText::new(raw))
    }

    fn lines(raw: &str) -> Vec<String> {
        LabelText::new(raw).lines().to_vec()
    }

    #[test]
    fn test_name_after_service_marker() {
        let text = "REEXPEDITION TEMPORAIRE\nEt Serv 1 123456789012\nMME JEANNE DUPONT\n12 RUE DES FLEURS";
        assert_eq!(extract(text), Some("JEANNE DUPONT".to_string()));
    }

    #[test]
    fn test_bare_name_after_service_marker() {
        let text = "REEXPEDITION TEMPORAIRE\nSERV1 0012345678\n12\nJEAN-PAUL MARTIN\n75000 PARIS";
        assert_eq!(extract(text), Some("JEAN-PAUL MARTIN".to_string()));
    }

    #[test]
    fn test_service_marker_window_is_three_lines() {
        let l = lines("Serv 1 1234567\n1\n2\n3\nMME JEANNE DUPONT");
        assert_eq!(after_service_marker(&l), None);
    }

    #[test]
    fn test_civility_anywhere() {
        let text = "Carton 12\nRemis a M. PAUL DURAND 4 RUE DU PORT";
        assert_eq!(extract(text), Some("PAUL DURAND".to_string()));
    }

    #[test]
    fn test_civility_cut_at_street() {
        let text = "MME JEANNE DUPONT RUE DES FLEURS";
        assert_eq!(extract(text), Some("JEANNE DUPONT".to_string()));
    }

    #[test]
    fn test_civility_split_from_name() {
        let text = "TEMPORAIRE\nMME\nJEANNE DUPONT\n12 RUE DES FLEURS\n75000 PARIS\nDestinataire";
        assert_eq!(extract(text), Some("JEANNE DUPONT".to_string()));
    }

    #[test]
    fn test_civility_stops_at_next_section() {
        assert_eq!(
            civility("MME JEANNE DUPONT\nDESTINATAIRE\nJEANNE DUPONT"),
            Some("JEANNE DUPONT".to_string())
        );
        assert_eq!(
            civility("M. PAUL DURAND\nNOUVELLE ADRESSE"),
            Some("PAUL DURAND".to_string())
        );
    }

    #[test]
    fn test_uppercase_line_fallback() {
        let text = "Carton 12\nJeanne\nJEANNE DUPONT\n12 rue des fleurs";
        assert_eq!(extract(text), Some("JEANNE DUPONT".to_string()));
    }

    #[test]
    fn test_civility_length_boundary() {
        assert_eq!(civility("MME ABC DEF"), None);
        assert_eq!(civility("MME ABC DEFG"), Some("ABC DEFG".to_string()));

        let marker = |name: &str| after_service_marker(&lines(&format!("Serv 1 1234567\n{}", name)));
        assert_eq!(marker("MR ABC DEF"), None);
        assert_eq!(marker("MR ABC DEFG"), Some("ABC DEFG".to_string()));
    }

    #[test]
    fn test_uppercase_length_boundary() {
        assert_eq!(first_uppercase_line(&lines("ABCDE FGH")), None);
        assert_eq!(first_uppercase_line(&lines("ABCDE FGHI")), Some("ABCDE FGHI".to_string()));
        // Ten raw characters, nine once the double space collapses.
        assert_eq!(first_uppercase_line(&lines("ABCD  EFGH")), None);
    }

    #[test]
    fn test_upper_bound() {
        let long = format!("MME {}", "ABCDEFGHI ".repeat(11));
        assert_eq!(civility(&long), None);
    }

    #[test]
    fn test_no_name() {
        assert_eq!(extract("reexpedition temporaire\n12 rue des fleurs"), None);
    }
}
