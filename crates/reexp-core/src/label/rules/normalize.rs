//! Text normalization shared by every field extractor.

/// OCR text in the two shapes the extractors work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelText {
    normalized: String,
    lines: Vec<String>,
}

impl LabelText {
    /// Normalize raw OCR output.
    pub fn new(raw: &str) -> Self {
        let lines = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            normalized: collapse_whitespace(raw),
            lines,
        }
    }

    /// Whole text with whitespace runs collapsed to single spaces.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Trimmed, non-empty lines in document order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
