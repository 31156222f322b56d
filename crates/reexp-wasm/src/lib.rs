//! WASM bindings for mail forwarding label extraction.
//!
//! This crate exposes the label parser and the name candidate scanner to
//! browsers and Node.js. Failures come back as rejected values holding the
//! error message.

use js_sys::Array;
use wasm_bindgen::prelude::*;

use reexp_core::{ExtractionResult, ForwardingRecord, LabelParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse(parser: &LabelParser, text: &str) -> Result<ExtractionResult, JsValue> {
    parser.parse(text).map_err(to_js_error)
}

fn record_to_js(record: &ForwardingRecord) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(record).map_err(to_js_error)
}

/// Extract a forwarding record from label OCR text.
#[wasm_bindgen]
pub fn extract_label(text: &str) -> Result<JsValue, JsValue> {
    let result = parse(&LabelParser::new(), text)?;
    record_to_js(&result.record)
}

/// Extract a forwarding record along with the raw text and timing.
#[wasm_bindgen]
pub fn extract_label_with_metadata(text: &str) -> Result<JsValue, JsValue> {
    let result = parse(&LabelParser::new(), text)?;
    serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
}

/// Extract a forwarding record as a JSON string.
#[wasm_bindgen]
pub fn extract_label_json(text: &str) -> Result<String, JsValue> {
    let result = parse(&LabelParser::new(), text)?;
    serde_json::to_string(&result.record).map_err(to_js_error)
}

/// Name candidates of a parcel text, in lookup order.
#[wasm_bindgen]
pub fn name_candidates(text: &str) -> Array {
    reexp_core::name_candidates(text)
        .into_iter()
        .map(|c| JsValue::from_str(&c))
        .collect()
}

/// Reorder a `DD/MM/YYYY` or `DD-MM-YYYY` token as `YYYY-MM-DD`.
#[wasm_bindgen]
pub fn to_iso_date(token: &str) -> Option<String> {
    reexp_core::to_iso_date(token)
}

/// Label extractor class for browser use.
#[wasm_bindgen]
pub struct LabelExtractor {
    parser: LabelParser,
    last: Option<ForwardingRecord>,
}

#[wasm_bindgen]
impl LabelExtractor {
    /// Create a new label extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: LabelParser::new(),
            last: None,
        }
    }

    /// Extract a record from text.
    #[wasm_bindgen]
    pub fn extract(&mut self, text: &str) -> Result<JsValue, JsValue> {
        let result = parse(&self.parser, text)?;
        let value = record_to_js(&result.record)?;
        self.last = Some(result.record);
        Ok(value)
    }

    /// Get extraction result with metadata.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&mut self, text: &str) -> Result<JsValue, JsValue> {
        let result = parse(&self.parser, text)?;
        let value = serde_wasm_bindgen::to_value(&result).map_err(to_js_error)?;
        self.last = Some(result.record);
        Ok(value)
    }

    /// Recipient name of the last successful extraction.
    #[wasm_bindgen(getter)]
    pub fn last_recipient(&self) -> Option<String> {
        self.last.as_ref().map(|r| r.recipient_name.clone())
    }
}

impl Default for LabelExtractor {
    fn default() -> Self {
        Self::new()
    }
}
