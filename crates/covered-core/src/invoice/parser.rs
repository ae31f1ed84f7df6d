//! Woolworths invoice parser combining meta extraction and table scanning.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::rules::{content_lines, extract_meta, scan_section, ITEMS_SECTION, SUBSTITUTIONS_SECTION};
use crate::models::invoice::ParsedInvoice;

/// Result of invoice extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted invoice data.
    pub invoice: ParsedInvoice,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for invoice parsing.
///
/// Parsing never fails: missing fields and sections come back as `None` or
/// empty lists, with a warning attached.
pub trait InvoiceParser {
    /// Parse invoice from text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Parser for the text layer of Woolworths online order invoices.
#[derive(Debug, Clone, Copy, Default)]
pub struct WoolworthsParser;

impl WoolworthsParser {
    pub fn new() -> Self {
        Self
    }
}

impl InvoiceParser for WoolworthsParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing invoice from {} characters of text", text.len());

        let meta = extract_meta(text);
        if meta.invoice_number.is_none() {
            warnings.push("Could not extract invoice number".to_string());
        }
        if meta.date.is_none() {
            warnings.push("Could not extract invoice date".to_string());
        }

        let lines = content_lines(text);

        let main_items = scan_section(&lines, &ITEMS_SECTION).unwrap_or_else(|| {
            warn!("Could not find Woolworths items header line.");
            warnings.push("Could not find items header line".to_string());
            Vec::new()
        });

        let substitution_items = scan_section(&lines, &SUBSTITUTIONS_SECTION).unwrap_or_default();

        debug!(
            "Found {} main items and {} substitutions",
            main_items.len(),
            substitution_items.len()
        );

        let invoice = ParsedInvoice::assemble(meta, main_items, substitution_items);

        ExtractionResult {
            invoice,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
