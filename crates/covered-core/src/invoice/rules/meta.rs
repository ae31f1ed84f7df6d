//! Labeled header field extraction (invoice number, date, customer).

use regex::Regex;

use super::patterns::{CUSTOMER, INVOICE_DATE, INVOICE_NUMBER};
use super::FieldExtractor;
use crate::models::invoice::{InvoiceMeta, Retailer};

/// Extracts the first capture group of a labeled pattern.
pub struct LabeledFieldExtractor {
    pattern: &'static Regex,
}

impl LabeledFieldExtractor {
    pub fn new(pattern: &'static Regex) -> Self {
        Self { pattern }
    }

    pub fn invoice_number() -> Self {
        Self::new(&INVOICE_NUMBER)
    }

    pub fn date() -> Self {
        Self::new(&INVOICE_DATE)
    }

    pub fn customer() -> Self {
        Self::new(&CUSTOMER)
    }
}

impl FieldExtractor for LabeledFieldExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.pattern
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
    }
}

/// Search the whole text for the three labeled fields.
///
/// Each search is independent, so label order in the document does not
/// matter. A label that never appears leaves its field as `None`.
pub fn extract_meta(text: &str) -> InvoiceMeta {
    InvoiceMeta {
        retailer: Retailer::Woolworths,
        invoice_number: LabeledFieldExtractor::invoice_number().extract(text),
        customer_name: LabeledFieldExtractor::customer().extract(text),
        date: LabeledFieldExtractor::date().extract(text),
    }
}
