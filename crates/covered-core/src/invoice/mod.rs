//! Invoice field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, InvoiceParser, WoolworthsParser};

use crate::models::invoice::ParsedInvoice;

/// Parse Woolworths invoice text into meta and items.
pub fn parse_woolworths_invoice(text: &str) -> ParsedInvoice {
    WoolworthsParser::new().parse(text).invoice
}
