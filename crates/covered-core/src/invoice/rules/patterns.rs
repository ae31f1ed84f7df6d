//! Common regex patterns for Woolworths invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Labeled meta fields, searched across the whole text
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)Invoice/Order Number:\s*([0-9]+)"
    ).unwrap();

    pub static ref INVOICE_DATE: Regex = Regex::new(
        r"(?i)Date:\s*([0-9]{1,2}\s+\w+\s+[0-9]{4})"
    ).unwrap();

    pub static ref CUSTOMER: Regex = Regex::new(
        r"(?i)Customer:\s*(.+)"
    ).unwrap();

    // Whitespace runs collapsed by the line normalizer
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // Section headers (matched against normalized / trimmed lines)
    pub static ref ITEMS_HEADER: Regex = Regex::new(
        r"(?i)^Line Description Ordered Supplied Price Amount$"
    ).unwrap();

    pub static ref SUBSTITUTIONS_HEADER: Regex = Regex::new(
        r"(?i)^Substitutions$"
    ).unwrap();

    // End of an item table
    pub static ref TABLE_TERMINATOR: Regex = Regex::new(
        r"(?i)^(?:Sub Total:|Registered Office:)"
    ).unwrap();

    // <line> <description> <ordered> <supplied> $<price> $<amount>
    pub static ref ITEM_ROW: Regex = Regex::new(
        r"^([0-9]+) (.+?) ([0-9]+) ([0-9]+) \$([0-9.]+) \$([0-9.]+)$"
    ).unwrap();
}
