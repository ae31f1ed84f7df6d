//! Item table scanning.
//!
//! PDF-to-text flattening loses the table geometry of the invoice, so item
//! rows are recovered line by line. A section starts at a header line and
//! ends at a terminator line. Between the two, short non-numeric lines are
//! taken as category labels and numeric lines are matched against the item
//! row pattern. Lines that fail the pattern are skipped.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::trace;

use super::normalize::normalize_spaces;
use super::patterns::{ITEMS_HEADER, ITEM_ROW, SUBSTITUTIONS_HEADER, TABLE_TERMINATOR};
use crate::models::invoice::InvoiceItem;

/// Longest line still treated as a category label.
pub const MAX_CATEGORY_LEN: usize = 40;

/// Scanner state for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    SeekingHeader,
    InTable,
    Done,
}

/// Describes one scannable section of the invoice.
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    /// Section name used in logs.
    pub name: &'static str,
    /// Recognizes the header line (given the trimmed line).
    pub header: fn(&str) -> bool,
    /// Recognizes the line that ends the section (given the trimmed line).
    pub terminator: fn(&str) -> bool,
    /// Category for items that appear before any label in the section.
    pub empty_category: Option<&'static str>,
}

/// The main purchased-goods table.
pub const ITEMS_SECTION: SectionSpec = SectionSpec {
    name: "items",
    header: is_items_header,
    terminator: is_table_terminator,
    empty_category: None,
};

/// The substituted-goods table that follows the main one.
pub const SUBSTITUTIONS_SECTION: SectionSpec = SectionSpec {
    name: "substitutions",
    header: is_substitutions_header,
    terminator: is_table_terminator,
    empty_category: Some("Substitutions"),
};

fn is_items_header(line: &str) -> bool {
    ITEMS_HEADER.is_match(&normalize_spaces(line))
}

fn is_substitutions_header(line: &str) -> bool {
    SUBSTITUTIONS_HEADER.is_match(line)
}

fn is_table_terminator(line: &str) -> bool {
    TABLE_TERMINATOR.is_match(line)
}

fn starts_with_digit(line: &str) -> bool {
    line.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Category label carried by a non-numeric line, if it looks like one.
///
/// Labels are short lines; anything longer is wrapped description text or
/// footer noise and leaves the current category untouched.
pub fn category_label(line: &str) -> Option<String> {
    if starts_with_digit(line) || line.chars().count() > MAX_CATEGORY_LEN {
        return None;
    }
    Some(normalize_spaces(line))
}

/// Integer field of an item row. Values past `u32::MAX` saturate.
fn count_field(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

/// Amount field of an item row, read from its longest decimal prefix.
///
/// `3.1.0` reads as `3.1` and a bare `.` reads as zero.
pub fn amount_field(raw: &str) -> Decimal {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in raw.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }

    let prefix = match &raw[..end] {
        "" | "." => return Decimal::ZERO,
        p if p.starts_with('.') => format!("0{p}"),
        p => p.to_string(),
    };
    Decimal::from_str(&prefix).unwrap_or(Decimal::MAX)
}

/// Match a normalized line against the item row pattern.
///
/// Returns `None` only when the line does not match.
pub fn parse_item_row(line: &str, category: Option<String>) -> Option<InvoiceItem> {
    let normalized = normalize_spaces(line);
    let caps = ITEM_ROW.captures(&normalized)?;

    Some(InvoiceItem {
        line_number: count_field(&caps[1]),
        description: normalize_spaces(&caps[2]),
        category,
        ordered_qty: count_field(&caps[3]),
        supplied_qty: count_field(&caps[4]),
        unit_price: amount_field(&caps[5]),
        line_total: amount_field(&caps[6]),
    })
}

/// Scan one section of the invoice.
///
/// `lines` must already be trimmed and free of empty lines. Returns `None`
/// when the section header never appears.
pub fn scan_section(lines: &[&str], spec: &SectionSpec) -> Option<Vec<InvoiceItem>> {
    let mut state = ScanState::SeekingHeader;
    let mut category: Option<String> = None;
    let mut items = Vec::new();

    for line in lines {
        match state {
            ScanState::SeekingHeader => {
                if (spec.header)(line) {
                    state = ScanState::InTable;
                }
            }
            ScanState::InTable => {
                if (spec.terminator)(line) {
                    state = ScanState::Done;
                } else if !starts_with_digit(line) {
                    if let Some(label) = category_label(line) {
                        trace!("{} category: {}", spec.name, label);
                        category = Some(label);
                    }
                } else {
                    let current = category
                        .clone()
                        .or_else(|| spec.empty_category.map(str::to_string));
                    match parse_item_row(line, current) {
                        Some(item) => items.push(item),
                        None => trace!("{} skipped non-matching row: {}", spec.name, line),
                    }
                }
            }
            ScanState::Done => break,
        }
    }

    match state {
        ScanState::SeekingHeader => None,
        _ => Some(items),
    }
}
