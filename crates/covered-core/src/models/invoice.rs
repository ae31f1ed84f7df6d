//! Parsed invoice data models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Retailer that issued the invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Retailer {
    /// Woolworths online order invoice.
    #[default]
    Woolworths,
}

impl Retailer {
    /// Source tag written to destination rows.
    pub fn source_tag(&self) -> &'static str {
        match self {
            Retailer::Woolworths => "woolworths_invoice",
        }
    }
}

/// Labeled header fields found anywhere in the invoice text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceMeta {
    /// Retailer tag.
    pub retailer: Retailer,

    /// Invoice/order number, digits only.
    pub invoice_number: Option<String>,

    /// Customer name as printed.
    pub customer_name: Option<String>,

    /// Invoice date as printed, e.g. "14 March 2024".
    pub date: Option<String>,
}

/// A single row of the purchased-goods table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    /// Sequence number printed on the invoice. Substitutions reuse the numbering.
    pub line_number: u32,

    /// Product description.
    pub description: String,

    /// Category label that preceded this row, if any.
    pub category: Option<String>,

    /// Quantity ordered.
    pub ordered_qty: u32,

    /// Quantity actually supplied.
    pub supplied_qty: u32,

    /// Price per unit.
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    /// Amount charged for the row.
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
}

/// One parsed invoice document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInvoice {
    pub meta: InvoiceMeta,

    /// Main table items first, then substitution items, in document order.
    pub items: Vec<InvoiceItem>,
}

impl ParsedInvoice {
    /// Combine meta and the two scanned sections into one invoice.
    pub fn assemble(
        meta: InvoiceMeta,
        main_items: Vec<InvoiceItem>,
        substitution_items: Vec<InvoiceItem>,
    ) -> Self {
        let mut items = main_items;
        items.extend(substitution_items);
        Self { meta, items }
    }
}

/// Text pulled out of an invoice PDF together with where it came from.
#[derive(Debug, Clone)]
pub struct RawPdfInvoice {
    pub text: String,
    pub file_path: std::path::PathBuf,
}
