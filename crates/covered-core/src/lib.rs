//! Core library for Woolworths invoice processing.
//!
//! This crate provides:
//! - PDF text extraction
//! - Invoice parsing (meta fields, item table, substitutions)
//! - Mapping of parsed items onto `grocery_items` rows
//! - Supabase persistence of mapped rows
//! - The upload endpoint logic (PDF in, JSON out)

pub mod error;
pub mod invoice;
pub mod mapping;
pub mod models;
pub mod pdf;
#[cfg(feature = "native")]
pub mod store;
pub mod upload;

pub use error::{ConfigError, CoveredError, PdfError, Result, StoreError};
pub use invoice::{parse_woolworths_invoice, ExtractionResult, InvoiceParser, WoolworthsParser};
pub use mapping::{map_category, map_rows, RowMapper};
pub use models::config::CoveredConfig;
pub use models::invoice::{InvoiceItem, InvoiceMeta, ParsedInvoice, RawPdfInvoice, Retailer};
pub use models::row::GroceryItemRow;
pub use pdf::{load_invoice_text, load_pdf_text, PdfExtractor, PdfProcessor};
#[cfg(feature = "native")]
pub use store::SupabaseStore;
pub use upload::{handle_upload, UploadResponse};
