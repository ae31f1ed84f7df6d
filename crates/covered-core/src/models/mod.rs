//! Data models for parsed invoices, destination rows and configuration.

pub mod config;
pub mod invoice;
pub mod row;

pub use config::{CoveredConfig, MappingConfig, StoreConfig, UploadConfig};
pub use invoice::{InvoiceItem, InvoiceMeta, ParsedInvoice, RawPdfInvoice, Retailer};
pub use row::{GroceryItemRow, DEFAULT_UNIT};
