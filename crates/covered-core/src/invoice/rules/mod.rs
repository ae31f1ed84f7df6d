//! Rule-based field extractors for Woolworths invoices.

pub mod meta;
pub mod normalize;
pub mod patterns;
pub mod table;

pub use meta::{extract_meta, LabeledFieldExtractor};
pub use normalize::{content_lines, normalize_spaces};
pub use table::{
    category_label, parse_item_row, scan_section, ScanState, SectionSpec, ITEMS_SECTION,
    SUBSTITUTIONS_SECTION,
};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}
