//! PDF processing module.

mod extractor;

pub use extractor::{load_pdf_text, PdfExtractor};

use std::path::Path;

use crate::error::PdfError;
use crate::models::invoice::RawPdfInvoice;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}

/// Load invoice text from a PDF, or from a `.txt` file holding text that
/// was already extracted.
pub fn load_invoice_text(path: &Path) -> crate::Result<RawPdfInvoice> {
    let is_text = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));

    if !is_text {
        return Ok(load_pdf_text(path)?);
    }

    let text = std::fs::read_to_string(path)?;
    Ok(RawPdfInvoice {
        text,
        file_path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoveredError;

    #[test]
    fn test_load_invoice_text_from_txt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.TXT");
        std::fs::write(&path, "Invoice/Order Number: 1").unwrap();

        let raw = load_invoice_text(&path).unwrap();
        assert_eq!(raw.text, "Invoice/Order Number: 1");
        assert_eq!(raw.file_path, path);
    }

    #[test]
    fn test_load_invoice_text_missing_pdf() {
        let err = load_invoice_text(Path::new("does/not/exist.pdf")).unwrap_err();
        assert!(matches!(err, CoveredError::Pdf(PdfError::NotFound(_))));
    }
}
