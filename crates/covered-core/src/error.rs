//! Error types for the covered-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the covered library.
#[derive(Error, Debug)]
pub enum CoveredError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The PDF file does not exist.
    #[error("PDF file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Reading the PDF from disk failed.
    #[error("failed to read PDF: {0}")]
    Io(#[from] std::io::Error),
}

impl PdfError {
    /// The underlying failure message, without the variant's prefix.
    pub fn detail(&self) -> String {
        match self {
            PdfError::Parse(msg) | PdfError::TextExtraction(msg) => msg.clone(),
            PdfError::Io(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

/// Errors returned by the row store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport-level failure talking to the store.
    #[error("request failed: {0}")]
    Http(String),

    /// The store answered with a non-success status.
    #[error("insert into {table} rejected ({status}): {message}")]
    Rejected {
        table: String,
        status: u16,
        message: String,
    },
}

/// Errors related to configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required value is not set.
    #[error("{0} not set")]
    Missing(&'static str),

    /// The configuration file could not be parsed.
    #[error("invalid configuration file: {0}")]
    Invalid(String),

    /// The configuration file could not be read or written.
    #[error("configuration file I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the covered library.
pub type Result<T> = std::result::Result<T, CoveredError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pdf_error_detail_drops_prefix() {
        let err = PdfError::TextExtraction("no text layer".to_string());
        assert_eq!(err.to_string(), "failed to extract text: no text layer");
        assert_eq!(err.detail(), "no text layer");
        assert_eq!(PdfError::Parse("bad xref".to_string()).detail(), "bad xref");
        assert_eq!(PdfError::NoPages.detail(), "PDF has no pages");
    }
}
