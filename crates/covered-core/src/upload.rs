//! Upload endpoint logic: PDF bytes in, parsed invoice and rows out.
//!
//! Framework-independent: the HTTP layer hands over the bytes of the
//! `invoice` form field (if any) and writes back status and JSON body.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::invoice::{InvoiceParser, WoolworthsParser};
use crate::mapping::RowMapper;
use crate::models::config::CoveredConfig;
use crate::models::invoice::{InvoiceItem, InvoiceMeta};
use crate::models::row::GroceryItemRow;
use crate::pdf::{self, PdfProcessor};

/// Multipart field name the invoice file is expected under.
pub const UPLOAD_FIELD: &str = "invoice";

/// Successful upload body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadBody {
    pub meta: InvoiceMeta,
    pub items: Vec<InvoiceItem>,
    pub grocery_rows: Vec<GroceryItemRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text_preview: Option<String>,
}

/// Status code and JSON body to send back.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadResponse {
    pub status: u16,
    pub body: Value,
}

impl UploadResponse {
    fn bad_request(message: &str) -> Self {
        Self {
            status: 400,
            body: json!({ "error": message }),
        }
    }

    fn server_error(details: String) -> Self {
        Self {
            status: 500,
            body: json!({ "error": "Failed to parse invoice", "details": details }),
        }
    }
}

/// Handle one uploaded invoice.
pub fn handle_upload<P: PdfProcessor>(
    file: Option<&[u8]>,
    extractor: &mut P,
    config: &CoveredConfig,
) -> UploadResponse {
    let Some(data) = file else {
        return UploadResponse::bad_request(&format!(
            "No file uploaded. Field name must be '{}'.",
            UPLOAD_FIELD
        ));
    };

    match process_upload(data, extractor, config) {
        Ok(body) => match serde_json::to_value(&body) {
            Ok(body) => UploadResponse { status: 200, body },
            Err(e) => UploadResponse::server_error(e.to_string()),
        },
        Err(e) => {
            error!("Error handling upload: {}", e);
            UploadResponse::server_error(e.detail())
        }
    }
}

fn process_upload<P: PdfProcessor>(
    data: &[u8],
    extractor: &mut P,
    config: &CoveredConfig,
) -> pdf::Result<UploadBody> {
    extractor.load(data)?;
    let text = extractor.extract_text()?;
    debug!(
        "Extracted {} characters from {} uploaded pages",
        text.len(),
        extractor.page_count()
    );

    let invoice = WoolworthsParser::new().parse(&text).invoice;
    let grocery_rows = RowMapper::new().map(&invoice, config.upload_user_id());

    let raw_text_preview = config
        .upload
        .text_preview_chars
        .map(|n| text.chars().take(n).collect());

    Ok(UploadBody {
        meta: invoice.meta,
        items: invoice.items,
        grocery_rows,
        raw_text_preview,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use pretty_assertions::assert_eq;

    /// Returns canned text instead of reading a real PDF.
    struct CannedPdf {
        text: Option<&'static str>,
        loaded: bool,
    }

    impl PdfProcessor for CannedPdf {
        fn load(&mut self, data: &[u8]) -> pdf::Result<()> {
            if data.is_empty() {
                return Err(PdfError::NoPages);
            }
            self.loaded = true;
            Ok(())
        }

        fn page_count(&self) -> u32 {
            u32::from(self.loaded)
        }

        fn extract_text(&self) -> pdf::Result<String> {
            self.text
                .map(str::to_string)
                .ok_or_else(|| PdfError::TextExtraction("no text layer".to_string()))
        }
    }

    const TEXT: &str = "Invoice/Order Number: 280749993\n\
                        Date: 14 March 2024\n\
                        Line Description Ordered Supplied Price Amount\n\
                        Fruit & Vegetables\n\
                        1 Bananas 1kg 2 2 $3.50 $7.00";

    #[test]
    fn test_missing_file_is_bad_request() {
        let mut pdf = CannedPdf { text: Some(TEXT), loaded: false };
        let response = handle_upload(None, &mut pdf, &CoveredConfig::default());
        assert_eq!(response.status, 400);
        assert_eq!(
            response.body["error"],
            "No file uploaded. Field name must be 'invoice'."
        );
        assert!(!pdf.loaded);
    }

    #[test]
    fn test_successful_upload() {
        let mut pdf = CannedPdf { text: Some(TEXT), loaded: false };
        let response = handle_upload(Some(b"%PDF".as_slice()), &mut pdf, &CoveredConfig::default());

        assert_eq!(response.status, 200);
        assert_eq!(response.body["meta"]["invoiceNumber"], "280749993");
        assert_eq!(response.body["items"][0]["description"], "Bananas 1kg");
        assert_eq!(response.body["groceryRows"][0]["category"], "Fruit/Veg");
        assert_eq!(response.body["groceryRows"][0]["user_id"], "demo-user");
        assert!(response.body.get("rawTextPreview").is_none());
    }

    #[test]
    fn test_text_preview_when_configured() {
        let mut config = CoveredConfig::default();
        config.upload.text_preview_chars = Some(7);
        config.mapping.default_user_id = Some("user-9".to_string());

        let mut pdf = CannedPdf { text: Some(TEXT), loaded: false };
        let response = handle_upload(Some(b"%PDF".as_slice()), &mut pdf, &config);

        assert_eq!(response.body["rawTextPreview"], "Invoice");
        assert_eq!(response.body["groceryRows"][0]["user_id"], "user-9");
    }

    #[test]
    fn test_extraction_failure_is_server_error() {
        let mut pdf = CannedPdf { text: None, loaded: false };
        let response = handle_upload(Some(b"%PDF".as_slice()), &mut pdf, &CoveredConfig::default());

        assert_eq!(response.status, 500);
        assert_eq!(response.body["error"], "Failed to parse invoice");
        assert_eq!(
            response.body["details"],
            "no text layer"
        );
    }

    #[test]
    fn test_load_failure_is_server_error() {
        let mut pdf = CannedPdf { text: Some(TEXT), loaded: false };
        let response = handle_upload(Some(b"".as_slice()), &mut pdf, &CoveredConfig::default());
        assert_eq!(response.status, 500);
        assert_eq!(response.body["details"], "PDF has no pages");
    }
}
