//! Serve command - HTTP upload endpoint for invoice PDFs.

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clap::Args;
use console::style;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{info, warn};

use covered_core::models::config::CoveredConfig;
use covered_core::pdf::PdfExtractor;
use covered_core::upload::{handle_upload, UploadResponse, UPLOAD_FIELD};

use super::load_config;

/// Largest accepted request body.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

const UPLOAD_FORM: &str = r#"<html>
  <head><title>Covered Invoice Upload</title></head>
  <body style="font-family: sans-serif; padding: 2rem;">
    <h1>Upload Woolworths Invoice (PDF)</h1>
    <form action="/upload-invoice" method="post" enctype="multipart/form-data">
      <input type="file" name="invoice" accept="application/pdf" required />
      <button type="submit">Upload &amp; Parse</button>
    </form>
    <p>After upload, you'll see the parsed items as JSON.</p>
  </body>
</html>
"#;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if config.require_user_id().is_err() {
        warn!(
            "DEFAULT_USER_ID not set - uploads are attributed to '{}'",
            config.upload.fallback_user_id
        );
    }

    let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
    let addr = listener.local_addr()?;
    info!("Listening on {}", addr);

    eprintln!(
        "{} Invoice upload server running at http://{}",
        style("✓").green(),
        addr
    );
    eprintln!("   POST PDFs to /upload-invoice (field '{}')", UPLOAD_FIELD);

    axum::serve(listener, router(config)).await?;
    Ok(())
}

/// Routes of the upload server.
pub fn router(config: CoveredConfig) -> Router {
    Router::new()
        .route("/", get(upload_form))
        .route("/upload-invoice", post(upload_invoice))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(Arc::new(config))
}

async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

async fn upload_invoice(
    State(config): State<Arc<CoveredConfig>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    // A request that is not multipart carries no file at all
    let file = match multipart {
        Ok(mut mp) => match read_invoice_field(&mut mp).await {
            Ok(file) => file,
            Err(e) => {
                warn!("Malformed multipart upload: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": e.body_text() })),
                )
                    .into_response();
            }
        },
        Err(rejection) => {
            warn!("Upload is not multipart: {}", rejection.body_text());
            None
        }
    };

    let result = tokio::task::spawn_blocking(move || {
        let mut extractor = PdfExtractor::new();
        handle_upload(file.as_deref(), &mut extractor, &config)
    })
    .await;

    match result {
        Ok(response) => into_http(response),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to parse invoice", "details": e.to_string() })),
        )
            .into_response(),
    }
}

/// Bytes of the `invoice` field, if the form has one.
async fn read_invoice_field(mp: &mut Multipart) -> Result<Option<Vec<u8>>, MultipartError> {
    while let Some(field) = mp.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            return Ok(Some(field.bytes().await?.to_vec()));
        }
    }
    Ok(None)
}

fn into_http(response: UploadResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::multipart::{Form, Part};

    async fn spawn_server(config: CoveredConfig) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(config)).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn post_form(base: &str, form: Form) -> (u16, serde_json::Value) {
        let res = reqwest::Client::new()
            .post(format!("{base}/upload-invoice"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        let status = res.status().as_u16();
        (status, res.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_missing_invoice_field_is_bad_request() {
        let base = spawn_server(CoveredConfig::default()).await;
        let (status, body) = post_form(&base, Form::new().text("file", "x")).await;

        assert_eq!(status, 400);
        assert_eq!(body["error"], "No file uploaded. Field name must be 'invoice'.");
    }

    #[tokio::test]
    async fn test_non_multipart_request_is_bad_request() {
        let base = spawn_server(CoveredConfig::default()).await;
        let res = reqwest::Client::new()
            .post(format!("{base}/upload-invoice"))
            .body("plain body")
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "No file uploaded. Field name must be 'invoice'.");
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_server_error() {
        let base = spawn_server(CoveredConfig::default()).await;
        let part = Part::bytes(b"not a pdf".to_vec()).file_name("invoice.pdf");
        let (status, body) = post_form(&base, Form::new().part(UPLOAD_FIELD, part)).await;

        assert_eq!(status, 500);
        assert_eq!(body["error"], "Failed to parse invoice");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_index_serves_upload_form() {
        let base = spawn_server(CoveredConfig::default()).await;
        let html = reqwest::get(format!("{base}/"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(html.contains(r#"name="invoice""#));
        assert!(html.contains(r#"action="/upload-invoice""#));
    }

    #[test]
    fn test_upload_status_maps_onto_response() {
        let response = into_http(UploadResponse {
            status: 400,
            body: json!({ "error": "x" }),
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
