//! HTTP surface for docbrief.
//!
//! This module exposes a compact Axum router with a handful of endpoints:
//!
//! - `GET /` – Serve the single-page upload shell (file picker, metadata, trigger).
//! - `POST /summarize` – Accept a multipart file upload, extract its text, and
//!   return the generated summary. Failures map to one of two fixed messages.
//! - `GET /metrics` – Observe summarization counters.
//! - `GET /commands` – Machine-readable command catalog for quick discovery by tools.
//!
//! Each click of the upload shell's trigger performs one full extract+summarize
//! cycle; the shell locks its trigger while a request is in flight.

use crate::config::get_config;
use crate::ingest::UploadedDocument;
use crate::service::{ServiceError, SummarizeApi};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Fixed message shown when the declared file type is not recognized.
pub const UNSUPPORTED_TYPE_MESSAGE: &str =
    "File type not supported. Please upload a txt, pdf or docx file.";
/// Fixed message shown when extraction or generation fails.
pub const RETRY_MESSAGE: &str = "Failed to generate summary. Please try again!";

/// Build the HTTP router exposing the upload and summarization surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: SummarizeApi + 'static,
{
    Router::new()
        .route("/", get(index_page))
        .route("/summarize", post(summarize_upload::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .layer(DefaultBodyLimit::max(get_config().max_upload_bytes))
        .with_state(service)
}

/// Serve the embedded browser shell.
async fn index_page() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

/// Success response for the `POST /summarize` endpoint.
#[derive(Serialize)]
struct SummarizeResponse {
    /// Generated summary text.
    summary: String,
    /// Original file name as uploaded.
    file_name: String,
    /// Content type declared by the upload.
    declared_type: String,
    /// Size of the uploaded file in bytes.
    size_bytes: usize,
    /// Character count of the extracted document text.
    extracted_chars: usize,
}

/// Accept a multipart upload and run one extract+summarize cycle.
///
/// The upload is read from the `file` part; its declared content type decides
/// the extractor. The summarization call is awaited to completion, there is no
/// cancellation path.
async fn summarize_upload<S>(
    State(service): State<Arc<S>>,
    mut multipart: Multipart,
) -> Result<Json<SummarizeResponse>, AppError>
where
    S: SummarizeApi,
{
    let mut upload: Option<UploadedDocument> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| AppError::BadRequest(error.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let declared_mime = field.content_type().unwrap_or("").to_string();
        let content = field
            .bytes()
            .await
            .map_err(|error| AppError::BadRequest(error.to_string()))?;
        upload = Some(UploadedDocument {
            name,
            declared_mime,
            size_bytes: content.len(),
            content: content.to_vec(),
        });
        break;
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest("no file uploaded".into()))?;
    let file_name = upload.name.clone();
    let declared_type = upload.declared_mime.clone();
    let size_bytes = upload.size_bytes;

    let outcome = service.summarize_document(upload).await?;
    Ok(Json(SummarizeResponse {
        summary: outcome.summary,
        file_name,
        declared_type,
        size_bytes,
        extracted_chars: outcome.extracted_chars,
    }))
}

/// Return a concise metrics snapshot with summarization counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<crate::metrics::MetricsSnapshot>
where
    S: SummarizeApi,
{
    Json(service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery/UX in hosts and tools.
async fn get_commands() -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "summarize",
                method: "POST",
                path: "/summarize",
                description: "Upload a txt, pdf, or docx file as the multipart `file` part and receive { \"summary\": string } plus file metadata.",
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return summarization counters useful for observability dashboards.",
            },
        ],
    })
}

/// Top-level error shape for the HTTP surface.
///
/// Service errors collapse into the two fixed user-visible messages; details
/// are logged server-side and never returned to the client.
enum AppError {
    BadRequest(String),
    Service(ServiceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(detail) => {
                tracing::warn!(detail = %detail, "Rejected malformed upload request");
                (StatusCode::BAD_REQUEST, "No file uploaded.")
            }
            AppError::Service(ServiceError::UnsupportedType(mime)) => {
                tracing::warn!(declared_mime = %mime, "Rejected unsupported file type");
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, UNSUPPORTED_TYPE_MESSAGE)
            }
            AppError::Service(error) => {
                tracing::warn!(error = %error, "Summarization request failed");
                (StatusCode::BAD_GATEWAY, RETRY_MESSAGE)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(inner: ServiceError) -> Self {
        Self::Service(inner)
    }
}
