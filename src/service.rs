//! Summarization service coordinating dispatch, extraction, and generation.

use crate::{
    config::get_config,
    ingest::{self, DocumentKind, ExtractError, UploadedDocument},
    metrics::{MetricsSnapshot, SummaryMetrics},
    summarizer::{
        SummarizeRequest, SummarizerClient, SummarizerClientError, SummaryBounds,
        get_summarizer_client,
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors emitted by the summarization pipeline.
///
/// `UnsupportedType` is the only error distinguished to the user; extraction
/// and generation failures both collapse into a single fixed retry message at
/// the HTTP boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Declared MIME type is not one of the three recognized formats.
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    /// Extraction step failed to flatten the document into text.
    #[error("failed to extract document text: {0}")]
    Extraction(#[from] ExtractError),
    /// Summarization provider raised an error.
    #[error("failed to generate summary: {0}")]
    Summarization(#[from] SummarizerClientError),
}

/// Result of a completed extract-and-summarize cycle.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    /// Generated summary text.
    pub summary: String,
    /// Character count of the text extracted from the upload.
    pub extracted_chars: usize,
}

/// Abstraction over the summarization pipeline used by the HTTP surface.
#[async_trait]
pub trait SummarizeApi: Send + Sync {
    /// Run one full extract+summarize cycle for an uploaded document.
    async fn summarize_document(
        &self,
        upload: UploadedDocument,
    ) -> Result<SummaryOutcome, ServiceError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

/// Coordinates the full request pipeline: declared-type dispatch, extraction,
/// and one synchronous summarization call.
///
/// The service owns the long-lived summarizer handle and the metrics registry.
/// Construct it once near process start and share it through an `Arc`.
pub struct SummarizeService {
    summarizer: Box<dyn SummarizerClient + Send + Sync>,
    metrics: Arc<SummaryMetrics>,
}

impl SummarizeService {
    /// Build a new service, constructing the summarizer from configuration.
    pub fn new() -> Self {
        tracing::info!("Initializing summarization client");
        Self::with_client(get_summarizer_client())
    }

    /// Build a service around an explicit summarizer handle.
    pub fn with_client(summarizer: Box<dyn SummarizerClient + Send + Sync>) -> Self {
        Self {
            summarizer,
            metrics: Arc::new(SummaryMetrics::new()),
        }
    }

    /// Dispatch on the declared MIME type, extract text, and summarize it.
    pub async fn summarize_document(
        &self,
        upload: UploadedDocument,
    ) -> Result<SummaryOutcome, ServiceError> {
        tracing::info!(
            file = %upload.name,
            declared_mime = %upload.declared_mime,
            size_bytes = upload.size_bytes,
            "Processing upload"
        );

        let Some(kind) = DocumentKind::from_mime(&upload.declared_mime) else {
            return Err(ServiceError::UnsupportedType(upload.declared_mime));
        };

        let text = ingest::extract_text(kind, &upload.content).inspect_err(|_| {
            self.metrics.record_failure();
        })?;
        let extracted_chars = text.chars().count();
        tracing::debug!(kind = ?kind, extracted_chars, "Extraction complete");

        let config = get_config();
        let request = SummarizeRequest {
            model: config.summary_model.clone(),
            text,
            bounds: SummaryBounds {
                min_words: config.summary_min_words,
                max_words: config.summary_max_words,
            },
        };

        let summary = self
            .summarizer
            .summarize(request)
            .await
            .inspect_err(|_| self.metrics.record_failure())?;

        self.metrics.record_summary(extracted_chars as u64);
        tracing::info!(
            file = %upload.name,
            extracted_chars,
            summary_chars = summary.chars().count(),
            "Summary generated"
        );

        Ok(SummaryOutcome {
            summary,
            extracted_chars,
        })
    }

    /// Return the current summarization metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[async_trait]
impl SummarizeApi for SummarizeService {
    async fn summarize_document(
        &self,
        upload: UploadedDocument,
    ) -> Result<SummaryOutcome, ServiceError> {
        SummarizeService::summarize_document(self, upload).await
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        SummarizeService::metrics_snapshot(self)
    }
}
