use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing summarization activity.
#[derive(Default)]
pub struct SummaryMetrics {
    documents_summarized: AtomicU64,
    summaries_failed: AtomicU64,
    extracted_chars: AtomicU64,
}

impl SummaryMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed summarization and the size of the extracted text.
    pub fn record_summary(&self, extracted_chars: u64) {
        self.documents_summarized.fetch_add(1, Ordering::Relaxed);
        self.extracted_chars
            .fetch_add(extracted_chars, Ordering::Relaxed);
    }

    /// Record a request that failed during extraction or generation.
    pub fn record_failure(&self) {
        self.summaries_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_summarized: self.documents_summarized.load(Ordering::Relaxed),
            summaries_failed: self.summaries_failed.load(Ordering::Relaxed),
            extracted_chars: self.extracted_chars.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of summarization counters used for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of documents summarized since startup.
    pub documents_summarized: u64,
    /// Number of requests that failed during extraction or generation.
    pub summaries_failed: u64,
    /// Total characters of document text extracted across successful requests.
    pub extracted_chars: u64,
}
