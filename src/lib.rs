#![deny(missing_docs)]

//! Core library for the docbrief summarization server.

/// HTTP routing, upload handling, and the browser shell.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// File-type dispatch and document text extraction.
pub mod ingest;
/// Structured logging and tracing setup.
pub mod logging;
/// Summarization counters.
pub mod metrics;
/// Request orchestration shared by all surfaces.
pub mod service;
/// Summarization client abstraction and the Ollama adapter.
pub mod summarizer;
