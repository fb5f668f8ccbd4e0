//! Core data types and error definitions for file ingestion.

use thiserror::Error;

/// MIME type declared for Office Open XML word-processing documents.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// MIME type declared for PDF documents.
pub const PDF_MIME: &str = "application/pdf";
/// MIME type declared for plain text.
pub const TEXT_MIME: &str = "text/plain";

/// A file received from the upload surface, alive for one request only.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// Original file name as reported by the client.
    pub name: String,
    /// Content type declared by the upload mechanism, trusted without sniffing.
    pub declared_mime: String,
    /// Size of the uploaded payload in bytes.
    pub size_bytes: usize,
    /// Raw file contents.
    pub content: Vec<u8>,
}

/// Recognized document formats, keyed off the declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// UTF-8 plain text, decoded verbatim.
    PlainText,
    /// Office Open XML word-processing package (zip of XML parts).
    Docx,
    /// Portable Document Format.
    Pdf,
}

impl DocumentKind {
    /// Resolve a declared MIME type to a document kind.
    ///
    /// Parameters (anything after `;`) are stripped and the essence is matched
    /// case-insensitively. `None` means the type is unsupported and the caller
    /// must halt before attempting extraction.
    pub fn from_mime(declared: &str) -> Option<Self> {
        match canonicalize_mime(declared).as_str() {
            TEXT_MIME => Some(Self::PlainText),
            DOCX_MIME => Some(Self::Docx),
            PDF_MIME => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Reduce a content-type header to its lowercase essence, dropping parameters.
pub fn canonicalize_mime(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Errors produced while turning an uploaded file into plain text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Plain-text upload was not valid UTF-8.
    #[error("plain text upload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    /// DOCX package could not be parsed.
    #[error("failed to parse DOCX package: {0}")]
    Docx(String),
    /// PDF document could not be loaded or its text could not be decoded.
    #[error("failed to extract PDF text: {0}")]
    Pdf(#[from] lopdf::Error),
}
