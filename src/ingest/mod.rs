//! File ingestion: declared-type dispatch and text extraction.
//!
//! An upload carries a declared MIME type which is trusted as-is (no content
//! sniffing). Dispatch is a closed enum so every recognized format is handled
//! exhaustively and everything else is rejected before any parsing work.

mod extract;
mod types;

pub use extract::extract_text;
pub use types::{DocumentKind, ExtractError, UploadedDocument};
