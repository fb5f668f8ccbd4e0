//! Format-specific text extraction.
//!
//! Each extractor flattens a document into a single string. Structural
//! boundaries are not preserved as data: DOCX paragraphs are joined with a
//! single space and PDF pages are concatenated in page order with nothing
//! inserted between them.

use docx_rs::{DocumentChild, ParagraphChild, RunChild, read_docx};
use lopdf::Document;

use super::types::{DocumentKind, ExtractError};

/// Extract the full text of an uploaded document according to its kind.
pub fn extract_text(kind: DocumentKind, content: &[u8]) -> Result<String, ExtractError> {
    match kind {
        DocumentKind::PlainText => decode_plain_text(content),
        DocumentKind::Docx => extract_docx(content),
        DocumentKind::Pdf => extract_pdf(content),
    }
}

/// Decode a plain-text upload as strict UTF-8, byte-exact.
fn decode_plain_text(content: &[u8]) -> Result<String, ExtractError> {
    Ok(String::from_utf8(content.to_vec())?)
}

/// Walk the Document → Paragraph → Run → Text tree and join paragraphs with a
/// single space. Runs within a paragraph are concatenated with no separator
/// because they are fragments of the same sentence.
fn extract_docx(content: &[u8]) -> Result<String, ExtractError> {
    let docx = read_docx(content).map_err(|error| ExtractError::Docx(format!("{error:?}")))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut parts: Vec<&str> = Vec::new();
            for paragraph_child in &paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in &run.children {
                        if let RunChild::Text(text) = run_child {
                            parts.push(text.text.as_str());
                        }
                    }
                }
            }
            paragraphs.push(parts.concat());
        }
    }

    Ok(paragraphs.join(" "))
}

/// Concatenate per-page text in ascending page order. Line breaks emitted by
/// the page content streams pass through; no page separator is inserted.
fn extract_pdf(content: &[u8]) -> Result<String, ExtractError> {
    let document = Document::load_mem(content)?;

    let mut text = String::new();
    for page_number in document.get_pages().keys() {
        text.push_str(&document.extract_text(&[*page_number])?);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, ObjectId, Stream, dictionary};
    use std::io::Cursor;

    #[test]
    fn plain_text_decodes_byte_exact() {
        let input = "Line one\nLine two — naïve café\n";
        let extracted =
            extract_text(DocumentKind::PlainText, input.as_bytes()).expect("valid utf-8");
        assert_eq!(extracted, input);
    }

    #[test]
    fn plain_text_rejects_invalid_utf8() {
        let error = extract_text(DocumentKind::PlainText, &[0xff, 0xfe, 0x00])
            .expect_err("invalid utf-8");
        assert!(matches!(error, ExtractError::InvalidUtf8(_)));
    }

    #[test]
    fn docx_paragraphs_join_with_single_space() {
        let bytes = build_docx(&["Hello", "world"]);
        let extracted = extract_text(DocumentKind::Docx, &bytes).expect("docx parses");
        assert_eq!(extracted, "Hello world");
    }

    #[test]
    fn docx_runs_concatenate_within_a_paragraph() {
        let docx = Docx::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Hel"))
                .add_run(Run::new().add_text("lo")),
        );
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).expect("pack docx");
        let extracted =
            extract_text(DocumentKind::Docx, cursor.get_ref()).expect("docx parses");
        assert_eq!(extracted, "Hello");
    }

    #[test]
    fn docx_garbage_is_an_extraction_error() {
        let error = extract_text(DocumentKind::Docx, b"not a zip archive")
            .expect_err("malformed docx");
        assert!(matches!(error, ExtractError::Docx(_)));
    }

    #[test]
    fn pdf_pages_concatenate_in_page_order() {
        let bytes = build_pdf(&["Page1", "Page2"]);
        let extracted = extract_text(DocumentKind::Pdf, &bytes).expect("pdf parses");
        // The extractor inserts nothing between pages; only line breaks from
        // the content streams themselves may appear.
        let squashed: String = extracted.split_whitespace().collect();
        assert_eq!(squashed, "Page1Page2");
    }

    #[test]
    fn pdf_garbage_is_an_extraction_error() {
        let error = extract_text(DocumentKind::Pdf, b"%PDF-???").expect_err("malformed pdf");
        assert!(matches!(error, ExtractError::Pdf(_)));
    }

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).expect("pack docx");
        cursor.into_inner()
    }

    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = document.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = document.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content"),
            ));
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id: ObjectId = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let mut cursor = Cursor::new(Vec::new());
        document.save_to(&mut cursor).expect("serialize pdf");
        cursor.into_inner()
    }
}
