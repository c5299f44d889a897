//! Text extraction from uploaded report files.
//!
//! Extraction is best-effort: a document that cannot be parsed is skipped
//! and recorded, never fatal. Pages that carry no text (scanned images)
//! contribute nothing and are not an error.

use finsight_core::Error;
use serde::Serialize;
use tracing::{debug, warn};

/// An uploaded document: a name used for format detection and diagnostics,
/// plus its raw bytes. Not persisted anywhere by the pipeline.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Supported document formats, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
    Markdown,
    Unknown,
}

impl DocumentKind {
    pub fn from_name(name: &str) -> Self {
        let ext = name.rsplit('.').next().unwrap_or("");
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "txt" | "text" => Self::PlainText,
            "md" | "mdx" | "markdown" => Self::Markdown,
            _ => Self::Unknown,
        }
    }
}

/// A recorded per-document extraction failure.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionFailure {
    pub document: String,
    pub reason: String,
}

/// Result of extracting a batch of documents: the concatenated text of every
/// document that parsed, plus a record for every one that did not.
#[derive(Debug, Default)]
pub struct Extraction {
    pub text: String,
    pub failures: Vec<ExtractionFailure>,
}

/// Extract text from every document in input order and concatenate it.
///
/// No page or document separators are re-inserted; callers must not rely on
/// boundaries surviving. Empty or all-failed input yields empty text.
pub fn extract_documents(documents: &[SourceDocument]) -> Extraction {
    let mut extraction = Extraction::default();

    for doc in documents {
        match extract_one(doc) {
            Ok(Some(text)) => extraction.text.push_str(&text),
            Ok(None) => debug!("No text extracted from {}", doc.name),
            Err(e) => {
                warn!("Failed to extract {}: {}", doc.name, e);
                let reason = match e {
                    Error::Extraction(reason) => reason,
                    other => other.to_string(),
                };
                extraction.failures.push(ExtractionFailure {
                    document: doc.name.clone(),
                    reason,
                });
            }
        }
    }

    extraction
}

fn extract_one(doc: &SourceDocument) -> finsight_core::Result<Option<String>> {
    match DocumentKind::from_name(&doc.name) {
        DocumentKind::Pdf => extract_pdf(&doc.bytes),
        DocumentKind::PlainText | DocumentKind::Markdown => {
            // Lossy decode is a tolerated degradation, not a failure.
            let text = String::from_utf8_lossy(&doc.bytes).into_owned();
            Ok(non_empty(text))
        }
        DocumentKind::Unknown => extract_unknown(&doc.bytes),
    }
}

/// Pull text out of a PDF page by page. An unreadable document is a
/// failure; a page without text just contributes nothing.
fn extract_pdf(bytes: &[u8]) -> finsight_core::Result<Option<String>> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| Error::Extraction(e.to_string()))?;

    let mut text = String::new();
    for page in &pages {
        if !page.trim().is_empty() {
            text.push_str(page);
        }
    }
    Ok(non_empty(text))
}

/// Try an unknown extension as UTF-8 text; reject content that looks binary.
fn extract_unknown(bytes: &[u8]) -> finsight_core::Result<Option<String>> {
    let text = match std::str::from_utf8(bytes) {
        Ok(t) => t.to_string(),
        Err(_) => {
            return Err(Error::Extraction(
                "unsupported format: content is not valid UTF-8".into(),
            ))
        }
    };

    let control_chars = text
        .chars()
        .filter(|c| c.is_control() && *c != '\n' && *c != '\r' && *c != '\t')
        .count();
    if !text.is_empty() && control_chars > text.len() / 10 {
        return Err(Error::Extraction(
            "unsupported format: content looks binary".into(),
        ));
    }

    Ok(non_empty(text))
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_kind_from_extension() {
        assert_eq!(DocumentKind::from_name("report.pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_name("Q3.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_name("notes.txt"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_name("readme.md"), DocumentKind::Markdown);
        assert_eq!(DocumentKind::from_name("data.bin"), DocumentKind::Unknown);
        assert_eq!(DocumentKind::from_name("no-extension"), DocumentKind::Unknown);
    }

    #[test]
    fn concatenates_text_documents_in_order() {
        let docs = vec![
            SourceDocument::new("a.txt", b"first part ".to_vec()),
            SourceDocument::new("b.txt", b"second part".to_vec()),
        ];
        let extraction = extract_documents(&docs);
        assert_eq!(extraction.text, "first part second part");
        assert!(extraction.failures.is_empty());
    }

    #[test]
    fn corrupt_document_is_skipped_and_recorded() {
        let docs = vec![
            SourceDocument::new("good.txt", b"usable text".to_vec()),
            SourceDocument::new("bad.pdf", b"not a pdf at all".to_vec()),
        ];
        let extraction = extract_documents(&docs);
        assert_eq!(extraction.text, "usable text");
        assert_eq!(extraction.failures.len(), 1);
        assert_eq!(extraction.failures[0].document, "bad.pdf");
    }

    #[test]
    fn binary_unknown_document_is_recorded_as_failure() {
        let docs = vec![SourceDocument::new("blob", vec![0u8, 159, 146, 150, 0, 1, 2])];
        let extraction = extract_documents(&docs);
        assert!(extraction.text.is_empty());
        assert_eq!(extraction.failures.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_text() {
        let extraction = extract_documents(&[]);
        assert!(extraction.text.is_empty());
        assert!(extraction.failures.is_empty());
    }

    #[test]
    fn whitespace_only_document_contributes_nothing() {
        let docs = vec![SourceDocument::new("blank.txt", b"   \n\n  ".to_vec())];
        let extraction = extract_documents(&docs);
        assert!(extraction.text.is_empty());
        assert!(extraction.failures.is_empty());
    }
}
