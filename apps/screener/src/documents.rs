//! Document-to-text conversion for uploaded resumes and job descriptions.
//!
//! An empty string means the document was recognised but unreadable; callers
//! decide whether that is a failure. Only unsupported extensions and I/O
//! problems are errors.

use std::io::{Cursor, Read};
use std::panic;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::{debug, warn};

const DOCX_BODY_ENTRY: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported file format: {0}. Please upload PDF or DOCX.")]
    UnsupportedFormat(String),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        let ext = Path::new(&lower).extension()?.to_str()?.to_owned();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" | "doc" => Some(Self::Docx),
            "txt" | "md" => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// Reads the file at `path` and converts it to plain text.
pub fn extract_document_text(path: &Path) -> Result<String, DocumentError> {
    let name = path.to_string_lossy();
    if DocumentKind::from_name(&name).is_none() {
        return Err(DocumentError::UnsupportedFormat(display_name(path)));
    }
    let bytes = std::fs::read(path)?;
    extract_text_from_bytes(&name, &bytes)
}

/// Converts in-memory document bytes to text, choosing the parser from `filename`.
pub fn extract_text_from_bytes(filename: &str, bytes: &[u8]) -> Result<String, DocumentError> {
    let kind = DocumentKind::from_name(filename)
        .ok_or_else(|| DocumentError::UnsupportedFormat(filename.to_string()))?;
    Ok(text_for_kind(kind, filename, bytes))
}

fn text_for_kind(kind: DocumentKind, name: &str, bytes: &[u8]) -> String {
    let text = match kind {
        DocumentKind::Pdf => pdf_text(name, bytes),
        DocumentKind::Docx => docx_text(name, bytes),
        DocumentKind::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };
    debug!(document = name, chars = text.chars().count(), "Extracted document text");
    text
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

// ────────────────────────────────────────────────────────────────────────────
// PDF
// ────────────────────────────────────────────────────────────────────────────

fn pdf_text(name: &str, bytes: &[u8]) -> String {
    // pdf-extract panics on some malformed inputs instead of returning Err.
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(document = name, error = %e, "Error reading PDF");
            String::new()
        }
        Err(_) => {
            warn!(document = name, "PDF parser panicked; treating document as unreadable");
            String::new()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// DOCX
// ────────────────────────────────────────────────────────────────────────────

fn docx_text(name: &str, bytes: &[u8]) -> String {
    match read_docx_body(bytes).and_then(|xml| docx_xml_to_text(&xml)) {
        Ok(text) => text,
        Err(e) => {
            warn!(document = name, error = %e, "Error reading DOCX");
            String::new()
        }
    }
}

fn read_docx_body(bytes: &[u8]) -> anyhow::Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut entry = archive.by_name(DOCX_BODY_ENTRY)?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Flattens WordprocessingML into text: one line per paragraph, with
/// `<w:tab/>` and `<w:br/>` rendered as tab and newline.
fn docx_xml_to_text(xml: &str) -> anyhow::Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.name().as_ref() == b"w:t" {
                    in_run_text = true;
                }
            }
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_run_text => text.push_str(&e.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(text)
}
