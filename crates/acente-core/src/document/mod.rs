//! Turning uploaded documents into text for field extraction.
//!
//! Plain text files (e.g. OCR engine output) are read directly. PDFs are
//! accepted when they carry a text layer; scanned PDFs and images have to go
//! through the external OCR engine first.

mod pdf;

pub use pdf::pdf_text;

use std::path::Path;

use tracing::debug;

use crate::error::DocumentError;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Where a document's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Plain text, typically OCR output.
    PlainText,
    /// PDF with an embedded text layer.
    TextPdf,
}

/// Text recovered from a document.
#[derive(Debug, Clone)]
pub struct DocumentText {
    pub kind: DocumentKind,
    pub text: String,
}

/// Load the text of a document, dispatching on its extension.
pub fn load_document_text(path: &Path) -> Result<DocumentText> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    debug!("Loading document {} ({})", path.display(), extension);

    match extension.as_str() {
        "txt" | "text" | "ocr" => Ok(DocumentText {
            kind: DocumentKind::PlainText,
            text: std::fs::read_to_string(path)?,
        }),
        "pdf" => {
            let data = std::fs::read(path)?;
            Ok(DocumentText {
                kind: DocumentKind::TextPdf,
                text: pdf_text(&data)?,
            })
        }
        "png" | "jpg" | "jpeg" | "tiff" | "tif" | "bmp" | "webp" => Err(DocumentError::NoTextLayer),
        other => Err(DocumentError::UnsupportedFormat(other.to_string())),
    }
}

/// Whether a path has an extension `load_document_text` can read.
pub fn is_supported(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    matches!(ext.to_lowercase().as_str(), "txt" | "text" | "ocr" | "pdf")
}
