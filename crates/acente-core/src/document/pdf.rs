//! Text-layer extraction from PDFs using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::Result;
use crate::error::DocumentError;

/// Below this many non-whitespace characters a PDF is treated as scanned.
const MIN_TEXT_CHARS: usize = 20;

/// Extract the embedded text of a PDF.
pub fn pdf_text(data: &[u8]) -> Result<String> {
    let document = Document::load_mem(data).map_err(|e| DocumentError::Parse(e.to_string()))?;

    if document.is_encrypted() {
        return Err(DocumentError::Encrypted);
    }

    let page_count = document.get_pages().len();
    if page_count == 0 {
        return Err(DocumentError::NoPages);
    }
    debug!("PDF has {} pages", page_count);

    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| DocumentError::Parse(e.to_string()))?;

    let chars = text.chars().filter(|c| !c.is_whitespace()).count();
    if chars < MIN_TEXT_CHARS {
        warn!("PDF text layer has only {} characters", chars);
        return Err(DocumentError::NoTextLayer);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_a_parse_error() {
        assert!(matches!(
            pdf_text(b"definitely not a pdf"),
            Err(DocumentError::Parse(_))
        ));
    }
}
