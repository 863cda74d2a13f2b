//! Policy document field extraction.

mod normalization;
mod parser;
pub mod rules;

pub use normalization::{normalize, restore_identifier, restore_name, NormalizedText};
pub use parser::{extract_fields, DocumentFieldExtractor, ExtractionResult, PolicyNumberSource};

use crate::models::fields::ExtractedFields;

/// Trait for turning OCR text into a field set.
///
/// Implementations never fail: a field that cannot be recovered is `None`.
pub trait FieldSetParser {
    /// Parse fields from raw OCR text, with extraction details.
    fn parse(&self, text: &str) -> ExtractionResult;

    /// Parse only the field record.
    fn parse_fields(&self, text: &str) -> ExtractedFields {
        self.parse(text).fields
    }
}
