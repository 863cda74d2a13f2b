//! Insured party / customer name extraction.

use super::patterns::CUSTOMER_NAME;
use super::{ExtractionMatch, FieldExtractor};
use crate::extraction::restore_name;

/// Customer name extractor.
pub struct CustomerNameExtractor;

impl CustomerNameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CustomerNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CustomerNameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        CUSTOMER_NAME
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let name = restore_name(caps.get(1)?.as_str());
                // The class admits spaces, so a run of blanks can satisfy the
                // length bound without any letters.
                if name.chars().count() < 3 {
                    return None;
                }
                Some(
                    ExtractionMatch::new(name, 0.85, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
            .collect()
    }
}
