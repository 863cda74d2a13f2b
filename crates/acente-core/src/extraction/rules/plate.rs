//! Vehicle plate number extraction.

use super::patterns::PLATE_NUMBER;
use super::{ExtractionMatch, FieldExtractor};
use crate::extraction::restore_identifier;

/// Plate number extractor. Output is formatted `34 ABC 123`.
pub struct PlateExtractor;

impl PlateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PlateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PLATE_NUMBER
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let province = caps.get(1)?.as_str();
                if !validate_province_code(province) {
                    return None;
                }
                let plate = format!(
                    "{} {} {}",
                    province,
                    restore_identifier(caps.get(2)?.as_str()),
                    caps.get(3)?.as_str()
                );
                Some(
                    ExtractionMatch::new(plate, 0.9, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
            .collect()
    }
}

/// Turkish province codes run from 01 to 81.
pub fn validate_province_code(code: &str) -> bool {
    matches!(code.parse::<u8>(), Ok(1..=81))
}
