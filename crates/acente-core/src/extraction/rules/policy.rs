//! Policy / reference number extraction.

use regex::Regex;

use super::patterns::{CUSTOMER_NUMBER, POLICY_NUMBER};
use super::{ExtractionMatch, FieldExtractor};
use crate::extraction::restore_identifier;

/// Extracts numbers labeled "Poliçe No" or "Ref No".
pub struct PolicyNumberExtractor;

impl PolicyNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PolicyNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PolicyNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        labeled_numbers(&POLICY_NUMBER, text, 0.95)
    }
}

/// Extracts numbers labeled "Müşteri No".
///
/// A customer number identifies the customer, not the policy. It is only a
/// lower-confidence stand-in when a document carries no policy number.
pub struct CustomerNumberExtractor;

impl CustomerNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CustomerNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CustomerNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        labeled_numbers(&CUSTOMER_NUMBER, text, 0.5)
    }
}

fn labeled_numbers(pattern: &Regex, text: &str, confidence: f32) -> Vec<ExtractionMatch<String>> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let full_match = caps.get(0)?;
            let number = restore_identifier(caps.get(1)?.as_str());
            Some(
                ExtractionMatch::new(number, confidence, full_match.as_str())
                    .with_position(full_match.start(), full_match.end()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::normalize;

    #[test]
    fn test_extract_policy_number() {
        let text = normalize("POLİÇE NO: 9012345678 Tanzim Tarihi 01.02.2024");
        let result = PolicyNumberExtractor::new().extract(text.as_str()).unwrap();
        assert_eq!(result.value, "9012345678");
        assert!(result.confidence > 0.9);
    }

    #[test]
    fn test_extract_ref_number_with_letters() {
        let text = normalize("Ref No. KSK-2024/00IA17");
        let result = PolicyNumberExtractor::new().extract(text.as_str()).unwrap();
        assert_eq!(result.value, "KSK-2024/00IA17");
    }

    #[test]
    fn test_customer_number_is_lower_confidence() {
        let text = normalize("Müşteri No 135544329");
        assert!(PolicyNumberExtractor::new().extract(text.as_str()).is_none());

        let result = CustomerNumberExtractor::new().extract(text.as_str()).unwrap();
        assert_eq!(result.value, "135544329");
        assert!(result.confidence < 0.9);
    }

    #[test]
    fn test_first_match_wins() {
        let text = normalize("Poliçe No 11111 ... Poliçe No 22222");
        let all = PolicyNumberExtractor::new().extract_all(text.as_str());
        assert_eq!(all.len(), 2);
        assert_eq!(
            PolicyNumberExtractor::new().extract(text.as_str()).unwrap().value,
            "11111"
        );
    }
}
