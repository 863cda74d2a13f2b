//! Premium / payable amount extraction.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::patterns::AMOUNT_PATTERNS;
use super::{ExtractionMatch, FieldExtractor};

/// Labels too generic to be trusted as much as "net prim" and friends.
const GENERIC_LABELS: [&str; 2] = ["tutar", "bedel"];

/// Amount field extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    fn confidence_for(label: &str) -> f32 {
        if GENERIC_LABELS.contains(&label) {
            0.7
        } else {
            0.95
        }
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    /// The first match of the highest-priority label decides the amount.
    /// If its number does not parse the field stays empty; lower-priority
    /// labels are not consulted.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let (label, caps) = AMOUNT_PATTERNS
            .iter()
            .find_map(|(label, pattern)| pattern.captures(text).map(|caps| (*label, caps)))?;

        let full_match = caps.get(0)?;
        let token = caps.get(1)?.as_str();
        trace!("Amount label '{}' matched token '{}'", label, token);

        let amount = parse_amount(token)?;
        Some(
            ExtractionMatch::new(amount, Self::confidence_for(label), full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for (label, pattern) in AMOUNT_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                let (Some(full_match), Some(token)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                if let Some(amount) = parse_amount(token.as_str()) {
                    results.push(
                        ExtractionMatch::new(amount, Self::confidence_for(label), full_match.as_str())
                            .with_position(full_match.start(), full_match.end()),
                    );
                }
            }
        }

        results
    }
}

/// Parse an amount written with either Turkish (`1.234,56`) or Western
/// (`1,234.56`) grouping.
///
/// When both `.` and `,` occur, whichever appears last is the decimal
/// separator and every occurrence of the other is dropped. A lone `,` is a
/// decimal separator. A decimal separator with no digits after it (`1.234,`)
/// leaves a whole number. Returns `None` when the result is not a number.
pub fn parse_amount(token: &str) -> Option<Decimal> {
    let token = token.trim();

    let normalized = match (token.rfind('.'), token.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => token.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => token.replace(',', ""),
        (None, Some(_)) => token.replace(',', "."),
        _ => token.to_string(),
    };

    Decimal::from_str(normalized.strip_suffix('.').unwrap_or(&normalized)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::normalize;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn amount_in(raw: &str) -> Option<Decimal> {
        AmountExtractor::new()
            .extract(normalize(raw).as_str())
            .map(|m| m.value)
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("17.802,95"), Some(dec("17802.95")));
        assert_eq!(parse_amount("1234,50"), Some(dec("1234.5")));
        assert_eq!(parse_amount("1234.50"), Some(dec("1234.50")));
        assert_eq!(parse_amount("12.345.678,90"), Some(dec("12345678.90")));
        assert_eq!(parse_amount("950"), Some(dec("950")));
    }

    #[test]
    fn test_parse_amount_trailing_separator() {
        assert_eq!(parse_amount("1.234,"), Some(dec("1234")));
        assert_eq!(parse_amount("1,234."), Some(dec("1234")));
        assert_eq!(parse_amount("950,"), Some(dec("950")));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("1,234,567"), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_extract_with_currency_markers() {
        assert_eq!(amount_in("Net Prim: 1.234,56 TL"), Some(dec("1234.56")));
        assert_eq!(amount_in("Toplam Tutar 1,234.56 TRY"), Some(dec("1234.56")));
        assert_eq!(amount_in("BRÜT PRİM 17.802,95TL"), Some(dec("17802.95")));
        assert_eq!(amount_in("Tutar: 1234,50 TL"), Some(dec("1234.5")));
        assert_eq!(amount_in("Ödenecek Tutar 250,00 ₺"), Some(dec("250")));
    }

    #[test]
    fn test_missing_currency_yields_none() {
        assert_eq!(amount_in("Net Prim: 1.234,56"), None);
        assert_eq!(amount_in("Tutar 500 adet"), None);
    }

    #[test]
    fn test_specific_label_beats_generic() {
        let text = "Tutar: 100,00 TL | Bedel 50 TL | Net Prim: 2.000,00 TL";
        let result = AmountExtractor::new().extract(normalize(text).as_str()).unwrap();
        assert_eq!(result.value, dec("2000"));
        assert!(result.confidence > 0.9);

        let all = AmountExtractor::new().extract_all(normalize(text).as_str());
        assert_eq!(all.len(), 3);
    }
}
