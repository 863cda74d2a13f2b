//! Document field extractor combining the normalization step and the rules.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use super::normalization::normalize;
use super::rules::{
    AmountExtractor, CustomerNameExtractor, CustomerNumberExtractor, FieldExtractor,
    PlateExtractor, PolicyNumberExtractor,
};
use super::FieldSetParser;
use crate::models::config::ExtractionConfig;
use crate::models::fields::ExtractedFields;

/// Where the policy number came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyNumberSource {
    /// A "Poliçe No" / "Ref No" label.
    PolicyLabel,
    /// A "Müşteri No" label. This is a customer identifier standing in for
    /// a missing policy number, not the same kind of data.
    CustomerNumberFallback,
}

/// Result of field extraction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted field record.
    pub fields: ExtractedFields,
    /// Provenance of `fields.policy_number`.
    pub policy_number_source: Option<PolicyNumberSource>,
    /// Text the rules were evaluated against.
    pub normalized_text: String,
    /// Per-field confidence for the fields that were found.
    pub field_confidence: BTreeMap<&'static str, f32>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Extracts policy, amount, customer and plate fields from OCR text.
pub struct DocumentFieldExtractor {
    /// Whether a "Müşteri No" value may stand in for the policy number.
    customer_number_fallback: bool,
}

impl DocumentFieldExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self {
            customer_number_fallback: true,
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_customer_number_fallback(config.customer_number_fallback)
    }

    /// Set whether the customer number fallback is used.
    pub fn with_customer_number_fallback(mut self, enabled: bool) -> Self {
        self.customer_number_fallback = enabled;
        self
    }
}

impl Default for DocumentFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldSetParser for DocumentFieldExtractor {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let normalized = normalize(text);
        let text = normalized.as_str();
        let mut warnings = Vec::new();
        let mut field_confidence = BTreeMap::new();

        info!("Extracting fields from {} characters of text", text.len());

        let mut fields = ExtractedFields::default();
        let mut policy_number_source = None;

        if let Some(m) = PolicyNumberExtractor::new().extract(text) {
            field_confidence.insert("policyNumber", m.confidence);
            fields.policy_number = Some(m.value);
            policy_number_source = Some(PolicyNumberSource::PolicyLabel);
        } else if self.customer_number_fallback {
            if let Some(m) = CustomerNumberExtractor::new().extract(text) {
                warnings.push(format!(
                    "No policy number label found, using customer number {} instead",
                    m.value
                ));
                field_confidence.insert("policyNumber", m.confidence);
                fields.policy_number = Some(m.value);
                policy_number_source = Some(PolicyNumberSource::CustomerNumberFallback);
            }
        }

        let amounts = AmountExtractor::new();
        if let Some(m) = amounts.extract(text) {
            field_confidence.insert("amount", m.confidence);
            fields.amount = Some(m.value);
        } else {
            let ignored = amounts.extract_all(text).len();
            if ignored > 0 {
                warnings.push(format!(
                    "Amount label matched but its number could not be parsed, {} lower-priority amount(s) ignored",
                    ignored
                ));
            }
        }

        if let Some(m) = CustomerNameExtractor::new().extract(text) {
            field_confidence.insert("customerName", m.confidence);
            fields.customer_name = Some(m.value);
        }

        if let Some(m) = PlateExtractor::new().extract(text) {
            field_confidence.insert("plateNumber", m.confidence);
            fields.plate_number = Some(m.value);
        }

        for missing in fields.missing_fields() {
            warnings.push(format!("Could not extract {}", missing));
        }

        debug!(
            "Extracted {} of 4 fields ({} warnings)",
            field_confidence.len(),
            warnings.len()
        );

        ExtractionResult {
            fields,
            policy_number_source,
            normalized_text: normalized.into_string(),
            field_confidence,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Extract the field record with default settings.
pub fn extract_fields(text: &str) -> ExtractedFields {
    DocumentFieldExtractor::new().parse_fields(text)
}
