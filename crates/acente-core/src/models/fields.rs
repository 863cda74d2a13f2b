//! Structured fields recovered from a policy document.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Best-effort values used to pre-fill a sale/policy form.
///
/// Every field is independently optional: `None` means the corresponding
/// rule did not match, never that extraction failed. The record always
/// serializes with all four keys present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    /// Policy or reference number (may be a customer number, see
    /// [`crate::extraction::PolicyNumberSource`]).
    pub policy_number: Option<String>,

    /// Premium / payable amount.
    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub amount: Option<Decimal>,

    /// Insured party or company title.
    pub customer_name: Option<String>,

    /// Vehicle plate number, e.g. `34 ABC 123`.
    pub plate_number: Option<String>,
}

impl ExtractedFields {
    /// Names of the fields that could not be extracted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.policy_number.is_none() {
            missing.push("policyNumber");
        }
        if self.amount.is_none() {
            missing.push("amount");
        }
        if self.customer_name.is_none() {
            missing.push("customerName");
        }
        if self.plate_number.is_none() {
            missing.push("plateNumber");
        }
        missing
    }

    /// Check if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.missing_fields().len() == 4
    }
}
