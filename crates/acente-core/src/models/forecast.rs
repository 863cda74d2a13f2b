//! Forecast and target progress results.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Total ACTIVE sales for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// First day of the month.
    pub month: NaiveDate,
    /// Sum of sale amounts in the month.
    pub total: Decimal,
}

/// How much history backed a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "HIGH"),
            Confidence::Medium => write!(f, "MEDIUM"),
        }
    }
}

/// One-month-ahead sales forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub forecasted_amount: Decimal,
    pub confidence: Confidence,
    /// Applied growth, in whole percent.
    pub growth_rate: i64,
}

/// Achieved sales against the configured target for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetProgress {
    #[serde(with = "rust_decimal::serde::float")]
    pub target: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub achieved: Decimal,
    /// Whole percent; 0 when no target is configured.
    pub percentage: i64,
}
