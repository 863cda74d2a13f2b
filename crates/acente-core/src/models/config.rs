//! Configuration structures for extraction and forecasting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AcenteError;

/// Main configuration for acente.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AcenteConfig {
    /// Document field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Sales forecasting configuration.
    pub forecast: ForecastConfig,
}

/// Document field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Accept a "Müşteri No" value as the policy number when no policy/ref
    /// label is present. The result is flagged as a customer-number fallback.
    pub customer_number_fallback: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            customer_number_fallback: true,
        }
    }
}

/// Trend forecaster configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Months of history before the current month.
    pub history_months: u32,

    /// Average growth ratio is clamped to `[-growth_clamp, growth_clamp]`.
    pub growth_clamp: Decimal,

    /// Growth intervals needed for a HIGH confidence label.
    pub high_confidence_min_intervals: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            history_months: 6,
            growth_clamp: Decimal::new(5, 1),
            high_confidence_min_intervals: 4,
        }
    }
}

impl AcenteConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| AcenteError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AcenteConfig =
            serde_json::from_str(r#"{"forecast": {"history_months": 12}}"#).unwrap();

        assert_eq!(config.forecast.history_months, 12);
        assert_eq!(config.forecast.growth_clamp, Decimal::new(5, 1));
        assert_eq!(config.forecast.high_confidence_min_intervals, 4);
        assert!(config.extraction.customer_number_fallback);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AcenteConfig::default();
        config.extraction.customer_number_fallback = false;
        config.save(&path).unwrap();

        let loaded = AcenteConfig::from_file(&path).unwrap();
        assert!(!loaded.extraction.customer_number_fallback);
        assert_eq!(loaded.forecast.history_months, 6);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(AcenteConfig::from_file(&path), Err(AcenteError::Config(_))));
        assert!(matches!(
            AcenteConfig::from_file(&dir.path().join("missing.json")),
            Err(AcenteError::Io(_))
        ));
    }
}
