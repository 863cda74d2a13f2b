//! Core library for the insurance agency CRM.
//!
//! This crate provides:
//! - Document text loading (plain text and text-layer PDFs)
//! - Turkish OCR text normalization
//! - Policy document field extraction (policy number, amount, customer, plate)
//! - Sales trend forecasting and target progress over a pluggable ledger

pub mod document;
pub mod error;
pub mod extraction;
pub mod forecast;
pub mod models;

pub use error::{AcenteError, Result};
pub use extraction::{
    extract_fields, normalize, DocumentFieldExtractor, ExtractionResult, FieldSetParser,
    NormalizedText, PolicyNumberSource,
};
pub use forecast::{InMemoryLedger, SalesLedger, TrendForecaster};
pub use models::fields::ExtractedFields;
pub use models::forecast::{Confidence, ForecastResult, MonthlyAggregate, TargetProgress};
pub use models::sales::{Period, SaleRecord, SaleStatus, SalesTarget, Scope};
