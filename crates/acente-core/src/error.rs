//! Error types for the acente-core library.

use thiserror::Error;

/// Main error type for the acente library.
#[derive(Error, Debug)]
pub enum AcenteError {
    /// Sales ledger error.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Document loading error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by a sales ledger data source.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The backing store could not answer a query.
    #[error("query failed: {0}")]
    Query(String),

    /// The ledger file could not be read or parsed.
    #[error("failed to load ledger: {0}")]
    Load(String),

    /// A sum of amounts does not fit in a `Decimal`.
    #[error("amount overflow while summing {0}")]
    Overflow(&'static str),

    /// Month/year combination does not name a calendar month, or lies at
    /// the edge of the supported calendar.
    #[error("invalid period: {month}/{year}")]
    InvalidPeriod { month: u32, year: i32 },
}

/// Errors related to turning an uploaded file into text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The document carries no text layer; it must go through OCR first.
    #[error("document has no text layer, run it through OCR first")]
    NoTextLayer,

    /// File extension is not handled.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// I/O error while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the acente library.
pub type Result<T> = std::result::Result<T, AcenteError>;
