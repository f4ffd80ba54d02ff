//! Error types for the tilbud-core library.

use thiserror::Error;

/// Main error type for the tilbud library.
#[derive(Error, Debug)]
pub enum TilbudError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to the offer store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No market with the given name exists.
    #[error("market not found: {0}")]
    MarketNotFound(String),

    /// A market name is empty or blank.
    #[error("invalid market name: {0:?}")]
    InvalidName(String),

    /// Query parameters are out of range.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The backing file could not be decoded.
    #[error("corrupt store file: {0}")]
    Corrupt(String),

    /// Reading or writing the backing file failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the tilbud library.
pub type Result<T> = std::result::Result<T, TilbudError>;
