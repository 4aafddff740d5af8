//! Error types for the cotiza-core library.

use thiserror::Error;

/// Main error type for the cotiza library.
#[derive(Error, Debug)]
pub enum CotizaError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Purchase-order assembly error.
    #[error("order error: {0}")]
    Order(#[from] OrderError),

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
    /// The byte source could not be parsed as a PDF.
    #[error("malformed PDF document: {0}")]
    MalformedDocument(String),

    /// Failed to extract text from a parsed PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be opened with an empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// No document has been loaded yet.
    #[error("no document loaded")]
    NotLoaded,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to building a purchase order from a quotation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OrderError {
    /// The purchase-order number was empty.
    #[error("purchase order number is required")]
    MissingOrderNumber,

    /// The requested purchasing entity is not configured.
    #[error("unknown purchasing company: {0}")]
    UnknownCompany(String),

    /// The configured issue-date format is not a valid chrono format.
    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),
}

/// Result type for the cotiza library.
pub type Result<T> = std::result::Result<T, CotizaError>;
