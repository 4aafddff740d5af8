//! Quotation field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, QuotationParser, RuleQuotationParser};

use crate::error::CotizaError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, CotizaError>;

/// Trait for end-to-end quotation extraction.
pub trait QuotationExtractor {
    /// Extract a quotation from PDF bytes.
    fn extract_from_pdf(&self, data: &[u8]) -> Result<ExtractionResult>;

    /// Extract a quotation from already-extracted text.
    fn extract_from_text(&self, text: &str) -> Result<ExtractionResult>;
}
