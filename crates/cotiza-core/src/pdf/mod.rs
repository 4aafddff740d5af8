//! PDF processing module.

mod extractor;

pub use extractor::{extract_text_from_bytes, PdfContent, PdfExtractor, PdfPage};

#[cfg(test)]
pub(crate) use extractor::tests::build_pdf;

use serde::{Deserialize, Serialize};

use crate::error::PdfError;

/// Marker appended after the text of every page that yields text.
pub const PAGE_SEPARATOR: &str = "\n--- Fin de Página ---\n";

/// Library used to pull text out of page content streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBackend {
    /// `pdf-extract`, with a per-document fallback to `lopdf`.
    #[default]
    PdfExtract,
    /// `lopdf`'s own page text extraction.
    Lopdf,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text of every page, joined with the page separator.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}
