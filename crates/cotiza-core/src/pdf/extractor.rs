//! PDF text extraction using lopdf and pdf-extract.

use std::fmt::Display;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result, TextBackend, PAGE_SEPARATOR};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text extractor.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    backend: TextBackend,
    separator: String,
    max_pages: usize,
}

/// Extracted content from a PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfContent {
    /// Text of every text-bearing page, each followed by the separator.
    pub text: String,
    /// Pages with their content, including pages without text.
    pub pages: Vec<PdfPage>,
}

impl PdfContent {
    /// Number of pages that contributed text (and therefore a separator).
    pub fn text_page_count(&self) -> usize {
        self.pages.iter().filter(|p| has_text(&p.text)).count()
    }
}

/// Content from a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor with the default backend and separator.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            backend: TextBackend::default(),
            separator: PAGE_SEPARATOR.to_string(),
            max_pages: 0,
        }
    }

    /// Create an extractor configured from the `pdf` config section.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self::new()
            .with_backend(config.backend)
            .with_separator(config.page_separator.clone())
            .with_max_pages(config.max_pages)
    }

    /// Set the text backend.
    pub fn with_backend(mut self, backend: TextBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the marker appended after each text-bearing page.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Limit the number of pages read (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Extract the text of all pages, keeping the per-page breakdown.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let page_texts = self.page_texts()?;

        let mut content = PdfContent::default();
        for (idx, page_text) in page_texts.into_iter().enumerate() {
            if has_text(&page_text) {
                content.text.push_str(&page_text);
                content.text.push_str(&self.separator);
            } else {
                trace!("Page {} has no extractable text", idx + 1);
            }
            content.pages.push(PdfPage {
                number: idx as u32 + 1,
                text: page_text,
            });
        }

        debug!(
            "PDF text: {} pages, {} with text, {} chars",
            content.pages.len(),
            content.text_page_count(),
            content.text.len()
        );

        Ok(content)
    }

    fn pages_to_read(&self) -> usize {
        let count = self.page_count() as usize;
        if self.max_pages > 0 {
            count.min(self.max_pages)
        } else {
            count
        }
    }

    fn page_texts(&self) -> Result<Vec<String>> {
        let doc = self.document.as_ref().ok_or(PdfError::NotLoaded)?;
        let count = self.pages_to_read();
        if count == 0 {
            return Ok(Vec::new());
        }

        match self.backend {
            TextBackend::Lopdf => Ok(lopdf_page_texts(doc, count)),
            TextBackend::PdfExtract => {
                let data = &self.raw_data;
                let extracted = catch_unwind(AssertUnwindSafe(|| {
                    pdf_extract::extract_text_from_mem_by_pages(data)
                }));
                Ok(pages_or_lopdf(extracted, doc, count))
            }
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc =
            Document::load_mem(data).map_err(|e| PdfError::MalformedDocument(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the bytes again, so hand it the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data).map_err(|e| {
                PdfError::MalformedDocument(format!("failed to save decrypted PDF: {}", e))
            })?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        debug!("Loaded PDF with {} pages", doc.get_pages().len());
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        self.extract_all().map(|content| content.text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document.as_ref().ok_or(PdfError::NotLoaded)?;
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }
        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

/// Extract the text of a PDF held in memory.
///
/// An empty (zero-page) document yields an empty string.
pub fn extract_text_from_bytes(data: &[u8], config: &PdfConfig) -> Result<String> {
    let mut extractor = PdfExtractor::from_config(config);
    extractor.load(data)?;
    extractor.extract_text()
}

/// Pages from pdf-extract, or lopdf's text when pdf-extract failed or panicked.
fn pages_or_lopdf<E: Display>(
    extracted: thread::Result<std::result::Result<Vec<String>, E>>,
    doc: &Document,
    count: usize,
) -> Vec<String> {
    match extracted {
        Ok(Ok(mut pages)) => {
            pages.truncate(count);
            pages
        }
        Ok(Err(e)) => {
            warn!("pdf-extract failed ({}), falling back to lopdf", e);
            lopdf_page_texts(doc, count)
        }
        Err(_) => {
            warn!("pdf-extract panicked, falling back to lopdf");
            lopdf_page_texts(doc, count)
        }
    }
}

fn lopdf_page_texts(doc: &Document, count: usize) -> Vec<String> {
    doc.get_pages()
        .keys()
        .take(count)
        .map(|&number| match doc.extract_text(&[number]) {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not extract text from page {}: {}", number, e);
                String::new()
            }
        })
        .collect()
}

fn has_text(text: &str) -> bool {
    !text.trim().is_empty()
}
