//! Rule-based quotation parser.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::models::config::{CotizaConfig, PdfConfig};
use crate::models::quotation::QuotationRecord;
use crate::pdf::extract_text_from_bytes;

use super::rules::{
    client::{extract_address, extract_client_name, extract_commune, extract_rut},
    extract_line_items,
    header::{extract_date, extract_quotation_number, extract_salesperson},
    validate_rut, RowPattern,
};
use super::rules::totals::extract_totals;
use super::{QuotationExtractor, Result};

/// Result of quotation extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted quotation data.
    pub record: QuotationRecord,
    /// Raw extracted text.
    pub raw_text: String,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Row pattern that produced the line items.
    pub selected_pattern: Option<RowPattern>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for quotation parsing.
pub trait QuotationParser {
    /// Parse a quotation from text. Missing fields degrade to warnings.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Quotation parser built from the field, totals and line-item rules.
pub struct RuleQuotationParser {
    /// Whether to check the client RUT check digit.
    validate_rut: bool,
    /// Text extraction settings for PDF input.
    pdf: PdfConfig,
}

impl RuleQuotationParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            validate_rut: true,
            pdf: PdfConfig::default(),
        }
    }

    /// Create a parser from the loaded configuration.
    pub fn from_config(config: &CotizaConfig) -> Self {
        Self {
            validate_rut: config.extraction.validate_rut,
            pdf: config.pdf.clone(),
        }
    }

    /// Set RUT validation.
    pub fn with_rut_validation(mut self, validate: bool) -> Self {
        self.validate_rut = validate;
        self
    }

    /// Set PDF text extraction settings.
    pub fn with_pdf_config(mut self, pdf: PdfConfig) -> Self {
        self.pdf = pdf;
        self
    }
}

impl Default for RuleQuotationParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QuotationParser for RuleQuotationParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing quotation from {} characters of text", text.len());

        // The RUT is kept as printed; validation only warns
        let client_tax_id = extract_rut(text);
        if self.validate_rut {
            if let Some(rut) = &client_tax_id {
                if !validate_rut(rut) {
                    warnings.push(format!("Client RUT {} has an invalid check digit", rut));
                }
            }
        }

        let selection = extract_line_items(text);
        if selection.items.is_empty() {
            warnings.push("Could not extract line items".to_string());
        }

        let record = QuotationRecord {
            client_name: extract_client_name(text),
            client_tax_id,
            client_address: extract_address(text),
            client_commune: extract_commune(text),
            quotation_number: extract_quotation_number(text),
            date: extract_date(text),
            salesperson: extract_salesperson(text),
            totals: extract_totals(text),
            line_items: selection.items,
        };

        for field in record.missing_fields() {
            if field == "totals" {
                warnings.push("Could not extract totals block".to_string());
            } else {
                warnings.push(format!("Could not extract {}", field));
            }
        }

        debug!(
            "Extracted quotation {} with {} line items ({} warnings)",
            record.quotation_number.as_deref().unwrap_or("?"),
            record.line_items.len(),
            warnings.len()
        );

        ExtractionResult {
            record,
            raw_text: text.to_string(),
            warnings,
            selected_pattern: selection.pattern,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl QuotationExtractor for RuleQuotationParser {
    fn extract_from_pdf(&self, data: &[u8]) -> Result<ExtractionResult> {
        let start = Instant::now();
        let text = extract_text_from_bytes(data, &self.pdf)?;

        let mut result = self.parse(&text);
        if text.trim().is_empty() {
            warn!("PDF contains no extractable text");
            result
                .warnings
                .insert(0, "PDF contains no extractable text".to_string());
        }
        result.processing_time_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }

    fn extract_from_text(&self, text: &str) -> Result<ExtractionResult> {
        Ok(self.parse(text))
    }
}
