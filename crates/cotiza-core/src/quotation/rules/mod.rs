//! Rule-based field extractors for quotation text.

pub mod client;
pub mod header;
pub mod line_items;
pub mod patterns;
pub mod totals;

pub use client::{extract_address, extract_client_name, extract_commune, extract_rut, validate_rut};
pub use header::{extract_date, extract_quotation_number, extract_salesperson};
pub use line_items::{extract_line_items, product_region, LineItemSelection, RowPattern};
pub use totals::extract_totals;

use regex::Regex;
use tracing::trace;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched field value with its location in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span of the whole match in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// A labelled field: a pattern whose first capture group is the value.
///
/// The value is trimmed. `extract` only looks at the leftmost match: when
/// its capture trims to nothing the field is missing, even if a later match
/// (possibly from another party's block) has a value.
pub struct LabeledField {
    name: &'static str,
    pattern: &'static Regex,
}

impl LabeledField {
    pub fn new(name: &'static str, pattern: &'static Regex) -> Self {
        Self { name, pattern }
    }

    fn to_match(&self, caps: &regex::Captures<'_>) -> Option<ExtractionMatch<String>> {
        let full_match = caps.get(0)?;
        let value = caps.get(1)?.as_str().trim();
        if value.is_empty() {
            trace!("{}: label at byte {} has no value", self.name, full_match.start());
            return None;
        }
        Some(
            ExtractionMatch::new(value.to_string(), full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

impl FieldExtractor for LabeledField {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = self.pattern.captures(text)?;
        self.to_match(&caps)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| self.to_match(&caps))
            .collect()
    }
}
