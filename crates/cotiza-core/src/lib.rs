//! Core library for turning vendor quotation PDFs into purchase orders.
//!
//! This crate provides:
//! - PDF text extraction (pdf-extract with a lopdf fallback)
//! - Quotation field extraction (client, RUT, header, totals, line items)
//! - Chilean number formatting
//! - Purchase-order assembly from an extracted quotation

pub mod error;
pub mod format;
pub mod models;
pub mod order;
pub mod pdf;
pub mod quotation;

pub use error::{CotizaError, OrderError, PdfError, Result};
pub use models::config::{BuyerProfile, CotizaConfig, OrderConfig, PartyProfile, PriceColumns};
pub use models::quotation::{
    display_field, LineItem, PriceColumn, QuotationRecord, Totals, NOT_FOUND,
};
pub use order::{OrderRow, OrderTotals, PurchaseOrder};
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor, TextBackend};
pub use quotation::rules::{LineItemSelection, RowPattern};
pub use quotation::{ExtractionResult, QuotationExtractor, QuotationParser, RuleQuotationParser};
