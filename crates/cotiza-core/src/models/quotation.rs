//! Quotation data extracted from a vendor quotation PDF.

use serde::{Deserialize, Serialize};

/// Display value for a field the extractors could not locate.
pub const NOT_FOUND: &str = "No encontrado";

/// Render an optional extracted field, substituting [`NOT_FOUND`].
pub fn display_field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_FOUND)
}

/// Everything extracted from one quotation document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationRecord {
    /// Client name ("Señor/es").
    pub client_name: Option<String>,

    /// Client tax ID (RUT), as printed.
    pub client_tax_id: Option<String>,

    /// Client street address from the "Datos Cliente" block.
    pub client_address: Option<String>,

    /// Client commune.
    pub client_commune: Option<String>,

    /// Quotation number (digits after "N°").
    pub quotation_number: Option<String>,

    /// Quotation date, raw `DD.MM.YYYY`.
    pub date: Option<String>,

    /// Salesperson who issued the quotation.
    pub salesperson: Option<String>,

    /// Totals block; `None` unless all five values were found together.
    pub totals: Option<Totals>,

    /// Product rows in source order.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

/// The five-value totals block, raw source formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// "TOTAL AFECTO".
    pub total_affected: String,
    /// "DESCUENTO".
    pub discount: String,
    /// "SUBTOTAL".
    pub subtotal: String,
    /// "IVA".
    pub tax: String,
    /// Final "TOTAL".
    pub total_final: String,
}

/// A single product row of the quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub position: String,
    pub material_code: String,
    pub description: String,
    pub quantity: String,
    pub unit: String,
    pub unit_price_original: String,
    pub unit_price_discounted: String,
    pub line_value_discounted: String,
    pub line_total: String,
}

/// One of the four numeric price columns of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceColumn {
    UnitPriceOriginal,
    UnitPriceDiscounted,
    LineValueDiscounted,
    LineTotal,
}

impl LineItem {
    /// Raw value of the given price column.
    pub fn price(&self, column: PriceColumn) -> &str {
        match column {
            PriceColumn::UnitPriceOriginal => &self.unit_price_original,
            PriceColumn::UnitPriceDiscounted => &self.unit_price_discounted,
            PriceColumn::LineValueDiscounted => &self.line_value_discounted,
            PriceColumn::LineTotal => &self.line_total,
        }
    }
}

impl QuotationRecord {
    /// Names of the scalar fields that were not found.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields: [(&'static str, bool); 8] = [
            ("client_name", self.client_name.is_none()),
            ("client_tax_id", self.client_tax_id.is_none()),
            ("client_address", self.client_address.is_none()),
            ("client_commune", self.client_commune.is_none()),
            ("quotation_number", self.quotation_number.is_none()),
            ("date", self.date.is_none()),
            ("salesperson", self.salesperson.is_none()),
            ("totals", self.totals.is_none()),
        ];
        fields
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(name, _)| name)
            .collect()
    }

    /// The five totals as display strings, all sentinel when the block is missing.
    pub fn totals_display(&self) -> [&str; 5] {
        match &self.totals {
            Some(t) => [
                t.total_affected.as_str(),
                t.discount.as_str(),
                t.subtotal.as_str(),
                t.tax.as_str(),
                t.total_final.as_str(),
            ],
            None => [NOT_FOUND; 5],
        }
    }
}
