//! Configuration structures for the quotation pipeline.

use serde::{Deserialize, Serialize};

use super::quotation::PriceColumn;
use crate::error::{CotizaError, OrderError};
use crate::pdf::{TextBackend, PAGE_SEPARATOR};

/// Main configuration for the cotiza pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CotizaConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Quotation extraction configuration.
    pub extraction: ExtractionConfig,

    /// Purchase-order configuration.
    pub order: OrderConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Library used for page text extraction.
    pub backend: TextBackend,

    /// Marker appended after each text-bearing page.
    pub page_separator: String,

    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            backend: TextBackend::default(),
            page_separator: PAGE_SEPARATOR.to_string(),
            max_pages: 0,
        }
    }
}

/// Quotation extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Warn when the client RUT check digit does not verify.
    pub validate_rut: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { validate_rut: true }
    }
}

/// Identity block of a party printed on the purchase order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyProfile {
    /// Legal name (razón social).
    pub name: String,
    /// Tax ID (RUT).
    pub tax_id: String,
    pub address: String,
    pub commune: String,
    /// Contact person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A purchasing entity that can issue purchase orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuyerProfile {
    /// Short key used to select the company on the command line.
    pub key: String,
    /// Legal name (razón social).
    pub name: String,
    /// Tax ID (RUT).
    pub tax_id: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commune: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Which line-item columns feed the purchase-order price columns.
///
/// Quotation template families disagree on which of the four numeric
/// columns holds the price to pay, so this is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceColumns {
    /// Source of the "Precio Unitario" column.
    pub unit_price: PriceColumn,
    /// Source of the "Precio Total" column.
    pub line_total: PriceColumn,
}

impl Default for PriceColumns {
    fn default() -> Self {
        Self {
            unit_price: PriceColumn::UnitPriceDiscounted,
            line_total: PriceColumn::LineValueDiscounted,
        }
    }
}

/// Purchase-order configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Supplier identity printed in the "DATOS DEL PROVEEDOR" block.
    pub supplier: PartyProfile,

    /// Purchasing entities available for selection.
    pub companies: Vec<BuyerProfile>,

    /// Column mapping for line-item prices.
    pub columns: PriceColumns,

    /// chrono format string for the order issue date.
    pub date_format: String,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            supplier: PartyProfile {
                name: "EASY RETAIL S. A".to_string(),
                tax_id: "76.568.660-1".to_string(),
                address: "JOSE JOAQUIN PRIETO 5531".to_string(),
                commune: "PEDRO AGUIRRE CERDA".to_string(),
                contact: Some("BARBARA MONDACA".to_string()),
                phone: None,
            },
            companies: Vec::new(),
            columns: PriceColumns::default(),
            date_format: "%d-%m-%Y".to_string(),
        }
    }
}

impl OrderConfig {
    /// Look up a purchasing entity by key, ignoring case.
    pub fn company(&self, key: &str) -> Result<&BuyerProfile, OrderError> {
        self.companies
            .iter()
            .find(|c| c.key.eq_ignore_ascii_case(key.trim()))
            .ok_or_else(|| OrderError::UnknownCompany(key.to_string()))
    }
}

impl CotizaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, CotizaError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            CotizaError::Config(format!("{}: {}", path.display(), e))
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), CotizaError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| CotizaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn buyer(key: &str) -> BuyerProfile {
        BuyerProfile {
            key: key.to_string(),
            name: format!("{} LTDA", key.to_uppercase()),
            tax_id: "76.123.456-7".to_string(),
            address: "Av. Siempre Viva 742".to_string(),
            commune: Some("Ñuñoa".to_string()),
            city: Some("Santiago".to_string()),
            phone: None,
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CotizaConfig =
            serde_json::from_str(r#"{"pdf": {"backend": "lopdf"}}"#).unwrap();
        assert_eq!(config.pdf.backend, TextBackend::Lopdf);
        assert_eq!(config.pdf.page_separator, PAGE_SEPARATOR);
        assert!(config.extraction.validate_rut);
        assert_eq!(config.order.date_format, "%d-%m-%Y");
        assert_eq!(config.order.columns, PriceColumns::default());
    }

    #[test]
    fn test_company_lookup_ignores_case() {
        let mut order = OrderConfig::default();
        order.companies = vec![buyer("norte"), buyer("sur")];

        assert_eq!(order.company("SUR").unwrap().key, "sur");
        assert_eq!(
            order.company("este"),
            Err(OrderError::UnknownCompany("este".to_string()))
        );
    }

    #[test]
    fn test_columns_roundtrip_names() {
        let json = serde_json::to_value(PriceColumns::default()).unwrap();
        assert_eq!(json["unit_price"], "unit_price_discounted");
        assert_eq!(json["line_total"], "line_value_discounted");
    }
}
