//! Quotation header fields: salesperson, date and quotation number.

use lazy_static::lazy_static;

use super::patterns::{QUOTATION_DATE, QUOTATION_NUMBER, SALESPERSON};
use super::{FieldExtractor, LabeledField};

lazy_static! {
    pub static ref SALESPERSON_FIELD: LabeledField =
        LabeledField::new("salesperson", &SALESPERSON);
    pub static ref DATE_FIELD: LabeledField = LabeledField::new("date", &QUOTATION_DATE);
    pub static ref QUOTATION_NUMBER_FIELD: LabeledField =
        LabeledField::new("quotation_number", &QUOTATION_NUMBER);
}

/// Salesperson following "Vendedor:", up to the end of the line.
pub fn extract_salesperson(text: &str) -> Option<String> {
    SALESPERSON_FIELD.extract(text).map(|m| m.value)
}

/// Date following "Fecha:", only in `DD.MM.YYYY` form and kept verbatim.
pub fn extract_date(text: &str) -> Option<String> {
    DATE_FIELD.extract(text).map(|m| m.value)
}

/// Digits following the "N°" marker.
pub fn extract_quotation_number(text: &str) -> Option<String> {
    QUOTATION_NUMBER_FIELD.extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_salesperson() {
        let text = "Vendedor:   MARIA JOSE PEREZ\r\nFecha: 03.02.2025";
        assert_eq!(extract_salesperson(text), Some("MARIA JOSE PEREZ".to_string()));
        assert_eq!(extract_salesperson("Vendedora Maria"), None);
    }

    #[test]
    fn test_extract_date_exact_shape() {
        assert_eq!(
            extract_date("FECHA: 03.02.2025 Validez: 10 días"),
            Some("03.02.2025".to_string())
        );
        assert_eq!(extract_date("Fecha: 3.2.2025"), None);
        assert_eq!(extract_date("Fecha: 03/02/2025"), None);
        assert_eq!(extract_date("Fecha: 2025.02.03"), None);
    }

    #[test]
    fn test_extract_quotation_number() {
        assert_eq!(
            extract_quotation_number("COTIZACION N° 0021458877"),
            Some("0021458877".to_string())
        );
        assert_eq!(extract_quotation_number("Cotización Nº 42"), Some("42".to_string()));
        assert_eq!(extract_quotation_number("N° pendiente"), None);
    }

    #[test]
    fn test_first_match_wins() {
        let text = "N° 100\nN° 200";
        assert_eq!(extract_quotation_number(text), Some("100".to_string()));
    }
}
