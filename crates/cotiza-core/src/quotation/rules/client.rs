//! Client block extraction: name, RUT, address and commune.

use lazy_static::lazy_static;

use super::patterns::{CLIENT_ADDRESS, CLIENT_COMMUNE, CLIENT_NAME, CLIENT_RUT};
use super::{FieldExtractor, LabeledField};

lazy_static! {
    pub static ref CLIENT_NAME_FIELD: LabeledField =
        LabeledField::new("client_name", &CLIENT_NAME);
    pub static ref CLIENT_RUT_FIELD: LabeledField =
        LabeledField::new("client_tax_id", &CLIENT_RUT);
    pub static ref CLIENT_ADDRESS_FIELD: LabeledField =
        LabeledField::new("client_address", &CLIENT_ADDRESS);
    pub static ref CLIENT_COMMUNE_FIELD: LabeledField =
        LabeledField::new("client_commune", &CLIENT_COMMUNE);
}

/// Client name following "Señor:" / "Señores:".
pub fn extract_client_name(text: &str) -> Option<String> {
    CLIENT_NAME_FIELD.extract(text).map(|m| m.value)
}

/// Address following "Dirección:" inside the "Datos Cliente" block.
pub fn extract_address(text: &str) -> Option<String> {
    CLIENT_ADDRESS_FIELD.extract(text).map(|m| m.value)
}

/// Commune following "Comuna:" (letters and spaces only).
pub fn extract_commune(text: &str) -> Option<String> {
    CLIENT_COMMUNE_FIELD.extract(text).map(|m| m.value)
}

/// RUT following "R.U.T", dotted (`12.345.678-9`) or plain (`12345678-9`).
///
/// Kept exactly as printed; the check digit is not verified here.
pub fn extract_rut(text: &str) -> Option<String> {
    CLIENT_RUT_FIELD.extract(text).map(|m| m.value)
}

/// Validate a RUT check digit (modulo 11, weights 2..=7 from the right).
pub fn validate_rut(rut: &str) -> bool {
    let cleaned: Vec<char> = rut
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let Some((&check, body)) = cleaned.split_last() else {
        return false;
    };
    if body.len() < 7 || !body.iter().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = body
        .iter()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .zip([2, 3, 4, 5, 6, 7].iter().cycle())
        .map(|(d, w)| d * w)
        .sum();

    let expected = match 11 - (sum % 11) {
        11 => '0',
        10 => 'K',
        n => char::from_digit(n, 10).unwrap_or('?'),
    };

    check == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_client_name() {
        let text = "Señor: ACME SPA\nDirección: Calle 123";
        assert_eq!(extract_client_name(text), Some("ACME SPA".to_string()));
    }

    #[test]
    fn test_client_name_stops_at_labels() {
        let text = "SEÑORES:   CONSTRUCTORA SUR LTDA R.U.T: 76.123.456-0";
        assert_eq!(
            extract_client_name(text),
            Some("CONSTRUCTORA SUR LTDA".to_string())
        );

        let text = "Señores: FERRETERIA NORTE Dirección: Av. Uno 1";
        assert_eq!(extract_client_name(text), Some("FERRETERIA NORTE".to_string()));
    }

    #[test]
    fn test_client_name_missing() {
        assert_eq!(extract_client_name("Cliente: nadie"), None);
        assert_eq!(extract_client_name("Señor: SIN FIN DE LINEA"), None);
    }

    #[test]
    fn test_extract_rut_formats() {
        assert_eq!(
            extract_rut("R.U.T: 12.345.678-9"),
            Some("12.345.678-9".to_string())
        );
        assert_eq!(extract_rut("r.u.t 7654321-k"), Some("7654321-k".to_string()));
        assert_eq!(extract_rut("R.U.T:   76568660-1"), Some("76568660-1".to_string()));
        assert_eq!(extract_rut("RUT 12.345.678-9"), None);
    }

    #[test]
    fn test_first_rut_is_kept_even_if_invalid() {
        let text = "R.U.T: 12.345.678-9\nR.U.T: 12.345.678-5";
        assert_eq!(CLIENT_RUT_FIELD.extract_all(text).len(), 2);
        assert_eq!(extract_rut(text), Some("12.345.678-9".to_string()));
    }

    #[test]
    fn test_empty_client_label_does_not_borrow_later_block() {
        let text = "Señor:\nDirección: Calle 1\nDatos Proveedor\nSeñores: OTRA EMPRESA SPA\n";
        assert_eq!(extract_client_name(text), None);
        assert_eq!(CLIENT_NAME_FIELD.extract_all(text).len(), 1);
    }

    #[test]
    fn test_validate_rut() {
        assert!(validate_rut("12.345.678-5"));
        assert!(validate_rut("76.568.660-1"));
        assert!(validate_rut("123456785"));
        assert!(!validate_rut("12.345.678-9"));
        assert!(!validate_rut("1-9"));
        assert!(!validate_rut(""));
    }

    #[test]
    fn test_extract_address() {
        let text = "Datos Cliente\nSeñores: ACME SPA\nDirección: Los Aromos 455 Actividad: Comercio";
        assert_eq!(extract_address(text), Some("Los Aromos 455".to_string()));

        // Without the section marker the address is not trusted
        assert_eq!(extract_address("Dirección: Los Aromos 455\n"), None);
    }

    #[test]
    fn test_extract_commune() {
        let text = "Comuna: ÑUÑOA\nVendedor: Pedro";
        assert_eq!(extract_commune(text), Some("ÑUÑOA".to_string()));

        let text = "comuna:  Estación Central  Ciudad: Santiago";
        assert_eq!(extract_commune(text), Some("Estación Central  Ciudad".to_string()));

        assert_eq!(extract_commune("Comuna: 1234"), None);
    }
}
