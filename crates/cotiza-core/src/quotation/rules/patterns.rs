//! Common regex patterns for quotation extraction.
//!
//! The `regex` crate has no look-around, so where a value runs "up to" a
//! following label the label is matched (and consumed) outside the capture
//! group instead.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Client block
    pub static ref CLIENT_NAME: Regex = Regex::new(
        r"(?is)Señor(?:es)?:\s*(.*?)(?:\n|Dirección|R\.U\.T)"
    ).unwrap();

    pub static ref CLIENT_RUT: Regex = Regex::new(
        r"(?i)R\.U\.T[:\s]+(\d{1,2}\.\d{3}\.\d{3}-[\dk]|\d{7,8}-[\dk])"
    ).unwrap();

    pub static ref CLIENT_ADDRESS: Regex = Regex::new(
        r"(?is)Datos\s+Cliente.*?Dirección:\s*(.*?)(?:\n|Actividad)"
    ).unwrap();

    pub static ref CLIENT_COMMUNE: Regex = Regex::new(
        r"(?i)Comuna:\s*([A-ZÁÉÍÓÚÜÑa-záéíóúüñ \t]+)"
    ).unwrap();

    // Quotation header
    pub static ref SALESPERSON: Regex = Regex::new(
        r"(?i)Vendedor:\s*([^\n]+)"
    ).unwrap();

    pub static ref QUOTATION_DATE: Regex = Regex::new(
        r"(?i)Fecha:\s*(\d{2}\.\d{2}\.\d{4})"
    ).unwrap();

    pub static ref QUOTATION_NUMBER: Regex = Regex::new(
        r"(?i)N[°º]\s*(\d+)"
    ).unwrap();

    // Totals block: five labels, then five numbers in the same order
    pub static ref TOTALS_BLOCK: Regex = Regex::new(
        r"(?is)TOTAL\s+AFECTO:\s*DESCUENTO:\s*SUBTOTAL:\s*IVA:\s*TOTAL\s*:\s*(\d[\d.,]*)\s+(\d[\d.,]*)\s+(\d[\d.,]*)\s+(\d[\d.,]*)\s+(\d[\d.,]*)"
    ).unwrap();

    // Product table boundaries
    pub static ref PRODUCT_TABLE_HEADER: Regex = Regex::new(
        r"(?i)Pos\s*Material\s*Descripci[óo]n"
    ).unwrap();

    pub static ref PRODUCT_TABLE_END: Regex = Regex::new(
        r"(?i)TOTAL\s+AFECTO|DESPACHO:"
    ).unwrap();

    // Product rows, strictest first. Groups: position, material, description,
    // quantity, unit, unit price, discounted unit price, discounted value, total.
    pub static ref ROW_FIXED_UNITS: Regex = Regex::new(
        r"(?i)(\d+)\s+(\d+)\s+([^\n]+?)\s+(\d+)\s+(UN|ROM|KG|MT|M2|M3)\s+([\d.,]+)\s+([\d.,]+)\s+([\d.,]+)\s+([\d.,]+)"
    ).unwrap();

    pub static ref ROW_WORD_UNIT: Regex = Regex::new(
        r"(?i)(\d+)\s+(\d+)\s+(.+?)\s+(\d+)\s+(\w+)\s+([\d.,]+)\s+([\d.,]+)\s+([\d.,]+)\s+([\d.,]+)"
    ).unwrap();

    pub static ref ROW_CURRENCY: Regex = Regex::new(
        r"(?i)(\d+)\s+(\d+)\s+(.+?)\s+(\d+)\s+(\w+)\s+\$?\s*([\d.,]+)\s+\$?\s*([\d.,]+)\s+\$?\s*([\d.,]+)\s+\$?\s*([\d.,]+)"
    ).unwrap();

    pub static ref ROW_SPACED_AMOUNTS: Regex = Regex::new(
        r"(?i)(\d+)\s+(\d+)\s+(.+?)\s+(\d+)\s+((?-i:[A-Z]+))\s+\$?\s*([\d\s.,]+)\s+\$?\s*([\d\s.,]+)\s+\$?\s*([\d\s.,]+)\s+\$?\s*([\d\s.,]+)"
    ).unwrap();
}
