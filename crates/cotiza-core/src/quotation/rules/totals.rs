//! Totals-block extraction.
//!
//! Quotations print the five total labels as one block and their values as
//! a second block in the same order, so the values are only trusted when the
//! whole block is found.

use super::patterns::TOTALS_BLOCK;
use crate::models::quotation::Totals;

/// Extract the totals block. All five values or nothing.
pub fn extract_totals(text: &str) -> Option<Totals> {
    let caps = TOTALS_BLOCK.captures(text)?;
    let value = |i: usize| caps[i].trim().to_string();

    Some(Totals {
        total_affected: value(1),
        discount: value(2),
        subtotal: value(3),
        tax: value(4),
        total_final: value(5),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_totals_block_with_line_breaks() {
        let text = "TOTAL AFECTO:\nDESCUENTO:\nSUBTOTAL:\nIVA:\nTOTAL :\n1000\n50\n950\n180\n1130";
        assert_eq!(
            extract_totals(text),
            Some(Totals {
                total_affected: "1000".to_string(),
                discount: "50".to_string(),
                subtotal: "950".to_string(),
                tax: "180".to_string(),
                total_final: "1130".to_string(),
            })
        );
    }

    #[test]
    fn test_totals_keep_source_formatting() {
        let text = "Total afecto: Descuento: Subtotal: IVA: Total: 85,140.00 0.00 85,140.00 16,176.60 101,316.60\nDESPACHO: retiro";
        let totals = extract_totals(text).unwrap();
        assert_eq!(totals.total_affected, "85,140.00");
        assert_eq!(totals.tax, "16,176.60");
        assert_eq!(totals.total_final, "101,316.60");
    }

    #[test]
    fn test_partial_block_is_rejected() {
        // Labels out of order
        let text = "TOTAL AFECTO:\nSUBTOTAL:\nDESCUENTO:\nIVA:\nTOTAL :\n1\n2\n3\n4\n5";
        assert_eq!(extract_totals(text), None);

        // Only four values
        let text = "TOTAL AFECTO:\nDESCUENTO:\nSUBTOTAL:\nIVA:\nTOTAL :\n1000\n50\n950\n180\nGracias";
        assert_eq!(extract_totals(text), None);

        // Labels interleaved with values
        let text = "TOTAL AFECTO: 1000\nDESCUENTO: 50\nSUBTOTAL: 950\nIVA: 180\nTOTAL : 1130";
        assert_eq!(extract_totals(text), None);
    }

    #[test]
    fn test_all_or_nothing_over_samples() {
        let samples = [
            "",
            "TOTAL AFECTO:",
            "IVA: 19%",
            "TOTAL AFECTO:\nDESCUENTO:\nSUBTOTAL:\nIVA:\nTOTAL :\n1\n2\n3\n4\n5",
            "TOTAL AFECTO: DESCUENTO: SUBTOTAL: IVA: TOTAL : 1 2 3",
        ];
        for sample in samples {
            if let Some(t) = extract_totals(sample) {
                for v in [&t.total_affected, &t.discount, &t.subtotal, &t.tax, &t.total_final] {
                    assert!(!v.is_empty());
                }
            }
        }
    }
}
