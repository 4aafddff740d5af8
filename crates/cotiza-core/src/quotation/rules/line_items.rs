//! Product-table extraction.
//!
//! Quotation templates drift in how they print the product table, so rows
//! are matched against several candidate patterns and the pattern that
//! recognises the most rows wins. Earlier (stricter) patterns keep the win
//! on a tie.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::patterns::{
    PRODUCT_TABLE_END, PRODUCT_TABLE_HEADER, ROW_CURRENCY, ROW_FIXED_UNITS, ROW_SPACED_AMOUNTS,
    ROW_WORD_UNIT,
};
use crate::models::quotation::LineItem;

/// Candidate row layouts, strictest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPattern {
    /// Unit from a fixed vocabulary, single-line description.
    FixedUnits,
    /// Any word token as unit.
    WordUnit,
    /// Any word token as unit, amounts may carry a `$`.
    Currency,
    /// Uppercase unit, amounts may carry a `$` and internal spaces.
    SpacedAmounts,
}

impl RowPattern {
    /// Evaluation order.
    pub const ALL: [RowPattern; 4] = [
        RowPattern::FixedUnits,
        RowPattern::WordUnit,
        RowPattern::Currency,
        RowPattern::SpacedAmounts,
    ];

    pub fn regex(&self) -> &'static Regex {
        match self {
            RowPattern::FixedUnits => &ROW_FIXED_UNITS,
            RowPattern::WordUnit => &ROW_WORD_UNIT,
            RowPattern::Currency => &ROW_CURRENCY,
            RowPattern::SpacedAmounts => &ROW_SPACED_AMOUNTS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RowPattern::FixedUnits => "fixed_units",
            RowPattern::WordUnit => "word_unit",
            RowPattern::Currency => "currency",
            RowPattern::SpacedAmounts => "spaced_amounts",
        }
    }
}

impl std::fmt::Display for RowPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Line items together with the pattern that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItemSelection {
    /// Winning pattern, `None` when no pattern matched any row.
    pub pattern: Option<RowPattern>,
    /// Items in source order.
    pub items: Vec<LineItem>,
}

/// Locate the product table: from the column header up to the totals or
/// dispatch marker, or the end of the text.
pub fn product_region(text: &str) -> Option<&str> {
    let header = PRODUCT_TABLE_HEADER.find(text)?;
    let end = PRODUCT_TABLE_END
        .find(&text[header.end()..])
        .map(|m| header.end() + m.start())
        .unwrap_or(text.len());

    Some(&text[header.start()..end])
}

/// Extract the product rows of a quotation.
///
/// A document without a product table, or whose rows match no pattern,
/// yields an empty selection.
pub fn extract_line_items(text: &str) -> LineItemSelection {
    let Some(region) = product_region(text) else {
        debug!("No product table header found");
        return LineItemSelection::default();
    };

    let mut best: Option<RowPattern> = None;
    let mut best_count = 0;

    for pattern in RowPattern::ALL {
        let count = pattern.regex().find_iter(region).count();
        debug!("Row pattern {} matched {} rows", pattern, count);

        if count > best_count {
            best = Some(pattern);
            best_count = count;
        }
    }

    let Some(pattern) = best else {
        debug!("No row pattern matched the product table");
        return LineItemSelection::default();
    };

    debug!("Selected row pattern {} ({} rows)", pattern, best_count);

    let items = pattern
        .regex()
        .captures_iter(region)
        .map(|caps| line_item_from_captures(&caps))
        .collect();

    LineItemSelection {
        pattern: Some(pattern),
        items,
    }
}

fn line_item_from_captures(caps: &Captures<'_>) -> LineItem {
    let group = |i: usize| {
        caps.get(i)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    };

    LineItem {
        position: group(1),
        material_code: group(2),
        description: group(3),
        quantity: group(4),
        unit: group(5),
        unit_price_original: group(6),
        unit_price_discounted: group(7),
        line_value_discounted: group(8),
        line_total: group(9),
    }
}
