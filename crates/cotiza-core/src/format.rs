//! Chilean number display: `.` groups thousands, `,` separates decimals.
//!
//! Every function here is best-effort. Input that does not parse as a number
//! comes back unchanged instead of failing the document.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Parse a plain or scientific-notation number, ignoring surrounding whitespace.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Parse a number previously rendered in the Chilean display format
/// (`85.140,01` → `85140.01`).
pub fn parse_display_amount(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace('.', "").replace(',', ".");
    parse_amount(&normalized)
}

/// Strip currency symbols, US thousands commas and whitespace from a
/// quotation price (`"$8,383.44"` → `"8383.44"`).
pub fn clean_price(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect()
}

/// Integer part with thousands grouped by `.` (`85140.00` → `85.140`).
///
/// The value is truncated, not rounded.
pub fn format_thousands(s: &str) -> String {
    let Some(value) = parse_amount(s) else {
        return s.to_string();
    };

    let integer = value.trunc();
    match integer.abs().to_u128() {
        Some(digits) => {
            let sign = if integer.is_sign_negative() && !integer.is_zero() { "-" } else { "" };
            format!("{}{}", sign, group_thousands(digits))
        }
        None => s.to_string(),
    }
}

/// Thousands grouped by `.` plus a `,` and exactly two decimals
/// (`85140.005` → `85.140,01`).
///
/// Midpoints round away from zero.
pub fn format_thousands_with_decimals(s: &str) -> String {
    let Some(value) = parse_amount(s) else {
        return s.to_string();
    };

    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let integer = rounded.trunc();
    let cents = ((rounded - integer).abs() * Decimal::ONE_HUNDRED).to_u32();

    match (integer.abs().to_u128(), cents) {
        (Some(digits), Some(cents)) => {
            let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
            format!("{}{},{:02}", sign, group_thousands(digits), cents)
        }
        _ => s.to_string(),
    }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    grouped
}
