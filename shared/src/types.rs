//! Field coercion utilities
//!
//! Every quantity, price, and date in the source feeds arrives as text and is
//! frequently malformed. All coercion goes through these named parse-or-zero
//! functions so the fallback behavior is uniform and testable; none of them
//! ever returns an error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an integer quantity field, defaulting to zero on malformed input.
///
/// Accepts surrounding whitespace and a trailing fractional part
/// (`"12.0"` parses as 12), matching the lenient coercion the feeds need.
pub fn parse_qty(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return v;
    }
    // Some exports write integer quantities as floats
    trimmed.parse::<f64>().map(|v| v.trunc() as i64).unwrap_or(0)
}

/// Parse a floating-point quantity field, defaulting to zero.
pub fn parse_qty_f64(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

/// Parse a money field into a `Decimal`, defaulting to zero.
pub fn parse_cost(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

/// Parse a date field, trying the formats seen across the source feeds.
///
/// Returns `None` rather than erroring so a bad date degrades the single row,
/// never the run.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    const FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d", "%d/%m/%Y"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Normalize a drug name for demand lookups: trim and lowercase.
pub fn normalize_drug_name(name: &str) -> String {
    name.trim().to_lowercase()
}
