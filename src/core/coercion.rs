use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

/// Placeholder label for absent or non-categorical values.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Coerces a raw value into a finite number.
///
/// Numbers pass through; numeric strings parse as decimals (plain or
/// scientific notation), falling back to a float parse beyond the decimal
/// range. Booleans, objects, arrays, blank strings and non-finite results
/// are `None`.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|n| n.is_finite()),
        Value::String(text) => parse_numeric_text(text),
        _ => None,
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
        .and_then(|decimal| decimal.to_f64())
        .or_else(|| trimmed.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Category label for grouping; absent and non-scalar values collapse to
/// [`UNKNOWN_CATEGORY`].
#[must_use]
pub fn category_label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
        Some(Value::Number(number)) => format_number_label(number),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => UNKNOWN_CATEGORY.to_owned(),
    }
}

fn format_number_label(number: &serde_json::Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && float.abs() < 1e15 => format!("{float:.0}"),
        _ => number.to_string(),
    }
}
