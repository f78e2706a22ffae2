// ============================================================
// COLUMN TYPE INFERENCE
// ============================================================
// Decide the semantic type of a raw cell value

use serde::{Deserialize, Serialize};

/// Semantic type of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Anything that is not a numeric literal, including the empty string
    Text,

    /// Numeric literal with no fractional component
    Integer,

    /// Numeric literal with a fractional component, or out of `i64` range
    Float,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Text => write!(f, "Text"),
            ColumnType::Integer => write!(f, "Integer"),
            ColumnType::Float => write!(f, "Float"),
        }
    }
}

/// A successfully parsed numeric literal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Integer(i64),
    Float(f64),
}

/// Parse a whole string as a numeric literal.
///
/// Surrounding whitespace is ignored, but an empty or all-blank value is not
/// a number. Accepts decimal and exponent forms, `Infinity` with an optional
/// sign, and unsigned `0x`/`0o`/`0b` integers. Rust-only spellings such as
/// `inf` or `nan` are rejected. No locale handling: `"1,5"` is not a number.
///
/// Mathematically integral values (`"42"`, `"1.0"`, `"1e3"`) are `Integer`
/// as long as they fit in an `i64`; anything wider falls back to `Float`.
pub fn parse_numeric(value: &str) -> Option<Numeric> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = value.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }

    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    if unsigned == "Infinity" {
        let float = if value.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some(Numeric::Float(float));
    }
    // Keeps "inf", "nan" and friends out of the float parser
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    if let Ok(int) = value.parse::<i64>() {
        return Some(Numeric::Integer(int));
    }

    Some(integral_or_float(value.parse::<f64>().ok()?))
}

fn integral_or_float(float: f64) -> Numeric {
    // i64::MAX rounds up to 2^63 as f64, so the upper bound is exclusive
    if float.is_finite()
        && float.fract() == 0.0
        && float >= i64::MIN as f64
        && float < i64::MAX as f64
    {
        return Numeric::Integer(float as i64);
    }
    Numeric::Float(float)
}

fn parse_radix(digits: &str, radix: u32) -> Option<Numeric> {
    // from_str_radix would take a sign here
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    if let Ok(int) = i64::from_str_radix(digits, radix) {
        return Some(Numeric::Integer(int));
    }

    let mut float = 0f64;
    for c in digits.chars() {
        float = float * radix as f64 + c.to_digit(radix)? as f64;
    }
    Some(Numeric::Float(float))
}

/// Infer the column type of a single sample value
pub fn infer_type(value: &str) -> ColumnType {
    match parse_numeric(value) {
        None => ColumnType::Text,
        Some(Numeric::Integer(_)) => ColumnType::Integer,
        Some(Numeric::Float(_)) => ColumnType::Float,
    }
}
