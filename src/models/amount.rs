//! Amount normalization
//!
//! Upstream records carry amounts as numbers, numeric strings, `null`, or not
//! at all. Everything downstream works on plain finite `f64` values, so every
//! raw amount passes through [`normalize_amount`] first.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A currency amount exactly as it arrived from the data source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAmount(Value);

impl RawAmount {
    /// Wrap an arbitrary JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// A missing amount
    pub fn missing() -> Self {
        Self(Value::Null)
    }

    /// Get the underlying value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Coerce to a finite float, see [`normalize_amount`]
    pub fn normalize(&self) -> f64 {
        normalize_amount(&self.0)
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        // NaN and infinities have no JSON representation
        Self(serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number))
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coerce any value to a finite `f64`
///
/// Total: never panics and never errors. `null`, booleans, arrays, objects,
/// non-numeric strings, `NaN` and infinities all become `0.0`. The sign of a
/// valid amount is kept.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use tally::models::amount::normalize_amount;
///
/// assert_eq!(normalize_amount(&json!("12.50")), 12.5);
/// assert_eq!(normalize_amount(&json!("abc")), 0.0);
/// assert_eq!(normalize_amount(&json!(null)), 0.0);
/// ```
pub fn normalize_amount(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_amount_str(s),
        _ => None,
    };

    finite_or_zero(parsed.unwrap_or(0.0))
}

/// Replace `NaN` and infinities with zero
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parse a numeric string: surrounding whitespace is ignored and a single
/// decimal comma is accepted ("12,50").
fn parse_amount_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Rust accepts "inf" and "NaN" as floats, upstream data never means those
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }

    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }

    if s.matches(',').count() == 1 && !s.contains('.') {
        return s.replace(',', ".").parse::<f64>().ok();
    }

    None
}
