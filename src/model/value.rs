//! Scalar value types shared by both schema generations.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Format a number as decimal text.
///
/// Uses the shortest representation that parses back to the same `f64`,
/// so `parse_decimal(&format_decimal(v)) == Some(v)` for every finite `v`.
pub fn format_decimal(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0" in markup.
        return "0".to_string();
    }
    format!("{}", value)
}

/// Parse decimal text into a number. Surrounding whitespace is ignored.
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whether a value counts as blank: absent, empty or whitespace only.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Serde helpers for legacy fields stored as decimal text.
///
/// Legacy files are inconsistent about quoting numbers, so numbers and
/// `null` are accepted on input; output is always a string.
pub mod decimal_text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(String::new()),
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n
                .as_f64()
                .map(format_decimal)
                .unwrap_or_else(|| n.to_string())),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(de::Error::custom(format!(
                "expected decimal text, found {}",
                other
            ))),
        }
    }
}

/// A length that may be left blank, such as line height or letter spacing.
///
/// Serialized as a number, or as `""` when blank.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing(pub Option<f64>);

impl Spacing {
    /// A blank spacing.
    pub fn blank() -> Self {
        Self(None)
    }

    /// A concrete spacing.
    pub fn of(value: f64) -> Self {
        Self(Some(value))
    }

    /// Whether no value is set.
    pub fn is_blank(&self) -> bool {
        self.0.is_none()
    }
}

impl Serialize for Spacing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(v) => serializer.serialize_f64(v),
            None => serializer.serialize_str(""),
        }
    }
}

impl<'de> Deserialize<'de> for Spacing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Spacing::blank()),
            Value::Number(n) => Ok(Spacing(n.as_f64())),
            Value::String(s) if is_blank(Some(&s)) => Ok(Spacing::blank()),
            Value::String(s) => parse_decimal(&s)
                .map(Spacing::of)
                .ok_or_else(|| de::Error::custom(format!("invalid spacing {:?}", s))),
            other => Err(de::Error::custom(format!(
                "expected number or \"\", found {}",
                other
            ))),
        }
    }
}

/// A list bound as carried through an upgrade.
///
/// The general upgrade keeps the legacy decimal text untouched; the numeric
/// mode converts it. Both forms downgrade to the same text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    /// Numeric form
    Number(f64),
    /// Decimal text as found in the legacy markup
    Text(String),
}

impl Coordinate {
    /// Numeric value, if the text form parses.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Coordinate::Number(v) => Some(*v),
            Coordinate::Text(s) => parse_decimal(s),
        }
    }

    /// Decimal text form.
    pub fn to_decimal_text(&self) -> String {
        match self {
            Coordinate::Number(v) => format_decimal(*v),
            Coordinate::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_text())
    }
}
