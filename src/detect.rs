//! Layout generation detection.

use crate::convert::is_upgradable;
use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Schema generation of a layout document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// 0.8.x: page config plus vector markup with embedded metadata
    Legacy,
    /// 0.9.x: flat item list
    Current,
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generation::Legacy => write!(f, "legacy"),
            Generation::Current => write!(f, "current"),
        }
    }
}

/// Summary of a layout file, read without converting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutInfo {
    /// Schema generation
    pub generation: Generation,
    /// Declared version (empty when missing)
    pub version: String,
    /// Layout title
    pub title: String,
    /// Paper type
    pub paper_type: String,
    /// Number of shapes: items for current layouts, metadata records for legacy ones
    pub shape_count: usize,
}

impl LayoutInfo {
    /// Whether [`crate::upgrade`] accepts this layout.
    pub fn is_upgradable(&self) -> bool {
        self.generation == Generation::Legacy && is_upgradable(&self.version)
    }
}

/// Detect the generation of a parsed JSON document.
///
/// A string `svg` member marks a legacy layout and an `items` array a current
/// one. Anything else is [`Error::UnknownFormat`].
pub fn detect_generation(value: &Value) -> Result<Generation> {
    let object = value.as_object().ok_or(Error::UnknownFormat)?;

    if object.get("svg").map_or(false, Value::is_string) {
        return Ok(Generation::Legacy);
    }
    if object.get("items").map_or(false, Value::is_array) {
        return Ok(Generation::Current);
    }
    Err(Error::UnknownFormat)
}

/// Detect the generation of JSON text.
pub fn detect_generation_from_str(json: &str) -> Result<Generation> {
    let value: Value = serde_json::from_str(json)?;
    detect_generation(&value)
}

/// Detect the generation of a layout file.
pub fn detect_generation_from_path<P: AsRef<Path>>(path: P) -> Result<Generation> {
    detect_generation_from_str(&fs::read_to_string(path)?)
}

/// Summarize JSON text.
pub fn inspect_str(json: &str) -> Result<LayoutInfo> {
    let value: Value = serde_json::from_str(json)?;
    let generation = detect_generation(&value)?;
    let text = |pointer: &str| {
        value
            .pointer(pointer)
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    };

    let (title, paper_type, shape_count) = match generation {
        Generation::Legacy => (
            text("/config/title"),
            text("/config/page/paper-type"),
            crate::markup::metadata::decode(&text("/svg"))?.len(),
        ),
        Generation::Current => (
            text("/title"),
            text("/report/paper-type"),
            value["items"].as_array().map_or(0, Vec::len),
        ),
    };

    Ok(LayoutInfo {
        generation,
        version: text("/version"),
        title,
        paper_type,
        shape_count,
    })
}

/// Summarize a layout file.
pub fn inspect_path<P: AsRef<Path>>(path: P) -> Result<LayoutInfo> {
    inspect_str(&fs::read_to_string(path)?)
}

/// Check if JSON text is a legacy layout.
pub fn is_legacy(json: &str) -> bool {
    matches!(detect_generation_from_str(json), Ok(Generation::Legacy))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = r#"{
        "version": "0.8.2",
        "config": {"title": "Old", "page": {"paper-type": "B5"}},
        "svg": "<svg><!--SHAPE{\"id\":\"a\"}SHAPE--><!--SHAPE{\"id\":\"b\"}SHAPE--></svg>"
    }"#;

    const CURRENT: &str = r#"{
        "version": "0.9.0", "title": "New",
        "report": {"paper-type": "A4", "orientation": "portrait"},
        "items": [{"type": "rect"}]
    }"#;

    #[test]
    fn test_detect_generation() {
        assert_eq!(detect_generation_from_str(LEGACY).unwrap(), Generation::Legacy);
        assert_eq!(detect_generation_from_str(CURRENT).unwrap(), Generation::Current);
    }

    #[test]
    fn test_detect_unknown_format() {
        let result = detect_generation_from_str(r#"{"version": "1.0"}"#);
        assert!(matches!(result, Err(Error::UnknownFormat)));

        let result = detect_generation_from_str("[1, 2]");
        assert!(matches!(result, Err(Error::UnknownFormat)));

        let result = detect_generation_from_str("not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_inspect() {
        let info = inspect_str(LEGACY).unwrap();
        assert_eq!(info.generation, Generation::Legacy);
        assert_eq!(info.title, "Old");
        assert_eq!(info.paper_type, "B5");
        assert_eq!(info.shape_count, 2);
        assert!(info.is_upgradable());

        let info = inspect_str(CURRENT).unwrap();
        assert_eq!(info.generation, Generation::Current);
        assert_eq!(info.version, "0.9.0");
        assert_eq!(info.shape_count, 1);
        assert!(!info.is_upgradable());
    }

    #[test]
    fn test_is_legacy() {
        assert!(is_legacy(LEGACY));
        assert!(!is_legacy(CURRENT));
        assert!(!is_legacy("{}"));
    }
}
