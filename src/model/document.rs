//! Document-level types of the current schema.

use super::shape::{Shape, ShapeKind};
use super::list::SectionName;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A layout document in the current (0.9.x) schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Schema version, e.g. "0.9.0"
    pub version: String,

    /// Layout title
    #[serde(default)]
    pub title: String,

    /// Page template
    pub report: PageConfig,

    /// Items in drawing order
    #[serde(default)]
    pub items: Vec<Shape>,
}

impl LayoutDocument {
    /// Create an empty document.
    pub fn new(version: impl Into<String>, report: PageConfig) -> Self {
        Self {
            version: version.into(),
            title: String::new(),
            report,
            items: Vec::new(),
        }
    }

    /// Parse a document from JSON text.
    ///
    /// Item types are checked before the typed decode, so an unknown type is
    /// reported as [`Error::UnknownShapeType`] rather than a generic JSON error.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build a document from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        if let Some(items) = value.get("items").and_then(Value::as_array) {
            check_item_types(items, false)?;
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Add an item.
    pub fn add_item(&mut self, item: Shape) {
        self.items.push(item);
    }

    /// Find a top-level item by id.
    pub fn get_item(&self, id: &str) -> Option<&Shape> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Total number of items, counting items inside list sections.
    pub fn item_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| match item {
                Shape::List(list) => 1 + list.item_count(),
                _ => 1,
            })
            .sum()
    }
}

fn check_item_types(items: &[Value], in_section: bool) -> Result<()> {
    for item in items {
        let type_name = item.get("type").and_then(Value::as_str).unwrap_or("");
        let kind = ShapeKind::from_type_name(type_name)
            .ok_or_else(|| Error::UnknownShapeType(type_name.to_string()))?;

        if kind == ShapeKind::List {
            let id = item.get("id").and_then(Value::as_str).unwrap_or("");
            if in_section {
                return Err(Error::NestedList(id.to_string()));
            }
            for name in SectionName::ALL {
                if let Some(section_items) = item
                    .get(name.as_str())
                    .and_then(|s| s.get("items"))
                    .and_then(Value::as_array)
                {
                    check_item_types(section_items, true)?;
                }
            }
        }
    }
    Ok(())
}

/// Paper size, orientation and margins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PageConfig {
    /// Paper name, e.g. "A4" or "user"
    pub paper_type: String,

    /// Page width in points (user paper only; 0 otherwise)
    #[serde(default)]
    pub width: f64,

    /// Page height in points (user paper only; 0 otherwise)
    #[serde(default)]
    pub height: f64,

    /// "portrait" or "landscape"
    pub orientation: String,

    /// Margins
    #[serde(default)]
    pub margin: Margins,
}

impl PageConfig {
    /// A4 portrait page with the given margins.
    pub fn a4(margin: Margins) -> Self {
        Self {
            paper_type: "A4".to_string(),
            width: 0.0,
            height: 0.0,
            orientation: "portrait".to_string(),
            margin,
        }
    }
}

/// Page margins, serialized as `[top, right, bottom, left]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same margin on all four sides.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

impl From<[f64; 4]> for Margins {
    fn from([top, right, bottom, left]: [f64; 4]) -> Self {
        Self::new(top, right, bottom, left)
    }
}

impl From<Margins> for [f64; 4] {
    fn from(m: Margins) -> Self {
        [m.top, m.right, m.bottom, m.left]
    }
}
