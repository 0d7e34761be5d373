//! Repeating list shape and its sections.

use super::shape::Shape;
use super::value::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_display() -> bool {
    true
}

/// A repeating list composed of up to four sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ListShape {
    pub id: String,

    #[serde(default = "default_display")]
    pub display: bool,

    /// Outer bounds. Only present after an upgrade; see
    /// [`UpgradeOptions::with_numeric_list_bounds`](crate::UpgradeOptions::with_numeric_list_bounds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Coordinate>,

    /// Height available to rows on each page
    #[serde(default)]
    pub content_height: f64,

    /// Whether rows flow onto a new page when the content height is used up
    #[serde(default)]
    pub auto_page_break: bool,

    #[serde(default, with = "section_slot")]
    pub header: Option<Section>,
    #[serde(default, with = "section_slot")]
    pub detail: Option<Section>,
    #[serde(default, with = "section_slot")]
    pub page_footer: Option<Section>,
    #[serde(default, with = "section_slot")]
    pub footer: Option<Section>,
}

impl ListShape {
    /// Create a list with no sections.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display: true,
            x: None,
            y: None,
            width: None,
            height: None,
            content_height: 0.0,
            auto_page_break: false,
            header: None,
            detail: None,
            page_footer: None,
            footer: None,
        }
    }

    /// Get a section by name.
    pub fn section(&self, name: SectionName) -> Option<&Section> {
        match name {
            SectionName::Header => self.header.as_ref(),
            SectionName::Detail => self.detail.as_ref(),
            SectionName::PageFooter => self.page_footer.as_ref(),
            SectionName::Footer => self.footer.as_ref(),
        }
    }

    /// Get a mutable section slot by name.
    pub fn section_mut(&mut self, name: SectionName) -> &mut Option<Section> {
        match name {
            SectionName::Header => &mut self.header,
            SectionName::Detail => &mut self.detail,
            SectionName::PageFooter => &mut self.page_footer,
            SectionName::Footer => &mut self.footer,
        }
    }

    /// Iterate over the present sections in rendering order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionName, &Section)> {
        SectionName::ALL
            .into_iter()
            .filter_map(move |name| self.section(name).map(|s| (name, s)))
    }

    /// Total number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections().map(|(_, s)| s.items.len()).sum()
    }
}

/// Section of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    Header,
    Detail,
    PageFooter,
    Footer,
}

impl SectionName {
    /// Sections in rendering order.
    pub const ALL: [SectionName; 4] = [
        SectionName::Header,
        SectionName::Detail,
        SectionName::PageFooter,
        SectionName::Footer,
    ];

    /// Key shared by both schema generations.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Header => "header",
            SectionName::Detail => "detail",
            SectionName::PageFooter => "page-footer",
            SectionName::Footer => "footer",
        }
    }

    /// Whether the section carries an `enabled` flag. `detail` always renders.
    pub fn has_enabled_flag(&self) -> bool {
        !matches!(self, SectionName::Detail)
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sub-region of a list with its own geometry and items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub height: f64,

    /// Rendering offset within the list
    #[serde(default)]
    pub translate: Translate,

    /// Items of the section (never lists)
    #[serde(default)]
    pub items: Vec<Shape>,

    /// Absent for `detail`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl Section {
    /// Create an empty section.
    pub fn new(height: f64) -> Self {
        Self {
            height,
            translate: Translate::default(),
            items: Vec::new(),
            enabled: None,
        }
    }

    /// Whether the section renders. Sections without a flag always do.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// Offset pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Translate {
    pub x: f64,
    pub y: f64,
}

impl Translate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Serde adapter for section slots: an absent section is written as `{}`,
/// and `{}`, `null` or a missing key read back as absent.
mod section_slot {
    use super::Section;
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::{Map, Value};

    pub fn serialize<S: Serializer>(
        section: &Option<Section>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match section {
            Some(section) => section.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Section>, D::Error> {
        match Option::<Map<String, Value>>::deserialize(deserializer)? {
            None => Ok(None),
            Some(map) if map.is_empty() => Ok(None),
            Some(map) => serde_json::from_value(Value::Object(map))
                .map(Some)
                .map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_section_round_trip() {
        let mut list = ListShape::new("list");
        list.detail = Some(Section::new(20.0));

        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["header"], serde_json::json!({}));
        assert_eq!(value["detail"]["height"], 20.0);
        assert!(value["detail"].get("enabled").is_none());
        assert!(value.get("x").is_none());

        let back: ListShape = serde_json::from_value(value).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn test_missing_section_keys() {
        let list: ListShape = serde_json::from_str(r#"{"id": "l", "header": null}"#).unwrap();
        assert!(list.header.is_none());
        assert!(list.footer.is_none());
        assert!(list.display);
        assert_eq!(list.sections().count(), 0);
    }

    #[test]
    fn test_section_order_and_flags() {
        let names: Vec<_> = SectionName::ALL.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["header", "detail", "page-footer", "footer"]);
        assert!(!SectionName::Detail.has_enabled_flag());
        assert!(SectionName::Footer.has_enabled_flag());

        let mut section = Section::new(10.0);
        assert!(section.is_enabled());
        section.enabled = Some(false);
        assert!(!section.is_enabled());
    }
}
