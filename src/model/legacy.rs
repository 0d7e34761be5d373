//! Document-level types of the legacy (0.8.x) schema.
//!
//! Only the page configuration is structured; every shape lives in the
//! `svg` markup together with its embedded metadata record.

use super::value::decimal_text;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A layout document in the legacy schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyDocument {
    /// Schema version, e.g. "0.8.2"
    pub version: String,

    /// Title and page configuration
    pub config: LegacyConfig,

    /// Vector markup with embedded metadata comments
    #[serde(default)]
    pub svg: String,
}

impl LegacyDocument {
    /// Parse a legacy document from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Legacy `config` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyConfig {
    #[serde(default)]
    pub title: String,

    pub page: LegacyPage,
}

/// Legacy page configuration. Every value is decimal text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LegacyPage {
    #[serde(default)]
    pub paper_type: String,

    #[serde(default)]
    pub orientation: String,

    #[serde(default, with = "decimal_text")]
    pub width: String,

    #[serde(default, with = "decimal_text")]
    pub height: String,

    #[serde(default, with = "decimal_text")]
    pub margin_top: String,

    #[serde(default, with = "decimal_text")]
    pub margin_right: String,

    #[serde(default, with = "decimal_text")]
    pub margin_bottom: String,

    #[serde(default, with = "decimal_text")]
    pub margin_left: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_page_accepts_numbers() {
        let json = r#"{
            "version": "0.8.2",
            "finger-print": 123456,
            "config": {
                "title": "Sample",
                "page": {
                    "paper-type": "A4", "orientation": "portrait", "width": "", "height": null,
                    "margin-top": "20", "margin-right": 20.5, "margin-bottom": "20", "margin-left": 20
                }
            },
            "svg": "<svg/>"
        }"#;
        let doc = LegacyDocument::from_json(json).unwrap();
        assert_eq!(doc.config.page.margin_right, "20.5");
        assert_eq!(doc.config.page.margin_left, "20");
        assert_eq!(doc.config.page.height, "");

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["config"]["page"]["margin-left"], "20");
        assert!(value.get("finger-print").is_none());
    }
}
