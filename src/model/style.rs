//! Typography and stroke/fill style records of the current schema.

use super::value::Spacing;
use serde::{Deserialize, Deserializer, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TextAlign {
    /// Flush left (also the fallback for unknown keywords)
    #[default]
    Left,
    /// Centered
    Center,
    /// Flush right
    Right,
}

impl TextAlign {
    /// Parse a current-schema keyword. Unknown keywords fall back to `Left`.
    pub fn parse(keyword: &str) -> Self {
        match keyword {
            "center" => TextAlign::Center,
            "right" => TextAlign::Right,
            _ => TextAlign::Left,
        }
    }

    /// Current-schema keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

impl From<String> for TextAlign {
    fn from(keyword: String) -> Self {
        Self::parse(&keyword)
    }
}

impl From<TextAlign> for String {
    fn from(align: TextAlign) -> Self {
        align.as_str().to_string()
    }
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerticalAlign {
    /// Top (also the fallback for unknown keywords)
    #[default]
    Top,
    /// Middle
    Middle,
    /// Bottom
    Bottom,
}

impl VerticalAlign {
    /// Parse a current-schema keyword. Unknown keywords fall back to `Top`.
    pub fn parse(keyword: &str) -> Self {
        match keyword {
            "middle" => VerticalAlign::Middle,
            "bottom" => VerticalAlign::Bottom,
            _ => VerticalAlign::Top,
        }
    }

    /// Current-schema keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Middle => "middle",
            VerticalAlign::Bottom => "bottom",
        }
    }
}

impl From<String> for VerticalAlign {
    fn from(keyword: String) -> Self {
        Self::parse(&keyword)
    }
}

impl From<VerticalAlign> for String {
    fn from(align: VerticalAlign) -> Self {
        align.as_str().to_string()
    }
}

/// Deserialize an optional keyword, treating `""` like an absent value.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let keyword = Option::<String>::deserialize(deserializer)?;
    Ok(keyword
        .filter(|k| !k.trim().is_empty())
        .map(T::from))
}

/// Style of text and text-block items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TextStyle {
    /// Font family; the legacy schema keeps only the first entry
    #[serde(default)]
    pub font_family: Vec<String>,

    /// Font size in points
    #[serde(default)]
    pub font_size: f64,

    /// Text color
    #[serde(default)]
    pub color: String,

    /// Style tokens (`bold`, `italic`, `underline`, `linethrough`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<Vec<String>>,

    /// Horizontal alignment
    #[serde(default)]
    pub text_align: TextAlign,

    /// Vertical alignment
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub vertical_align: Option<VerticalAlign>,

    /// Line height (blank = automatic)
    #[serde(default)]
    pub line_height: Spacing,

    /// Letter spacing (blank = automatic)
    #[serde(default)]
    pub letter_spacing: Spacing,

    /// Overflow handling, text blocks only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overflow: Option<String>,

    /// Word wrap mode, text blocks only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_wrap: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: vec!["Helvetica".to_string()],
            font_size: 12.0,
            color: "#000000".to_string(),
            font_style: None,
            text_align: TextAlign::Left,
            vertical_align: None,
            line_height: Spacing::blank(),
            letter_spacing: Spacing::blank(),
            overflow: None,
            word_wrap: None,
        }
    }
}

impl TextStyle {
    /// First font family, or an empty string.
    pub fn primary_font(&self) -> &str {
        self.font_family.first().map(String::as_str).unwrap_or("")
    }
}

/// Stroke and fill of rectangles and ellipses.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShapeStyle {
    /// Border width
    #[serde(default)]
    pub border_width: f64,

    /// Border color
    #[serde(default)]
    pub border_color: String,

    /// Border style (`solid`, `dashed`, `dotted`)
    #[serde(default)]
    pub border_style: String,

    /// Fill color
    #[serde(default)]
    pub fill_color: String,
}

/// Stroke of lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LineStyle {
    /// Border width
    #[serde(default)]
    pub border_width: f64,

    /// Border color
    #[serde(default)]
    pub border_color: String,

    /// Border style
    #[serde(default)]
    pub border_style: String,
}

/// Style of page-number items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PageNumberStyle {
    #[serde(default)]
    pub font_family: Vec<String>,

    #[serde(default)]
    pub font_size: f64,

    #[serde(default)]
    pub color: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<Vec<String>>,

    #[serde(default)]
    pub text_align: TextAlign,

    /// Overflow handling mode
    #[serde(default)]
    pub overflow: String,
}

impl Default for PageNumberStyle {
    fn default() -> Self {
        Self {
            font_family: vec!["Helvetica".to_string()],
            font_size: 12.0,
            color: "#000000".to_string(),
            font_style: None,
            text_align: TextAlign::Left,
            overflow: "truncate".to_string(),
        }
    }
}

impl PageNumberStyle {
    /// First font family, or an empty string.
    pub fn primary_font(&self) -> &str {
        self.font_family.first().map(String::as_str).unwrap_or("")
    }
}

/// Vertical placement of an image inside an image block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImagePositionY {
    /// Top (also the fallback for blank or unknown keywords)
    #[default]
    Top,
    Middle,
    Bottom,
}

impl ImagePositionY {
    /// Parse a current-schema keyword. Unknown keywords fall back to `Top`.
    pub fn parse(keyword: &str) -> Self {
        match keyword {
            "middle" => ImagePositionY::Middle,
            "bottom" => ImagePositionY::Bottom,
            _ => ImagePositionY::Top,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImagePositionY::Top => "top",
            ImagePositionY::Middle => "middle",
            ImagePositionY::Bottom => "bottom",
        }
    }
}

impl From<String> for ImagePositionY {
    fn from(keyword: String) -> Self {
        Self::parse(&keyword)
    }
}

impl From<ImagePositionY> for String {
    fn from(position: ImagePositionY) -> Self {
        position.as_str().to_string()
    }
}

/// Style of image-block items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImageBlockStyle {
    /// Horizontal placement keyword (`left`, `center`, `right`)
    #[serde(default)]
    pub position_x: String,

    /// Vertical placement
    #[serde(default)]
    pub position_y: ImagePositionY,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_align_lenient() {
        let align: TextAlign = serde_json::from_str("\"justify\"").unwrap();
        assert_eq!(align, TextAlign::Left);
        let align: TextAlign = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(align, TextAlign::Right);
        assert_eq!(serde_json::to_string(&TextAlign::Center).unwrap(), "\"center\"");
    }

    #[test]
    fn test_text_style_blank_vertical_align() {
        let style: TextStyle = serde_json::from_str(
            r##"{"font-family":["IPAMincho"],"font-size":10,"color":"#333","vertical-align":""}"##,
        )
        .unwrap();
        assert_eq!(style.vertical_align, None);
        assert_eq!(style.primary_font(), "IPAMincho");
        assert!(style.line_height.is_blank());

        let json = serde_json::to_value(&style).unwrap();
        assert!(json.get("vertical-align").is_none());
        assert!(json.get("font-style").is_none());
        assert_eq!(json["letter-spacing"], "");
    }

    #[test]
    fn test_image_position_y_keywords() {
        let pos: ImagePositionY = serde_json::from_str("\"middle\"").unwrap();
        assert_eq!(pos, ImagePositionY::Middle);
    }

    #[test]
    fn test_image_position_y_lenient() {
        let pos: ImagePositionY = serde_json::from_str("\"\"").unwrap();
        assert_eq!(pos, ImagePositionY::Top);
        let pos: ImagePositionY = serde_json::from_str("\"baseline\"").unwrap();
        assert_eq!(pos, ImagePositionY::Top);
        assert_eq!(serde_json::to_string(&ImagePositionY::Bottom).unwrap(), "\"bottom\"");

        let style: ImageBlockStyle =
            serde_json::from_str(r#"{"position-x": "center", "position-y": ""}"#).unwrap();
        assert_eq!(style.position_y, ImagePositionY::Top);
    }
}
