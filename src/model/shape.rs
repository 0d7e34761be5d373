//! Shape types of the current schema.

use super::list::ListShape;
use super::style::{ImageBlockStyle, LineStyle, PageNumberStyle, ShapeStyle, TextStyle};
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_display() -> bool {
    true
}

/// One positioned item of a layout.
///
/// The `type` field selects the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Shape {
    /// Static text
    Text(TextShape),
    /// Embedded image
    Image(ImageShape),
    /// Rectangle
    Rect(RectShape),
    /// Ellipse
    Ellipse(EllipseShape),
    /// Straight line
    Line(LineShape),
    /// Page-number stamp
    PageNumber(PageNumberShape),
    /// Image slot filled at generation time
    ImageBlock(ImageBlockShape),
    /// Formatted text slot filled at generation time
    TextBlock(TextBlockShape),
    /// Repeating list
    List(ListShape),
}

impl Shape {
    /// Variant of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Text(_) => ShapeKind::Text,
            Shape::Image(_) => ShapeKind::Image,
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Line(_) => ShapeKind::Line,
            Shape::PageNumber(_) => ShapeKind::PageNumber,
            Shape::ImageBlock(_) => ShapeKind::ImageBlock,
            Shape::TextBlock(_) => ShapeKind::TextBlock,
            Shape::List(_) => ShapeKind::List,
        }
    }

    /// Item id.
    pub fn id(&self) -> &str {
        match self {
            Shape::Text(s) => &s.id,
            Shape::Image(s) => &s.id,
            Shape::Rect(s) => &s.id,
            Shape::Ellipse(s) => &s.id,
            Shape::Line(s) => &s.id,
            Shape::PageNumber(s) => &s.id,
            Shape::ImageBlock(s) => &s.id,
            Shape::TextBlock(s) => &s.id,
            Shape::List(s) => &s.id,
        }
    }

    /// Whether the item is visible by default.
    pub fn display(&self) -> bool {
        match self {
            Shape::Text(s) => s.display,
            Shape::Image(s) => s.display,
            Shape::Rect(s) => s.display,
            Shape::Ellipse(s) => s.display,
            Shape::Line(s) => s.display,
            Shape::PageNumber(s) => s.display,
            Shape::ImageBlock(s) => s.display,
            Shape::TextBlock(s) => s.display,
            Shape::List(s) => s.display,
        }
    }

    /// Check if this is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Shape::List(_))
    }
}

/// Shape discriminator, with its name in each schema generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Text,
    Image,
    Rect,
    Ellipse,
    Line,
    PageNumber,
    ImageBlock,
    TextBlock,
    List,
}

impl ShapeKind {
    /// All variants.
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Text,
        ShapeKind::Image,
        ShapeKind::Rect,
        ShapeKind::Ellipse,
        ShapeKind::Line,
        ShapeKind::PageNumber,
        ShapeKind::ImageBlock,
        ShapeKind::TextBlock,
        ShapeKind::List,
    ];

    /// `type` value in the current schema.
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Text => "text",
            ShapeKind::Image => "image",
            ShapeKind::Rect => "rect",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Line => "line",
            ShapeKind::PageNumber => "page-number",
            ShapeKind::ImageBlock => "image-block",
            ShapeKind::TextBlock => "text-block",
            ShapeKind::List => "list",
        }
    }

    /// `class` attribute in the legacy markup.
    pub fn legacy_class(&self) -> &'static str {
        match self {
            ShapeKind::Text => "s-text",
            ShapeKind::Image => "s-image",
            ShapeKind::Rect => "s-rect",
            ShapeKind::Ellipse => "s-ellipse",
            ShapeKind::Line => "s-line",
            ShapeKind::PageNumber => "s-pageno",
            ShapeKind::ImageBlock => "s-iblock",
            ShapeKind::TextBlock => "s-tblock",
            ShapeKind::List => "s-list",
        }
    }

    /// Look up a current-schema `type` value.
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_name() == name)
    }

    /// Look up a legacy `class` attribute.
    pub fn from_legacy_class(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.legacy_class() == class)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Static text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TextShape {
    pub id: String,
    #[serde(default = "default_display")]
    pub display: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Text lines
    #[serde(default)]
    pub texts: Vec<String>,
    #[serde(default)]
    pub style: TextStyle,
}

/// Embedded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImageShape {
    pub id: String,
    #[serde(default = "default_display")]
    pub display: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub data: ImageData,
}

/// Inline image payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImageData {
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub base64: String,
}

impl ImageData {
    /// Render as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    /// Split a `data:<mime>;base64,<data>` URI.
    pub fn from_data_uri(uri: &str) -> Option<Self> {
        let rest = uri.trim().strip_prefix("data:")?;
        let (mime_type, base64) = rest.split_once(";base64,")?;
        if mime_type.is_empty() || base64.is_empty() {
            return None;
        }
        Some(Self {
            mime_type: mime_type.to_string(),
            base64: base64.to_string(),
        })
    }
}

/// Rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RectShape {
    pub id: String,
    #[serde(default = "default_display")]
    pub display: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Corner radius
    #[serde(default)]
    pub border_radius: f64,
    #[serde(default)]
    pub style: ShapeStyle,
}

/// Ellipse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EllipseShape {
    pub id: String,
    #[serde(default = "default_display")]
    pub display: bool,
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    #[serde(default)]
    pub style: ShapeStyle,
}

/// Straight line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LineShape {
    pub id: String,
    #[serde(default = "default_display")]
    pub display: bool,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default)]
    pub style: LineStyle,
}

/// Page-number stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PageNumberShape {
    pub id: String,
    #[serde(default = "default_display")]
    pub display: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Display format, e.g. `{page} / {total}`
    #[serde(default)]
    pub format: String,
    /// What is counted (empty = the whole report, or a list id)
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub style: PageNumberStyle,
}

/// Image slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImageBlockShape {
    pub id: String,
    #[serde(default = "default_display")]
    pub display: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub style: ImageBlockStyle,
}

/// Formatted text slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TextBlockShape {
    pub id: String,
    #[serde(default = "default_display")]
    pub display: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Default value
    #[serde(default)]
    pub value: String,
    /// Whether the block wraps onto several lines
    #[serde(default)]
    pub multiple_line: bool,
    /// Id of another text block this one mirrors
    #[serde(default)]
    pub reference_id: String,
    #[serde(default)]
    pub format: TextFormat,
    #[serde(default)]
    pub style: TextStyle,
}

/// Value format of a text block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TextFormat {
    /// Template the formatted value is placed into, e.g. `{value} yen`
    #[serde(default)]
    pub base: String,

    /// Discriminator selecting which of the sections below applies
    #[serde(default, rename = "type")]
    pub format_type: FormatType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<DatetimeFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<NumberFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<PaddingFormat>,
}

/// Text-block format discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormatType {
    /// No formatting (`""`, and any unknown keyword)
    #[default]
    None,
    Datetime,
    Number,
    Padding,
}

impl FormatType {
    /// Parse a keyword; unknown keywords mean no formatting.
    pub fn parse(keyword: &str) -> Self {
        match keyword {
            "datetime" => FormatType::Datetime,
            "number" => FormatType::Number,
            "padding" => FormatType::Padding,
            "" => FormatType::None,
            other => {
                log::warn!("Unknown text-block format type {:?}, ignoring", other);
                FormatType::None
            }
        }
    }

    /// Keyword shared by both schema generations.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatType::None => "",
            FormatType::Datetime => "datetime",
            FormatType::Number => "number",
            FormatType::Padding => "padding",
        }
    }
}

impl From<String> for FormatType {
    fn from(keyword: String) -> Self {
        Self::parse(&keyword)
    }
}

impl From<FormatType> for String {
    fn from(format_type: FormatType) -> Self {
        format_type.as_str().to_string()
    }
}

/// Date/time format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatetimeFormat {
    /// strftime-style pattern
    #[serde(default)]
    pub format: String,
}

/// Number format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Thousands delimiter
    #[serde(default)]
    pub delimiter: String,
    /// Decimal places (unset = as is)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
}

/// Padding format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaddingFormat {
    /// Target length
    #[serde(default)]
    pub length: u32,
    /// Fill character
    #[serde(default, rename = "char")]
    pub character: String,
    /// `L` or `R`
    #[serde(default)]
    pub direction: String,
}
