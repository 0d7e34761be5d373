//! Shape codec between current shapes and legacy markup elements.
//!
//! Each shape variant implements [`ShapeCodec`]. Lists are the exception:
//! their composition lives in the embedded metadata as well as in markup,
//! so [`list`] handles them with access to the decoded records.
//!
//! [`decode_shape`] and [`encode_shape`] dispatch over the closed set of
//! variants.

mod block;
mod graphic;
pub mod list;
pub mod style;
mod text;

use crate::convert::UpgradeOptions;
use crate::error::{Error, Result};
use crate::markup::metadata::ShapeRecords;
use crate::markup::Element;
use crate::model::value::{is_blank, parse_decimal};
use crate::model::{
    EllipseShape, ImageBlockShape, ImageShape, LineShape, PageNumberShape, RectShape, Shape,
    ShapeKind, TextBlockShape, TextShape,
};
use serde_json::{Map, Value};

/// Conversion of one shape variant to and from its legacy element.
pub trait ShapeCodec: Sized {
    /// Variant handled by this codec.
    const KIND: ShapeKind;

    /// Build the legacy markup element.
    fn to_legacy(&self) -> Element;

    /// Read the shape back from its legacy markup element.
    fn from_legacy(element: &Element) -> Result<Self>;
}

/// State shared while decoding the shapes of one document.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'a> {
    /// Embedded metadata records by shape id
    pub records: &'a ShapeRecords,
    /// Upgrade options
    pub options: &'a UpgradeOptions,
    /// Whether the shapes being decoded belong to a list section
    pub in_section: bool,
}

impl<'a> DecodeContext<'a> {
    /// Context for top-level shapes.
    pub fn new(records: &'a ShapeRecords, options: &'a UpgradeOptions) -> Self {
        Self {
            records,
            options,
            in_section: false,
        }
    }

    /// Context for the items of a list section.
    pub fn section(self) -> Self {
        Self {
            in_section: true,
            ..self
        }
    }
}

/// Decode one legacy element by its `class`.
pub fn decode_shape(element: &Element, ctx: &DecodeContext<'_>) -> Result<Shape> {
    let class = element.class().unwrap_or("");
    let kind = ShapeKind::from_legacy_class(class)
        .ok_or_else(|| Error::UnknownShapeType(class.to_string()))?;

    log::debug!(
        "Decoding {} {:?}",
        kind,
        element.attribute("x-id").unwrap_or("")
    );

    Ok(match kind {
        ShapeKind::Text => Shape::Text(TextShape::from_legacy(element)?),
        ShapeKind::Image => Shape::Image(ImageShape::from_legacy(element)?),
        ShapeKind::Rect => Shape::Rect(RectShape::from_legacy(element)?),
        ShapeKind::Ellipse => Shape::Ellipse(EllipseShape::from_legacy(element)?),
        ShapeKind::Line => Shape::Line(LineShape::from_legacy(element)?),
        ShapeKind::PageNumber => Shape::PageNumber(PageNumberShape::from_legacy(element)?),
        ShapeKind::ImageBlock => Shape::ImageBlock(ImageBlockShape::from_legacy(element)?),
        ShapeKind::TextBlock => Shape::TextBlock(TextBlockShape::from_legacy(element)?),
        ShapeKind::List => {
            if ctx.in_section {
                let id = element.attribute("x-id").unwrap_or("");
                return Err(Error::NestedList(id.to_string()));
            }
            Shape::List(list::decode_list(element, ctx)?)
        }
    })
}

/// Decode every child element of a container, in order.
pub fn decode_children(container: &Element, ctx: &DecodeContext<'_>) -> Result<Vec<Shape>> {
    container
        .child_elements()
        .map(|element| decode_shape(element, ctx))
        .collect()
}

/// A shape written in legacy form.
#[derive(Debug, Clone)]
pub struct EncodedShape {
    /// Embedded metadata record
    pub record: Value,
    /// Markup element
    pub element: Element,
}

/// Encode one shape with its metadata record.
pub fn encode_shape(shape: &Shape) -> Result<EncodedShape> {
    log::debug!("Encoding {} {:?}", shape.kind(), shape.id());

    if let Shape::List(list) = shape {
        return list::encode_list(list);
    }
    let element = encode_element(shape)?;
    Ok(EncodedShape {
        record: attribute_record(&element),
        element,
    })
}

/// Encode a shape that may appear inside a list section.
pub(crate) fn encode_element(shape: &Shape) -> Result<Element> {
    Ok(match shape {
        Shape::Text(s) => s.to_legacy(),
        Shape::Image(s) => s.to_legacy(),
        Shape::Rect(s) => s.to_legacy(),
        Shape::Ellipse(s) => s.to_legacy(),
        Shape::Line(s) => s.to_legacy(),
        Shape::PageNumber(s) => s.to_legacy(),
        Shape::ImageBlock(s) => s.to_legacy(),
        Shape::TextBlock(s) => s.to_legacy(),
        Shape::List(s) => return Err(Error::NestedList(s.id.clone())),
    })
}

/// Metadata record mirroring an element's attributes.
fn attribute_record(element: &Element) -> Value {
    let mut record = Map::new();
    record.insert(
        "type".to_string(),
        Value::String(element.class().unwrap_or("").to_string()),
    );
    record.insert(
        "id".to_string(),
        Value::String(element.attribute("x-id").unwrap_or("").to_string()),
    );
    for (key, value) in &element.attributes {
        if key != "class" && key != "x-id" {
            record.insert(key.clone(), Value::String(value.clone()));
        }
    }
    Value::Object(record)
}

/// Start a legacy element with its class, id and visibility.
pub(crate) fn legacy_element(name: &str, kind: ShapeKind, id: &str, display: bool) -> Element {
    Element::new(name)
        .with_attribute("class", kind.legacy_class())
        .with_attribute("x-id", id)
        .with_attribute("x-display", style::display_to_legacy(display))
}

/// Integer text, truncating toward zero.
pub(crate) fn format_integer(value: f64) -> String {
    format!("{}", value.trunc() as i64)
}

/// Attribute reader for one legacy element.
///
/// Numeric reads treat a missing or blank attribute as `0` and report
/// anything else that does not parse as [`Error::InvalidAttribute`].
pub(crate) struct LegacyAttributes<'a> {
    element: &'a Element,
    id: &'a str,
}

impl<'a> LegacyAttributes<'a> {
    pub fn new(element: &'a Element) -> Self {
        Self {
            element,
            id: element.attribute("x-id").unwrap_or(""),
        }
    }

    /// The shape id (`x-id`).
    pub fn id(&self) -> String {
        self.id.to_string()
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.element.attribute(key)
    }

    /// Attribute text, empty when missing.
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or("").to_string()
    }

    pub fn flag(&self, key: &str) -> bool {
        self.get(key).map_or(false, |v| v.trim() == "true")
    }

    pub fn display(&self) -> bool {
        style::display_from_legacy(self.get("x-display"))
    }

    pub fn number(&self, key: &str) -> Result<f64> {
        match self.get(key) {
            value if is_blank(value) => Ok(0.0),
            Some(value) => parse_decimal(value).ok_or_else(|| self.invalid(key, value)),
            None => Ok(0.0),
        }
    }

    /// Non-negative integer; a fractional part is dropped.
    pub fn count(&self, key: &str) -> Result<u32> {
        self.optional_count(key).map(Option::unwrap_or_default)
    }

    /// Like [`Self::count`], but a missing or blank attribute is `None`.
    pub fn optional_count(&self, key: &str) -> Result<Option<u32>> {
        match self.get(key) {
            value if is_blank(value) => Ok(None),
            Some(value) => parse_decimal(value)
                .filter(|v| *v >= 0.0 && *v <= u32::MAX as f64)
                .map(|v| Some(v.trunc() as u32))
                .ok_or_else(|| self.invalid(key, value)),
            None => Ok(None),
        }
    }

    /// Font family list from the scalar legacy attribute.
    pub fn font_family(&self) -> Vec<String> {
        match self.get("font-family") {
            Some(family) if !family.trim().is_empty() => vec![family.to_string()],
            _ => Vec::new(),
        }
    }

    pub fn invalid(&self, key: &str, value: &str) -> Error {
        Error::invalid_attribute(self.id, key, value)
    }
}
