//! Codecs for plain graphics: rectangles, ellipses, lines and images.

use super::{format_integer, legacy_element, LegacyAttributes, ShapeCodec};
use crate::error::Result;
use crate::markup::Element;
use crate::model::value::format_decimal;
use crate::model::{
    EllipseShape, ImageData, ImageShape, LineShape, LineStyle, RectShape, ShapeKind, ShapeStyle,
};

const HREF: &str = "xlink:href";

impl ShapeCodec for RectShape {
    const KIND: ShapeKind = ShapeKind::Rect;

    fn to_legacy(&self) -> Element {
        legacy_element("rect", Self::KIND, &self.id, self.display)
            .with_attribute("x", format_decimal(self.x))
            .with_attribute("y", format_decimal(self.y))
            .with_attribute("width", format_decimal(self.width))
            .with_attribute("height", format_decimal(self.height))
            .with_attribute("stroke-width", format_decimal(self.style.border_width))
            .with_attribute("stroke", self.style.border_color.as_str())
            .with_attribute("x-stroke-type", self.style.border_style.as_str())
            .with_attribute("fill", self.style.fill_color.as_str())
            .with_attribute("rx", format_decimal(self.border_radius))
    }

    fn from_legacy(element: &Element) -> Result<Self> {
        let attrs = LegacyAttributes::new(element);
        Ok(Self {
            id: attrs.id(),
            display: attrs.display(),
            x: attrs.number("x")?,
            y: attrs.number("y")?,
            width: attrs.number("width")?,
            height: attrs.number("height")?,
            border_radius: attrs.number("rx")?,
            style: read_shape_style(&attrs)?,
        })
    }
}

impl ShapeCodec for EllipseShape {
    const KIND: ShapeKind = ShapeKind::Ellipse;

    fn to_legacy(&self) -> Element {
        legacy_element("ellipse", Self::KIND, &self.id, self.display)
            .with_attribute("cx", format_decimal(self.cx))
            .with_attribute("cy", format_decimal(self.cy))
            .with_attribute("rx", format_decimal(self.rx))
            .with_attribute("ry", format_decimal(self.ry))
            .with_attribute("stroke-width", format_integer(self.style.border_width))
            .with_attribute("stroke", self.style.border_color.as_str())
            .with_attribute("x-stroke-type", self.style.border_style.as_str())
            .with_attribute("fill", self.style.fill_color.as_str())
    }

    fn from_legacy(element: &Element) -> Result<Self> {
        let attrs = LegacyAttributes::new(element);
        Ok(Self {
            id: attrs.id(),
            display: attrs.display(),
            cx: attrs.number("cx")?,
            cy: attrs.number("cy")?,
            rx: attrs.number("rx")?,
            ry: attrs.number("ry")?,
            style: read_shape_style(&attrs)?,
        })
    }
}

impl ShapeCodec for LineShape {
    const KIND: ShapeKind = ShapeKind::Line;

    fn to_legacy(&self) -> Element {
        legacy_element("line", Self::KIND, &self.id, self.display)
            .with_attribute("x1", format_decimal(self.x1))
            .with_attribute("y1", format_decimal(self.y1))
            .with_attribute("x2", format_decimal(self.x2))
            .with_attribute("y2", format_decimal(self.y2))
            .with_attribute("stroke-width", format_integer(self.style.border_width))
            .with_attribute("stroke", self.style.border_color.as_str())
            .with_attribute("x-stroke-type", self.style.border_style.as_str())
    }

    fn from_legacy(element: &Element) -> Result<Self> {
        let attrs = LegacyAttributes::new(element);
        Ok(Self {
            id: attrs.id(),
            display: attrs.display(),
            x1: attrs.number("x1")?,
            y1: attrs.number("y1")?,
            x2: attrs.number("x2")?,
            y2: attrs.number("y2")?,
            style: LineStyle {
                border_width: attrs.number("stroke-width")?,
                border_color: attrs.text("stroke"),
                border_style: attrs.text("x-stroke-type"),
            },
        })
    }
}

impl ShapeCodec for ImageShape {
    const KIND: ShapeKind = ShapeKind::Image;

    fn to_legacy(&self) -> Element {
        legacy_element("image", Self::KIND, &self.id, self.display)
            .with_attribute("x", format_decimal(self.x))
            .with_attribute("y", format_decimal(self.y))
            .with_attribute("width", format_decimal(self.width))
            .with_attribute("height", format_decimal(self.height))
            .with_attribute(HREF, self.data.to_data_uri())
    }

    fn from_legacy(element: &Element) -> Result<Self> {
        let attrs = LegacyAttributes::new(element);
        let href = attrs.text(HREF);
        let data = ImageData::from_data_uri(&href).ok_or_else(|| attrs.invalid(HREF, &href))?;

        Ok(Self {
            id: attrs.id(),
            display: attrs.display(),
            x: attrs.number("x")?,
            y: attrs.number("y")?,
            width: attrs.number("width")?,
            height: attrs.number("height")?,
            data,
        })
    }
}

fn read_shape_style(attrs: &LegacyAttributes<'_>) -> Result<ShapeStyle> {
    Ok(ShapeStyle {
        border_width: attrs.number("stroke-width")?,
        border_color: attrs.text("stroke"),
        border_style: attrs.text("x-stroke-type"),
        fill_color: attrs.text("fill"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::markup;

    fn stroke(width: f64) -> ShapeStyle {
        ShapeStyle {
            border_width: width,
            border_color: "#000000".to_string(),
            border_style: "solid".to_string(),
            fill_color: "#ffffff".to_string(),
        }
    }

    #[test]
    fn test_rect_geometry_round_trip() {
        let rect = RectShape {
            id: "frame".to_string(),
            display: true,
            x: 0.1,
            y: 1.0 / 3.0,
            width: 595.275590551,
            height: 10.0,
            border_radius: 2.5,
            style: stroke(0.5),
        };
        let element = rect.to_legacy();
        assert_eq!(element.name, "rect");
        assert_eq!(element.attribute("rx"), Some("2.5"));
        assert_eq!(element.attribute("stroke-width"), Some("0.5"));

        let back = RectShape::from_legacy(&markup::parse(&element.to_markup()).unwrap()).unwrap();
        assert_eq!(back, rect);
    }

    #[test]
    fn test_ellipse_truncates_border_width() {
        let ellipse = EllipseShape {
            id: "dot".to_string(),
            display: true,
            cx: 50.5,
            cy: 60.25,
            rx: 10.0,
            ry: 5.0,
            style: stroke(1.8),
        };
        let element = ellipse.to_legacy();
        assert_eq!(element.attribute("stroke-width"), Some("1"));
        assert_eq!(element.attribute("x"), None);

        let back = EllipseShape::from_legacy(&element).unwrap();
        assert_eq!((back.cx, back.cy, back.rx, back.ry), (50.5, 60.25, 10.0, 5.0));
        assert_eq!(back.style.border_width, 1.0);
        assert_eq!(back.style.fill_color, "#ffffff");
    }

    #[test]
    fn test_line_hidden() {
        let element =
            markup::parse(r#"<line class="s-line" x-id="l" x1="1" y1="2" x2="3" y2="4" x-display="false"/>"#)
                .unwrap();
        let line = LineShape::from_legacy(&element).unwrap();
        assert!(!line.display);
        assert_eq!((line.x1, line.y1, line.x2, line.y2), (1.0, 2.0, 3.0, 4.0));
        assert_eq!(line.style.border_width, 0.0);
    }

    #[test]
    fn test_image_data_uri() {
        let element = markup::parse(
            r#"<image class="s-image" x-id="logo" x="5" y="6" width="70" height="80"
                xlink:href="data:image/jpeg;base64,/9j/4AAQSkZJRg=="/>"#,
        )
        .unwrap();
        let image = ImageShape::from_legacy(&element).unwrap();
        assert_eq!(image.data.mime_type, "image/jpeg");
        assert_eq!(image.data.base64, "/9j/4AAQSkZJRg==");

        let back = image.to_legacy();
        assert_eq!(back.attribute(HREF), element.attribute(HREF));
    }

    #[test]
    fn test_image_rejects_linked_file() {
        let element =
            markup::parse(r#"<image class="s-image" x-id="logo" xlink:href="logo.png"/>"#).unwrap();
        let err = ImageShape::from_legacy(&element).unwrap_err();
        assert!(matches!(err, Error::InvalidAttribute { ref attribute, .. } if attribute == HREF));
    }
}
