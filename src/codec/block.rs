//! Page-number and image-block codecs.

use super::style::{
    compose_font_style, decompose_font_style, position_y_from_legacy, position_y_to_legacy,
    text_align_from_legacy, text_align_to_legacy, LegacyFontStyle,
};
use super::{legacy_element, LegacyAttributes, ShapeCodec};
use crate::error::Result;
use crate::markup::Element;
use crate::model::value::format_decimal;
use crate::model::{ImageBlockShape, ImageBlockStyle, PageNumberShape, PageNumberStyle, ShapeKind};

impl ShapeCodec for PageNumberShape {
    const KIND: ShapeKind = ShapeKind::PageNumber;

    fn to_legacy(&self) -> Element {
        let mut element = legacy_element("g", Self::KIND, &self.id, self.display)
            .with_attribute("x-left", format_decimal(self.x))
            .with_attribute("x-top", format_decimal(self.y))
            .with_attribute("x-width", format_decimal(self.width))
            .with_attribute("x-height", format_decimal(self.height))
            .with_attribute("x-format", self.format.as_str())
            .with_attribute("x-target", self.target.as_str())
            .with_attribute("font-family", self.style.primary_font())
            // Unlike text, the page number keeps a fractional size.
            .with_attribute("font-size", format_decimal(self.style.font_size))
            .with_attribute("fill", self.style.color.as_str())
            .with_attribute("text-anchor", text_align_to_legacy(self.style.text_align))
            .with_attribute("x-overflow", self.style.overflow.as_str());

        if let Some(font_style) = decompose_font_style(self.style.font_style.as_deref()) {
            font_style.apply(&mut element);
        }
        element
    }

    fn from_legacy(element: &Element) -> Result<Self> {
        let attrs = LegacyAttributes::new(element);
        Ok(Self {
            id: attrs.id(),
            display: attrs.display(),
            x: attrs.number("x-left")?,
            y: attrs.number("x-top")?,
            width: attrs.number("x-width")?,
            height: attrs.number("x-height")?,
            format: attrs.text("x-format"),
            target: attrs.text("x-target"),
            style: PageNumberStyle {
                font_family: attrs.font_family(),
                font_size: attrs.number("font-size")?,
                color: attrs.text("fill"),
                font_style: compose_font_style(LegacyFontStyle::read(element).as_ref()),
                text_align: text_align_from_legacy(&attrs.text("text-anchor")),
                overflow: attrs.text("x-overflow"),
            },
        })
    }
}

impl ShapeCodec for ImageBlockShape {
    const KIND: ShapeKind = ShapeKind::ImageBlock;

    fn to_legacy(&self) -> Element {
        legacy_element("g", Self::KIND, &self.id, self.display)
            .with_attribute("x-left", format_decimal(self.x))
            .with_attribute("x-top", format_decimal(self.y))
            .with_attribute("x-width", format_decimal(self.width))
            .with_attribute("x-height", format_decimal(self.height))
            .with_attribute("x-position-x", self.style.position_x.as_str())
            .with_attribute("x-position-y", position_y_to_legacy(self.style.position_y))
    }

    fn from_legacy(element: &Element) -> Result<Self> {
        let attrs = LegacyAttributes::new(element);
        Ok(Self {
            id: attrs.id(),
            display: attrs.display(),
            x: attrs.number("x-left")?,
            y: attrs.number("x-top")?,
            width: attrs.number("x-width")?,
            height: attrs.number("x-height")?,
            style: ImageBlockStyle {
                position_x: attrs.text("x-position-x"),
                position_y: position_y_from_legacy(&attrs.text("x-position-y")),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup;
    use crate::model::{ImagePositionY, TextAlign};

    #[test]
    fn test_page_number_round_trip() {
        let page_number = PageNumberShape {
            id: "pageno".to_string(),
            display: true,
            x: 500.0,
            y: 800.5,
            width: 60.0,
            height: 12.0,
            format: "{page} / {total}".to_string(),
            target: "".to_string(),
            style: PageNumberStyle {
                font_family: vec!["Helvetica".to_string()],
                font_size: 9.5,
                color: "#666666".to_string(),
                font_style: Some(vec!["italic".to_string()]),
                text_align: TextAlign::Right,
                overflow: "fit".to_string(),
            },
        };

        let element = page_number.to_legacy();
        assert_eq!(element.class(), Some("s-pageno"));
        assert_eq!(element.attribute("font-size"), Some("9.5"));
        assert_eq!(element.attribute("text-anchor"), Some("end"));
        assert_eq!(element.attribute("font-style"), Some("italic"));

        let parsed = markup::parse(&element.to_markup()).unwrap();
        assert_eq!(PageNumberShape::from_legacy(&parsed).unwrap(), page_number);
    }

    #[test]
    fn test_image_block_position() {
        let element = markup::parse(
            r#"<g class="s-iblock" x-id="photo" x-left="10" x-top="20" x-width="100" x-height="120"
                 x-position-x="center" x-position-y="center"/>"#,
        )
        .unwrap();
        let block = ImageBlockShape::from_legacy(&element).unwrap();
        assert_eq!(block.style.position_x, "center");
        assert_eq!(block.style.position_y, ImagePositionY::Middle);
        assert_eq!(block.height, 120.0);

        let back = block.to_legacy();
        assert_eq!(back.attribute("x-position-y"), Some("center"));
        assert_eq!(back.attribute("x-left"), Some("10"));
    }
}
