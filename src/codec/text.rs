//! Text and text-block codecs.

use super::style::{
    compose_font_style, decompose_font_style, letter_spacing_from_legacy,
    letter_spacing_to_legacy, line_height_from_legacy, line_height_to_legacy,
    text_align_from_legacy, text_align_to_legacy, vertical_align_from_legacy,
    vertical_align_to_legacy, LegacyFontStyle,
};
use super::{format_integer, legacy_element, LegacyAttributes, ShapeCodec};
use crate::error::Result;
use crate::markup::Element;
use crate::model::value::format_decimal;
use crate::model::{
    DatetimeFormat, FormatType, NumberFormat, PaddingFormat, ShapeKind, TextBlockShape,
    TextFormat, TextShape, TextStyle,
};

/// Write the typography attributes shared by text and text blocks.
fn write_text_style(element: &mut Element, style: &TextStyle) {
    element.set_attribute("font-family", style.primary_font());
    element.set_attribute("font-size", format_integer(style.font_size));
    element.set_attribute("fill", style.color.as_str());
    element.set_attribute("text-anchor", text_align_to_legacy(style.text_align));
    element.set_attribute("x-valign", vertical_align_to_legacy(style.vertical_align));
    element.set_attribute("x-line-height", line_height_to_legacy(style.line_height));
    element.set_attribute("kerning", letter_spacing_to_legacy(style.letter_spacing));
    if let Some(font_style) = decompose_font_style(style.font_style.as_deref()) {
        font_style.apply(element);
    }
}

fn read_text_style(attrs: &LegacyAttributes<'_>, element: &Element) -> Result<TextStyle> {
    let line_height = attrs.text("x-line-height");
    let kerning = attrs.text("kerning");

    Ok(TextStyle {
        font_family: attrs.font_family(),
        font_size: attrs.number("font-size")?,
        color: attrs.text("fill"),
        font_style: compose_font_style(LegacyFontStyle::read(element).as_ref()),
        text_align: text_align_from_legacy(&attrs.text("text-anchor")),
        vertical_align: vertical_align_from_legacy(&attrs.text("x-valign")),
        line_height: line_height_from_legacy(&line_height)
            .ok_or_else(|| attrs.invalid("x-line-height", &line_height))?,
        letter_spacing: letter_spacing_from_legacy(&kerning)
            .ok_or_else(|| attrs.invalid("kerning", &kerning))?,
        overflow: None,
        word_wrap: None,
    })
}

impl ShapeCodec for TextShape {
    const KIND: ShapeKind = ShapeKind::Text;

    fn to_legacy(&self) -> Element {
        let mut element = legacy_element("g", Self::KIND, &self.id, self.display);
        element.set_attribute("x-left", format_decimal(self.x));
        element.set_attribute("x-top", format_decimal(self.y));
        element.set_attribute("x-width", format_decimal(self.width));
        element.set_attribute("x-height", format_decimal(self.height));
        write_text_style(&mut element, &self.style);

        for line in &self.texts {
            let mut text = Element::new("text");
            if !line.is_empty() {
                text.push_text(line.as_str());
            }
            element.push_element(text);
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
            texts: element
                .child_elements()
                .filter(|e| e.name == "text")
                .map(Element::text)
                .collect(),
            style: read_text_style(&attrs, element)?,
        })
    }
}

impl ShapeCodec for TextBlockShape {
    const KIND: ShapeKind = ShapeKind::TextBlock;

    fn to_legacy(&self) -> Element {
        let mut element = legacy_element("g", Self::KIND, &self.id, self.display);
        element.set_attribute("x-left", format_decimal(self.x));
        element.set_attribute("x-top", format_decimal(self.y));
        element.set_attribute("x-width", format_decimal(self.width));
        element.set_attribute("x-height", format_decimal(self.height));
        element.set_attribute("x-value", self.value.as_str());
        element.set_attribute("x-multiple", if self.multiple_line { "true" } else { "false" });
        element.set_attribute("x-ref-id", self.reference_id.as_str());
        write_text_style(&mut element, &self.style);
        if let Some(overflow) = &self.style.overflow {
            element.set_attribute("x-overflow", overflow.as_str());
        }
        if let Some(word_wrap) = &self.style.word_wrap {
            element.set_attribute("x-word-wrap", word_wrap.as_str());
        }
        write_format(&mut element, &self.format);
        element
    }

    fn from_legacy(element: &Element) -> Result<Self> {
        let attrs = LegacyAttributes::new(element);
        let mut style = read_text_style(&attrs, element)?;
        style.overflow = attrs.get("x-overflow").map(str::to_string);
        style.word_wrap = attrs.get("x-word-wrap").map(str::to_string);

        Ok(Self {
            id: attrs.id(),
            display: attrs.display(),
            x: attrs.number("x-left")?,
            y: attrs.number("x-top")?,
            width: attrs.number("x-width")?,
            height: attrs.number("x-height")?,
            value: attrs.text("x-value"),
            multiple_line: attrs.flag("x-multiple"),
            reference_id: attrs.text("x-ref-id"),
            format: read_format(&attrs)?,
            style,
        })
    }
}

/// Only the fields of the selected format type are written.
fn write_format(element: &mut Element, format: &TextFormat) {
    element.set_attribute("x-format-base", format.base.as_str());
    element.set_attribute("x-format-type", format.format_type.as_str());

    match format.format_type {
        FormatType::Datetime => {
            let datetime = format.datetime.clone().unwrap_or_default();
            element.set_attribute("x-format-datetime-format", datetime.format);
        }
        FormatType::Number => {
            let number = format.number.clone().unwrap_or_default();
            element.set_attribute("x-format-number-delimiter", number.delimiter);
            element.set_attribute(
                "x-format-number-precision",
                number.precision.map(|p| p.to_string()).unwrap_or_default(),
            );
        }
        FormatType::Padding => {
            let padding = format.padding.clone().unwrap_or_default();
            element.set_attribute("x-format-padding-length", padding.length.to_string());
            element.set_attribute("x-format-padding-char", padding.character);
            element.set_attribute("x-format-padding-direction", padding.direction);
        }
        FormatType::None => {}
    }
}

fn read_format(attrs: &LegacyAttributes<'_>) -> Result<TextFormat> {
    let format_type = FormatType::parse(&attrs.text("x-format-type"));
    let mut format = TextFormat {
        base: attrs.text("x-format-base"),
        format_type,
        ..TextFormat::default()
    };

    match format_type {
        FormatType::Datetime => {
            format.datetime = Some(DatetimeFormat {
                format: attrs.text("x-format-datetime-format"),
            });
        }
        FormatType::Number => {
            format.number = Some(NumberFormat {
                delimiter: attrs.text("x-format-number-delimiter"),
                precision: attrs.optional_count("x-format-number-precision")?,
            });
        }
        FormatType::Padding => {
            format.padding = Some(PaddingFormat {
                length: attrs.count("x-format-padding-length")?,
                character: attrs.text("x-format-padding-char"),
                direction: attrs.text("x-format-padding-direction"),
            });
        }
        FormatType::None => {}
    }
    Ok(format)
}
