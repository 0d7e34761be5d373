//! Style mapping between the two schema generations.
//!
//! Stateless helpers shared by the text, text-block and page-number codecs.
//! Every `*_to_legacy` function yields the attribute text written to legacy
//! markup; every `*_from_legacy` function reads it back.

use crate::markup::Element;
use crate::model::value::{format_decimal, is_blank, parse_decimal};
use crate::model::{ImagePositionY, Spacing, TextAlign, VerticalAlign};

/// Font style as the three legacy presentation attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyFontStyle {
    /// `bold` or `normal`
    pub weight: String,
    /// `italic` or `normal`
    pub style: String,
    /// Space-separated `underline` / `line-through`, possibly empty
    pub decoration: String,
}

impl LegacyFontStyle {
    const WEIGHT: &'static str = "font-weight";
    const STYLE: &'static str = "font-style";
    const DECORATION: &'static str = "text-decoration";

    /// Write the three attributes onto an element.
    pub fn apply(&self, element: &mut Element) {
        element.set_attribute(Self::WEIGHT, self.weight.as_str());
        element.set_attribute(Self::STYLE, self.style.as_str());
        element.set_attribute(Self::DECORATION, self.decoration.as_str());
    }

    /// Read the attributes back. `None` when none of them is present.
    pub fn read(element: &Element) -> Option<Self> {
        let weight = element.attribute(Self::WEIGHT);
        let style = element.attribute(Self::STYLE);
        let decoration = element.attribute(Self::DECORATION);

        if weight.is_none() && style.is_none() && decoration.is_none() {
            return None;
        }
        Some(Self {
            weight: weight.unwrap_or("normal").to_string(),
            style: style.unwrap_or("normal").to_string(),
            decoration: decoration.unwrap_or("").to_string(),
        })
    }
}

/// Split current font-style tokens into the legacy attributes.
///
/// Absent or empty tokens produce no attributes at all.
pub fn decompose_font_style(tokens: Option<&[String]>) -> Option<LegacyFontStyle> {
    let tokens = tokens.filter(|t| !t.is_empty())?;
    let has = |token: &str| tokens.iter().any(|t| t == token);

    let mut decorations = Vec::new();
    if has("underline") {
        decorations.push("underline");
    }
    if has("linethrough") {
        decorations.push("line-through");
    }

    Some(LegacyFontStyle {
        weight: if has("bold") { "bold" } else { "normal" }.to_string(),
        style: if has("italic") { "italic" } else { "normal" }.to_string(),
        decoration: decorations.join(" "),
    })
}

/// Rebuild current font-style tokens from the legacy attributes.
pub fn compose_font_style(legacy: Option<&LegacyFontStyle>) -> Option<Vec<String>> {
    let legacy = legacy?;
    let mut tokens = Vec::new();

    if legacy.weight == "bold" {
        tokens.push("bold".to_string());
    }
    if legacy.style == "italic" {
        tokens.push("italic".to_string());
    }
    for decoration in legacy.decoration.split_whitespace() {
        match decoration {
            "underline" => tokens.push("underline".to_string()),
            "line-through" => tokens.push("linethrough".to_string()),
            _ => {}
        }
    }
    Some(tokens)
}

/// `left|center|right` to `start|middle|end`.
pub fn text_align_to_legacy(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

/// `start|middle|end` to `left|center|right`. Anything else is `left`.
pub fn text_align_from_legacy(anchor: &str) -> TextAlign {
    match anchor {
        "middle" => TextAlign::Center,
        "end" => TextAlign::Right,
        _ => TextAlign::Left,
    }
}

/// `top|middle|bottom` to `top|center|bottom`; absent is `""`.
pub fn vertical_align_to_legacy(align: Option<VerticalAlign>) -> &'static str {
    match align {
        None => "",
        Some(VerticalAlign::Top) => "top",
        Some(VerticalAlign::Middle) => "center",
        Some(VerticalAlign::Bottom) => "bottom",
    }
}

/// Inverse of [`vertical_align_to_legacy`]. Unknown keywords are `top`.
pub fn vertical_align_from_legacy(valign: &str) -> Option<VerticalAlign> {
    match valign.trim() {
        "" => None,
        "center" => Some(VerticalAlign::Middle),
        "bottom" => Some(VerticalAlign::Bottom),
        _ => Some(VerticalAlign::Top),
    }
}

/// Blank line height is written as `""`.
pub fn line_height_to_legacy(line_height: Spacing) -> String {
    line_height.0.map(format_decimal).unwrap_or_default()
}

/// `None` when the text is neither blank nor a number.
pub fn line_height_from_legacy(text: &str) -> Option<Spacing> {
    if is_blank(Some(text)) {
        return Some(Spacing::blank());
    }
    parse_decimal(text).map(Spacing::of)
}

/// Blank letter spacing is written as `auto`.
pub fn letter_spacing_to_legacy(letter_spacing: Spacing) -> String {
    letter_spacing
        .0
        .map(format_decimal)
        .unwrap_or_else(|| "auto".to_string())
}

/// `None` when the text is neither `auto`, blank nor a number.
pub fn letter_spacing_from_legacy(kerning: &str) -> Option<Spacing> {
    if kerning.trim() == "auto" || is_blank(Some(kerning)) {
        return Some(Spacing::blank());
    }
    parse_decimal(kerning).map(Spacing::of)
}

/// `top|middle|bottom` to `top|center|bottom`.
pub fn position_y_to_legacy(position: ImagePositionY) -> &'static str {
    match position {
        ImagePositionY::Top => "top",
        ImagePositionY::Middle => "center",
        ImagePositionY::Bottom => "bottom",
    }
}

/// Inverse of [`position_y_to_legacy`]. Unknown keywords are `top`.
pub fn position_y_from_legacy(position: &str) -> ImagePositionY {
    match position {
        "center" => ImagePositionY::Middle,
        "bottom" => ImagePositionY::Bottom,
        _ => ImagePositionY::Top,
    }
}

pub fn display_to_legacy(display: bool) -> &'static str {
    if display {
        "true"
    } else {
        "false"
    }
}

/// Only an explicit `"false"` hides a shape.
pub fn display_from_legacy(display: Option<&str>) -> bool {
    display.map_or(true, |d| d.trim() != "false")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_decompose_font_style() {
        let style = decompose_font_style(Some(&tokens(&["bold", "underline"]))).unwrap();
        assert_eq!(style.weight, "bold");
        assert_eq!(style.style, "normal");
        assert_eq!(style.decoration, "underline");

        let style =
            decompose_font_style(Some(&tokens(&["italic", "linethrough", "underline"]))).unwrap();
        assert_eq!(style.weight, "normal");
        assert_eq!(style.style, "italic");
        assert_eq!(style.decoration, "underline line-through");
    }

    #[test]
    fn test_decompose_absent_writes_nothing() {
        assert_eq!(decompose_font_style(None), None);

        let mut element = Element::new("g");
        if let Some(style) = decompose_font_style(None) {
            style.apply(&mut element);
        }
        assert!(element.attributes.is_empty());
        assert_eq!(LegacyFontStyle::read(&element), None);
    }

    #[test]
    fn test_empty_tokens_write_nothing() {
        assert_eq!(decompose_font_style(Some(&[])), None);

        let plain = LegacyFontStyle {
            weight: "normal".to_string(),
            style: "normal".to_string(),
            decoration: "".to_string(),
        };
        assert_eq!(compose_font_style(Some(&plain)), Some(vec![]));
    }

    #[test]
    fn test_compose_is_inverse() {
        let original = tokens(&["bold", "italic", "underline", "linethrough"]);
        let legacy = decompose_font_style(Some(&original)).unwrap();

        let mut element = Element::new("g");
        legacy.apply(&mut element);
        let read = LegacyFontStyle::read(&element);
        assert_eq!(compose_font_style(read.as_ref()), Some(original));
    }

    #[test]
    fn test_text_align_defaults() {
        assert_eq!(text_align_from_legacy("justify"), TextAlign::Left);
        assert_eq!(text_align_from_legacy(""), TextAlign::Left);
        assert_eq!(text_align_from_legacy("middle"), TextAlign::Center);
        assert_eq!(text_align_from_legacy("end"), TextAlign::Right);
        assert_eq!(text_align_to_legacy(TextAlign::parse("justify")), "start");
        assert_eq!(text_align_to_legacy(TextAlign::Right), "end");
    }

    #[test]
    fn test_vertical_align() {
        assert_eq!(vertical_align_to_legacy(None), "");
        assert_eq!(vertical_align_to_legacy(Some(VerticalAlign::Middle)), "center");
        assert_eq!(vertical_align_from_legacy(""), None);
        assert_eq!(vertical_align_from_legacy("center"), Some(VerticalAlign::Middle));
        assert_eq!(vertical_align_from_legacy("baseline"), Some(VerticalAlign::Top));
    }

    #[test]
    fn test_spacing_mappers() {
        assert_eq!(line_height_to_legacy(Spacing::blank()), "");
        assert_eq!(line_height_to_legacy(Spacing::of(1.5)), "1.5");
        assert_eq!(line_height_from_legacy(" "), Some(Spacing::blank()));
        assert_eq!(line_height_from_legacy("18"), Some(Spacing::of(18.0)));
        assert_eq!(line_height_from_legacy("tall"), None);

        assert_eq!(letter_spacing_to_legacy(Spacing::blank()), "auto");
        assert_eq!(letter_spacing_to_legacy(Spacing::of(2.0)), "2");
        assert_eq!(letter_spacing_from_legacy("auto"), Some(Spacing::blank()));
        assert_eq!(letter_spacing_from_legacy("0.5"), Some(Spacing::of(0.5)));
    }

    #[test]
    fn test_position_y_and_display() {
        for position in [
            ImagePositionY::Top,
            ImagePositionY::Middle,
            ImagePositionY::Bottom,
        ] {
            assert_eq!(
                position_y_from_legacy(position_y_to_legacy(position)),
                position
            );
        }
        assert_eq!(position_y_to_legacy(ImagePositionY::Middle), "center");

        assert!(display_from_legacy(None));
        assert!(display_from_legacy(Some("true")));
        assert!(display_from_legacy(Some("")));
        assert!(!display_from_legacy(Some("false")));
        assert_eq!(display_to_legacy(false), "false");
    }
}
