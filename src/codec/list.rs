//! List section composer.
//!
//! A legacy list is split across two places: the `g.s-list` element holds
//! the outer bounds and one `g.s-list-<section>` group of items per section,
//! while the list's metadata record holds everything else (section heights,
//! offsets, enabled flags, content height, page break).
//!
//! Section offsets differ between the generations. Legacy offsets are
//! relative to the section's own slot; current offsets include the height
//! of the sections rendered above:
//!
//! * `page-footer.translate.y += detail.height` when page-footer is enabled
//! * `footer.translate.y += detail.height + page-footer.height` when footer is
//!   enabled, where page-footer only contributes while it is enabled
//!
//! An absent detail contributes height `0`.

use super::style::{display_from_legacy, display_to_legacy};
use super::{
    decode_children, encode_element, legacy_element, DecodeContext, EncodedShape,
    LegacyAttributes,
};
use crate::error::{Error, Result};
use crate::markup::Element;
use crate::model::value::{format_decimal, is_blank, parse_decimal};
use crate::model::{Coordinate, ListShape, Section, SectionName, ShapeKind, Translate};
use serde_json::{json, Map, Value};

/// Decode a `g.s-list` element with its metadata record.
pub fn decode_list(element: &Element, ctx: &DecodeContext<'_>) -> Result<ListShape> {
    let attrs = LegacyAttributes::new(element);
    let id = attrs.id();
    let record = ctx.records.get(&id).ok_or_else(|| {
        Error::MalformedMetadata(format!("list {:?} has no shape record", id))
    })?;

    let mut list = ListShape::new(id.as_str());
    list.display = display_from_legacy(
        attrs
            .get("x-display")
            .or_else(|| record.get("display").and_then(Value::as_str)),
    );
    list.content_height = record_number(record.get("content-height"), &id, "content-height")?;
    list.auto_page_break = record_flag(record.get("page-break"));

    let numeric = ctx.options.numeric_list_bounds;
    list.x = read_bound(&attrs, "x", numeric)?;
    list.y = read_bound(&attrs, "y", numeric)?;
    list.width = read_bound(&attrs, "width", numeric)?;
    list.height = read_bound(&attrs, "height", numeric)?;

    let section_ctx = ctx.section();
    for name in SectionName::ALL {
        *list.section_mut(name) = decode_section(name, element, record, &id, &section_ctx)?;
    }

    apply_stacking(&mut list);
    Ok(list)
}

fn decode_section(
    name: SectionName,
    list_element: &Element,
    record: &Value,
    id: &str,
    ctx: &DecodeContext<'_>,
) -> Result<Option<Section>> {
    let section_record = match record.get(name.as_str()) {
        Some(value) if value.as_object().map_or(false, |m| !m.is_empty()) => value,
        _ => return Ok(None),
    };

    let height_key = format!("{}.height", name);
    let mut section = Section::new(record_number(section_record.get("height"), id, &height_key)?);

    if let Some(translate) = section_record.get("translate") {
        section.translate = Translate::new(
            record_number(translate.get("x"), id, &format!("{}.translate.x", name))?,
            record_number(translate.get("y"), id, &format!("{}.translate.y", name))?,
        );
    }

    if let Some(group) = list_element.find_child_by_class(&section_class(name)) {
        section.items = decode_children(group, ctx)?;
    }

    if name.has_enabled_flag() {
        section.enabled = Some(record_flag(record.get(&enabled_key(name))));
    }

    Ok(Some(section))
}

fn read_bound(attrs: &LegacyAttributes<'_>, key: &str, numeric: bool) -> Result<Option<Coordinate>> {
    match attrs.get(key) {
        None => Ok(None),
        Some(_) if numeric => Ok(Some(Coordinate::Number(attrs.number(key)?))),
        Some(text) => Ok(Some(Coordinate::Text(text.to_string()))),
    }
}

/// Encode a list as its `g.s-list` element and metadata record.
pub fn encode_list(list: &ListShape) -> Result<EncodedShape> {
    let mut element = legacy_element("g", ShapeKind::List, &list.id, list.display);
    for (key, bound) in [
        ("x", &list.x),
        ("y", &list.y),
        ("width", &list.width),
        ("height", &list.height),
    ] {
        if let Some(bound) = bound {
            element.set_attribute(key, bound.to_decimal_text());
        }
    }

    let mut record = Map::new();
    record.insert("type".to_string(), json!(ShapeKind::List.legacy_class()));
    record.insert("id".to_string(), json!(list.id));
    record.insert("display".to_string(), json!(display_to_legacy(list.display)));
    record.insert(
        "content-height".to_string(),
        json!(format_decimal(list.content_height)),
    );
    record.insert(
        "page-break".to_string(),
        json!(flag_text(list.auto_page_break)),
    );

    for name in SectionName::ALL {
        let section = list.section(name);

        if name.has_enabled_flag() {
            record.insert(enabled_key(name), json!(flag_text(is_enabled(section))));
        }

        let section = match section {
            Some(section) => section,
            None => {
                record.insert(name.as_str().to_string(), json!({}));
                continue;
            }
        };

        let x = format_decimal(section.translate.x);
        let y = format_decimal(section.translate.y - stacking_offset(list, name));

        let mut group = Element::new("g")
            .with_attribute("class", section_class(name))
            .with_attribute("transform", format!("translate({}, {})", x, y));
        for item in &section.items {
            group.push_element(encode_element(item)?);
        }
        element.push_element(group);

        record.insert(
            name.as_str().to_string(),
            json!({
                "height": format_decimal(section.height),
                "translate": {"x": x, "y": y},
            }),
        );
    }

    Ok(EncodedShape {
        record: Value::Object(record),
        element,
    })
}

/// Add the stacking offsets to legacy section offsets.
pub fn apply_stacking(list: &mut ListShape) {
    shift_sections(list, 1.0);
}

/// Remove the stacking offsets from current section offsets.
pub fn remove_stacking(list: &mut ListShape) {
    shift_sections(list, -1.0);
}

fn shift_sections(list: &mut ListShape, sign: f64) {
    let page_footer = stacking_offset(list, SectionName::PageFooter);
    let footer = stacking_offset(list, SectionName::Footer);

    if let Some(section) = list.page_footer.as_mut() {
        section.translate.y += sign * page_footer;
    }
    if let Some(section) = list.footer.as_mut() {
        section.translate.y += sign * footer;
    }
}

/// Vertical distance added to a section's legacy offset.
///
/// Depends only on section heights and enabled flags, never on offsets, so
/// adding and removing it cancel out.
pub fn stacking_offset(list: &ListShape, name: SectionName) -> f64 {
    let detail_height = list.detail.as_ref().map_or(0.0, |s| s.height);
    let page_footer = list.page_footer.as_ref().filter(|s| s.is_enabled());

    match name {
        SectionName::Header | SectionName::Detail => 0.0,
        SectionName::PageFooter if page_footer.is_some() => detail_height,
        SectionName::Footer if is_enabled(list.footer.as_ref()) => {
            detail_height + page_footer.map_or(0.0, |s| s.height)
        }
        _ => 0.0,
    }
}

fn is_enabled(section: Option<&Section>) -> bool {
    section.map_or(false, Section::is_enabled)
}

fn section_class(name: SectionName) -> String {
    format!("s-list-{}", name)
}

fn enabled_key(name: SectionName) -> String {
    format!("{}-enabled", name)
}

fn flag_text(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}

/// Record flags are the text `"true"`; a JSON `true` is accepted as well.
fn record_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => text.trim() == "true",
        _ => false,
    }
}

/// Record numbers may be decimal text or JSON numbers; missing is `0`.
fn record_number(value: Option<&Value>, shape: &str, key: &str) -> Result<f64> {
    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| Error::invalid_attribute(shape, key, number.to_string())),
        Some(Value::String(text)) if is_blank(Some(text)) => Ok(0.0),
        Some(Value::String(text)) => {
            parse_decimal(text).ok_or_else(|| Error::invalid_attribute(shape, key, text.as_str()))
        }
        Some(other) => Err(Error::invalid_attribute(shape, key, other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::UpgradeOptions;
    use crate::markup::{self, metadata};
    use crate::model::Shape;

    const LIST_MARKUP: &str = concat!(
        r#"<g class="s-list" x-id="rows" x="20" y="100.5" width="555" height="300">"#,
        r#"<g class="s-list-detail" transform="translate(0, 0)">"#,
        r#"<rect class="s-rect" x-id="" x="20" y="100" width="555" height="50"/>"#,
        r#"</g>"#,
        r#"<g class="s-list-page-footer" transform="translate(0, 0)"/>"#,
        r#"<g class="s-list-footer" transform="translate(0, 0)"/>"#,
        r#"</g>"#
    );

    fn stacked_record() -> Value {
        json!({
            "type": "s-list", "id": "rows", "display": "true",
            "content-height": "255", "page-break": "true",
            "header-enabled": "false", "page-footer-enabled": "true", "footer-enabled": "true",
            "header": {},
            "detail": {"height": "50", "translate": {"x": "0", "y": "0"}},
            "page-footer": {"height": 10, "translate": {"x": 0, "y": 0}},
            "footer": {"height": "5", "translate": {"x": "0", "y": "0"}}
        })
    }

    fn decode_with(markup_text: &str, record: Value, options: &UpgradeOptions) -> Result<ListShape> {
        let element = markup::parse(markup_text).unwrap();
        let mut records = metadata::ShapeRecords::new();
        records.insert("rows".to_string(), record);
        decode_list(&element, &DecodeContext::new(&records, options))
    }

    fn decode(record: Value) -> Result<ListShape> {
        decode_with(LIST_MARKUP, record, &UpgradeOptions::default())
    }

    #[test]
    fn test_stacking_on_decode() {
        let list = decode(stacked_record()).unwrap();
        assert_eq!(list.page_footer.as_ref().unwrap().translate.y, 50.0);
        // detail height plus the enabled page-footer's height
        assert_eq!(list.footer.as_ref().unwrap().translate.y, 60.0);
        assert_eq!(list.detail.as_ref().unwrap().translate.y, 0.0);
        assert_eq!(list.detail.as_ref().unwrap().items.len(), 1);
        assert_eq!(list.content_height, 255.0);
        assert!(list.auto_page_break);
    }

    #[test]
    fn test_disabled_page_footer_does_not_stack() {
        let mut record = stacked_record();
        record["page-footer-enabled"] = json!("false");
        let list = decode(record).unwrap();

        let page_footer = list.page_footer.as_ref().unwrap();
        assert_eq!(page_footer.enabled, Some(false));
        assert_eq!(page_footer.translate.y, 0.0);
        assert_eq!(list.footer.as_ref().unwrap().translate.y, 50.0);
    }

    #[test]
    fn test_absent_detail_contributes_nothing() {
        let mut record = stacked_record();
        record["detail"] = json!({});
        let list = decode(record).unwrap();
        assert!(list.detail.is_none());
        assert_eq!(list.page_footer.as_ref().unwrap().translate.y, 0.0);
        assert_eq!(list.footer.as_ref().unwrap().translate.y, 10.0);
    }

    #[test]
    fn test_absent_vs_disabled_header() {
        let list = decode(stacked_record()).unwrap();
        assert!(list.header.is_none());
        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["header"], json!({}));

        let mut record = stacked_record();
        record["header"] = json!({"height": "30", "translate": {"x": "0", "y": "0"}});
        let list = decode(record).unwrap();
        let header = list.header.as_ref().unwrap();
        assert_eq!(header.enabled, Some(false));
        assert_eq!(header.height, 30.0);
        assert!(header.items.is_empty());

        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["header"]["enabled"], false);
        assert!(value["detail"].get("enabled").is_none());
    }

    #[test]
    fn test_bounds_modes() {
        let list = decode(stacked_record()).unwrap();
        assert_eq!(list.y, Some(Coordinate::Text("100.5".to_string())));

        let numeric = UpgradeOptions::new().with_numeric_list_bounds(true);
        let list = decode_with(LIST_MARKUP, stacked_record(), &numeric).unwrap();
        assert_eq!(list.y, Some(Coordinate::Number(100.5)));
        assert_eq!(list.width, Some(Coordinate::Number(555.0)));
    }

    #[test]
    fn test_missing_record_is_malformed() {
        let element = markup::parse(LIST_MARKUP).unwrap();
        let records = metadata::ShapeRecords::new();
        let options = UpgradeOptions::default();
        let err = decode_list(&element, &DecodeContext::new(&records, &options)).unwrap_err();
        assert!(matches!(err, Error::MalformedMetadata(_)));
    }

    #[test]
    fn test_nested_list_is_rejected() {
        let markup_text = LIST_MARKUP.replace(
            r#"<rect class="s-rect" x-id="" x="20" y="100" width="555" height="50"/>"#,
            r#"<g class="s-list" x-id="inner"/>"#,
        );
        let err = decode_with(&markup_text, stacked_record(), &UpgradeOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NestedList(ref id) if id == "inner"));
    }

    #[test]
    fn test_encode_removes_stacking() {
        let list = decode(stacked_record()).unwrap();
        let encoded = encode_list(&list).unwrap();

        assert_eq!(encoded.record["page-footer"]["translate"]["y"], "0");
        assert_eq!(encoded.record["footer"]["translate"]["y"], "0");
        assert_eq!(encoded.record["detail"]["height"], "50");
        assert_eq!(encoded.record["header"], json!({}));
        assert_eq!(encoded.record["header-enabled"], "false");
        assert_eq!(encoded.record["footer-enabled"], "true");
        assert_eq!(encoded.record["page-break"], "true");

        let footer = encoded.element.find_child_by_class("s-list-footer").unwrap();
        assert_eq!(footer.attribute("transform"), Some("translate(0, 0)"));
        assert_eq!(encoded.element.attribute("y"), Some("100.5"));
    }

    #[test]
    fn test_encode_then_decode_is_identity() {
        let list = decode(stacked_record()).unwrap();
        let encoded = encode_list(&list).unwrap();
        let markup_text = encoded.element.to_markup();
        let back = decode_with(&markup_text, encoded.record, &UpgradeOptions::default()).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn test_encode_rejects_nested_list() {
        let mut list = ListShape::new("outer");
        let mut detail = Section::new(10.0);
        detail.items.push(Shape::List(ListShape::new("inner")));
        list.detail = Some(detail);
        assert!(matches!(encode_list(&list), Err(Error::NestedList(ref id)) if id == "inner"));
    }

    #[test]
    fn test_stacking_is_reversible() {
        let mut list = decode(stacked_record()).unwrap();
        let before = list.clone();
        remove_stacking(&mut list);
        assert_eq!(list.footer.as_ref().unwrap().translate.y, 0.0);
        apply_stacking(&mut list);
        assert_eq!(list, before);
    }

    #[test]
    fn test_record_number_rejects_garbage() {
        let mut record = stacked_record();
        record["content-height"] = json!("tall");
        let err = decode(record).unwrap_err();
        assert!(matches!(err, Error::InvalidAttribute { ref attribute, .. } if attribute == "content-height"));
    }
}
