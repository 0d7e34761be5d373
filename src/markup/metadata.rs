//! Embedded metadata carried in legacy markup comments.
//!
//! Legacy markup stores each shape's structured record as JSON inside a
//! `<!--SHAPE ... SHAPE-->` comment next to the shape element, and may wrap
//! plain markup in `<!--LAYOUT ... LAYOUT-->` comments. Neither form is
//! understood by a markup parser, so the channel is handled in two passes:
//! [`decode`] collects the records, then [`strip`] removes the record spans
//! and unwraps the layout spans, leaving plain markup for [`super::parse`].

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

const SHAPE_OPEN: &str = "<!--SHAPE";
const SHAPE_CLOSE: &str = "SHAPE-->";

static SHAPE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--SHAPE(.*?)SHAPE-->").expect("valid SHAPE span pattern"));

static LAYOUT_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--LAYOUT(.*?)LAYOUT-->").expect("valid LAYOUT span pattern"));

/// Shape records keyed by their `id`.
pub type ShapeRecords = HashMap<String, Value>;

/// Collect every shape record in the markup, keyed by the record's own `id`.
///
/// A later record with the same id replaces an earlier one.
pub fn decode(markup: &str) -> Result<ShapeRecords> {
    let mut records = ShapeRecords::new();

    for captures in SHAPE_SPAN.captures_iter(markup) {
        let raw = captures.get(1).map_or("", |m| m.as_str());
        let record: Value = serde_json::from_str(raw).map_err(|e| {
            Error::MalformedMetadata(format!("shape record is not valid JSON: {}", e))
        })?;

        let id = record
            .as_object()
            .ok_or_else(|| Error::MalformedMetadata("shape record is not an object".to_string()))?
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedMetadata("shape record has no string id".to_string()))?
            .to_string();

        if records.insert(id.clone(), record).is_some() {
            log::warn!("Duplicate shape record for id {:?}, keeping the last one", id);
        }
    }

    log::debug!("Decoded {} shape records", records.len());
    Ok(records)
}

/// Remove shape record spans and unwrap layout spans.
pub fn strip(markup: &str) -> String {
    let without_records = SHAPE_SPAN.replace_all(markup, "");
    LAYOUT_SPAN.replace_all(&without_records, "$1").into_owned()
}

/// Write a shape record span.
///
/// `-->` can only occur inside JSON strings, where it is written as
/// `--\u003e` so the comment cannot end early.
pub fn encode(record: &Value) -> Result<String> {
    let json = serde_json::to_string(record)?;
    Ok(format!(
        "{}{}{}",
        SHAPE_OPEN,
        json.replace("-->", "--\\u003e"),
        SHAPE_CLOSE
    ))
}

/// Markup split into its metadata records and plain markup.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedMetadata {
    /// Shape records keyed by id
    pub records: ShapeRecords,

    /// Markup with all metadata spans removed or unwrapped
    pub markup: String,
}

impl EmbeddedMetadata {
    /// Run both passes over legacy markup.
    pub fn extract(markup: &str) -> Result<Self> {
        let records = decode(markup)?;
        let markup = strip(markup);
        Ok(Self { records, markup })
    }

    /// Record for a shape id.
    pub fn record(&self, id: &str) -> Option<&Value> {
        self.records.get(id)
    }
}

/// Shorthand for [`EmbeddedMetadata::extract`].
pub fn extract(markup: &str) -> Result<EmbeddedMetadata> {
    EmbeddedMetadata::extract(markup)
}
