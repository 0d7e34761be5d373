//! Schema conversion between the legacy and current layout generations.
//!
//! # Example
//!
//! ```no_run
//! use tlfconv::convert::{downgrade, upgrade, UpgradeOptions};
//! use tlfconv::LegacyDocument;
//!
//! fn main() -> tlfconv::Result<()> {
//!     let json = std::fs::read_to_string("legacy.tlf")?;
//!     let legacy = LegacyDocument::from_json(&json)?;
//!
//!     let current = upgrade(&legacy, &UpgradeOptions::default())?;
//!     println!("{} items", current.item_count());
//!
//!     let back = downgrade(&current)?;
//!     println!("{}", back.version);
//!     Ok(())
//! }
//! ```

mod options;

pub use options::UpgradeOptions;

use crate::codec::{self, DecodeContext};
use crate::error::{Error, Result};
use crate::markup::{self, metadata};
use crate::model::value::{format_decimal, is_blank, parse_decimal};
use crate::model::{LayoutDocument, LegacyConfig, LegacyDocument, LegacyPage, Margins, PageConfig};
use semver::Version;

/// Version written into upgraded documents.
pub const DESTINATION_VERSION: &str = "0.9.0";

/// Version written into downgraded documents.
pub const LEGACY_VERSION: &str = "0.8.2";

/// Upgradable versions are `0.8.0 <= v < 0.9.0`.
const MIN_UPGRADABLE: Version = Version::new(0, 8, 0);
const MAX_UPGRADABLE: Version = Version::new(0, 9, 0);

const SVG_OPEN: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" version="1.1">"#,
    r#"<g class="canvas">"#
);
const SVG_CLOSE: &str = "</g></svg>";

/// Whether a legacy document of this version can be upgraded.
///
/// Versions compare semantically, so `0.8.10` is inside the range.
pub fn is_upgradable(version: &str) -> bool {
    match Version::parse(version.trim()) {
        Ok(v) => v >= MIN_UPGRADABLE && v < MAX_UPGRADABLE,
        Err(_) => false,
    }
}

/// Upgrade a legacy document to the current schema.
pub fn upgrade(legacy: &LegacyDocument, options: &UpgradeOptions) -> Result<LayoutDocument> {
    if !is_upgradable(&legacy.version) {
        return Err(Error::UnupgradableVersion(legacy.version.clone()));
    }
    log::debug!("Upgrading layout {:?} from {}", legacy.config.title, legacy.version);

    let report = page_from_legacy(&legacy.config.page)?;
    let mut document = LayoutDocument::new(DESTINATION_VERSION, report);
    document.title = legacy.config.title.clone();

    if legacy.svg.trim().is_empty() {
        log::warn!("Legacy layout has no markup, upgrading without items");
        return Ok(document);
    }

    let embedded = metadata::extract(&legacy.svg)?;
    let root = markup::parse(&embedded.markup)?;
    if root.name != "svg" {
        return Err(Error::Markup(format!(
            "root element is <{}>, expected <svg>",
            root.name
        )));
    }

    if let Some(canvas) = root.find_child("g") {
        let ctx = DecodeContext::new(&embedded.records, options);
        document.items = codec::decode_children(canvas, &ctx)?;
    }

    log::debug!("Upgraded {} items", document.item_count());
    Ok(document)
}

/// Downgrade a current document to the legacy schema.
///
/// Every top-level shape is written as its metadata record followed by its
/// markup element.
pub fn downgrade(document: &LayoutDocument) -> Result<LegacyDocument> {
    log::debug!("Downgrading layout {:?} from {}", document.title, document.version);

    let mut svg = String::from(SVG_OPEN);
    for item in &document.items {
        let encoded = codec::encode_shape(item)?;
        svg.push_str(&metadata::encode(&encoded.record)?);
        svg.push_str(&encoded.element.to_markup());
    }
    svg.push_str(SVG_CLOSE);

    Ok(LegacyDocument {
        version: LEGACY_VERSION.to_string(),
        config: LegacyConfig {
            title: document.title.clone(),
            page: page_to_legacy(&document.report),
        },
        svg,
    })
}

fn page_from_legacy(page: &LegacyPage) -> Result<PageConfig> {
    let number = |key: &str, text: &str| -> Result<f64> {
        if is_blank(Some(text)) {
            return Ok(0.0);
        }
        parse_decimal(text).ok_or_else(|| Error::invalid_attribute("config.page", key, text))
    };

    Ok(PageConfig {
        paper_type: page.paper_type.clone(),
        width: number("width", &page.width)?,
        height: number("height", &page.height)?,
        orientation: page.orientation.clone(),
        margin: Margins::new(
            number("margin-top", &page.margin_top)?,
            number("margin-right", &page.margin_right)?,
            number("margin-bottom", &page.margin_bottom)?,
            number("margin-left", &page.margin_left)?,
        ),
    })
}

fn page_to_legacy(report: &PageConfig) -> LegacyPage {
    LegacyPage {
        paper_type: report.paper_type.clone(),
        orientation: report.orientation.clone(),
        width: format_decimal(report.width),
        height: format_decimal(report.height),
        margin_top: format_decimal(report.margin.top),
        margin_right: format_decimal(report.margin.right),
        margin_bottom: format_decimal(report.margin.bottom),
        margin_left: format_decimal(report.margin.left),
    }
}
