//! # tlfconv
//!
//! Report-layout schema converter for Rust.
//!
//! This library converts report layout (`.tlf`) documents between the legacy
//! 0.8.x schema, which keeps its shapes in SVG markup with embedded JSON
//! metadata, and the current 0.9.x schema, a flat typed item list.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tlfconv::{upgrade_file, render, JsonFormat};
//!
//! fn main() -> tlfconv::Result<()> {
//!     // Upgrade a legacy layout
//!     let doc = upgrade_file("invoice.tlf")?;
//!
//!     // Write it back out as JSON
//!     let json = render::to_json(&doc, JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Both directions**: upgrade legacy layouts, downgrade current ones
//! - **Lists**: section composition, enabled flags and stacking offsets
//! - **Strict**: unknown shapes and malformed metadata abort the conversion
//! - **Safe markup parsing**: no external entities, no I/O

pub mod codec;
pub mod convert;
pub mod detect;
pub mod error;
pub mod markup;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use convert::{
    downgrade, is_upgradable, upgrade, UpgradeOptions, DESTINATION_VERSION, LEGACY_VERSION,
};
pub use detect::{
    detect_generation, detect_generation_from_path, detect_generation_from_str, inspect_path,
    inspect_str, Generation, LayoutInfo,
};
pub use error::{Error, Result};
pub use model::{
    Coordinate, LayoutDocument, LegacyDocument, ListShape, Margins, PageConfig, Section,
    SectionName, Shape, ShapeKind, Spacing, TextStyle,
};
pub use render::JsonFormat;

use std::fs;
use std::path::Path;

/// Upgrade legacy layout JSON text with default options.
///
/// # Example
///
/// ```no_run
/// use tlfconv::upgrade_str;
///
/// let json = std::fs::read_to_string("legacy.tlf").unwrap();
/// let doc = upgrade_str(&json).unwrap();
/// println!("Items: {}", doc.item_count());
/// ```
pub fn upgrade_str(json: &str) -> Result<LayoutDocument> {
    upgrade_str_with_options(json, &UpgradeOptions::default())
}

/// Upgrade legacy layout JSON text with custom options.
pub fn upgrade_str_with_options(json: &str, options: &UpgradeOptions) -> Result<LayoutDocument> {
    let legacy = LegacyDocument::from_json(json)?;
    upgrade(&legacy, options)
}

/// Upgrade a legacy layout file.
///
/// # Arguments
///
/// * `path` - Path to the legacy `.tlf` file
///
/// # Returns
///
/// A `Result` containing the upgraded `LayoutDocument` or an error.
/// A missing file is reported as [`Error::MissingInputFile`].
pub fn upgrade_file<P: AsRef<Path>>(path: P) -> Result<LayoutDocument> {
    upgrade_file_with_options(path, &UpgradeOptions::default())
}

/// Upgrade a legacy layout file with custom options.
///
/// # Example
///
/// ```no_run
/// use tlfconv::{upgrade_file_with_options, UpgradeOptions};
///
/// let options = UpgradeOptions::new().with_numeric_list_bounds(true);
/// let doc = upgrade_file_with_options("legacy.tlf", &options).unwrap();
/// ```
pub fn upgrade_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &UpgradeOptions,
) -> Result<LayoutDocument> {
    upgrade_str_with_options(&read_source(path.as_ref())?, options)
}

/// Downgrade current layout JSON text.
pub fn downgrade_str(json: &str) -> Result<LegacyDocument> {
    let document = LayoutDocument::from_json(json)?;
    downgrade(&document)
}

/// Downgrade a current layout file.
///
/// # Example
///
/// ```no_run
/// use tlfconv::{downgrade_file, render, JsonFormat};
///
/// let legacy = downgrade_file("current.tlf").unwrap();
/// let json = render::to_json(&legacy, JsonFormat::Pretty).unwrap();
/// std::fs::write("legacy.tlf", json).unwrap();
/// ```
pub fn downgrade_file<P: AsRef<Path>>(path: P) -> Result<LegacyDocument> {
    downgrade_str(&read_source(path.as_ref())?)
}

fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::MissingInputFile(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Builder for converting layout files.
///
/// # Example
///
/// ```no_run
/// use tlfconv::Tlfconv;
///
/// Tlfconv::new()
///     .with_numeric_list_bounds(true)
///     .upgrade("legacy.tlf")?
///     .save("current.tlf")?;
/// # Ok::<(), tlfconv::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tlfconv {
    upgrade_options: UpgradeOptions,
    format: JsonFormat,
}

impl Tlfconv {
    /// Create a new Tlfconv builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert list bounds to numbers when upgrading.
    pub fn with_numeric_list_bounds(mut self, numeric: bool) -> Self {
        self.upgrade_options = self.upgrade_options.with_numeric_list_bounds(numeric);
        self
    }

    /// Set the JSON output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Write compact JSON.
    pub fn compact(self) -> Self {
        self.with_format(JsonFormat::Compact)
    }

    /// Upgrade a legacy layout file.
    pub fn upgrade<P: AsRef<Path>>(self, path: P) -> Result<TlfconvResult<LayoutDocument>> {
        let document = upgrade_file_with_options(path, &self.upgrade_options)?;
        Ok(TlfconvResult {
            document,
            format: self.format,
        })
    }

    /// Downgrade a current layout file.
    pub fn downgrade<P: AsRef<Path>>(self, path: P) -> Result<TlfconvResult<LegacyDocument>> {
        let document = downgrade_file(path)?;
        Ok(TlfconvResult {
            document,
            format: self.format,
        })
    }
}

/// Result wrapper for a converted document.
#[derive(Debug, Clone)]
pub struct TlfconvResult<D> {
    /// The converted document
    pub document: D,
    format: JsonFormat,
}

impl<D: serde::Serialize> TlfconvResult<D> {
    /// Get the converted document.
    pub fn document(&self) -> &D {
        &self.document
    }

    /// Render as JSON in the configured format.
    pub fn to_json(&self) -> Result<String> {
        render::to_json(&self.document, self.format)
    }

    /// Write the JSON to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Consume and return the document.
    pub fn into_document(self) -> D {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_file() {
        let err = upgrade_file("does/not/exist.tlf").unwrap_err();
        assert!(matches!(err, Error::MissingInputFile(_)));
        assert_eq!(err.to_string(), "No such file - does/not/exist.tlf");

        let err = downgrade_file("does/not/exist.tlf").unwrap_err();
        assert!(matches!(err, Error::MissingInputFile(_)));
    }

    #[test]
    fn test_builder_defaults() {
        let builder = Tlfconv::new();
        assert!(!builder.upgrade_options.numeric_list_bounds);
        assert_eq!(builder.format, JsonFormat::Pretty);

        let builder = Tlfconv::new().with_numeric_list_bounds(true).compact();
        assert!(builder.upgrade_options.numeric_list_bounds);
        assert_eq!(builder.format, JsonFormat::Compact);
    }

    #[test]
    fn test_upgrade_str_rejects_current_layout() {
        let json = r#"{"version": "0.9.0", "report": {"paper-type": "A4", "orientation": "portrait"}, "items": []}"#;
        assert!(matches!(upgrade_str(json), Err(Error::Json(_))));
    }
}
