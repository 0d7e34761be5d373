//! Error types for tlfconv library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tlfconv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting layout documents.
///
/// Every variant is fatal: a conversion either returns a complete target
/// document or exactly one of these.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source file does not exist.
    #[error("No such file - {}", .0.display())]
    MissingInputFile(PathBuf),

    /// The document text is not valid JSON or does not match the schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is neither a legacy nor a current layout.
    #[error("Unknown file format: not a layout document")]
    UnknownFormat,

    /// The source version is outside the upgradable range.
    #[error("Unupgradable version: {0}")]
    UnupgradableVersion(String),

    /// A shape carries a class or type this converter does not know.
    #[error("Unknown item type: {0}")]
    UnknownShapeType(String),

    /// An embedded metadata record could not be used.
    #[error("Malformed metadata: {0}")]
    MalformedMetadata(String),

    /// The vector markup is not well-formed.
    #[error("Markup error: {0}")]
    Markup(String),

    /// An attribute value could not be interpreted.
    #[error("Invalid value {value:?} for `{attribute}` of item {shape}")]
    InvalidAttribute {
        /// Id of the shape carrying the attribute
        shape: String,
        /// Attribute name
        attribute: String,
        /// Raw attribute value
        value: String,
    },

    /// A list was found inside a list section.
    #[error("List {0} is nested inside another list")]
    NestedList(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Markup(err.to_string())
    }
}

impl Error {
    /// Build an [`Error::InvalidAttribute`].
    pub(crate) fn invalid_attribute(
        shape: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Error::InvalidAttribute {
            shape: shape.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnupgradableVersion("0.7.9".to_string());
        assert_eq!(err.to_string(), "Unupgradable version: 0.7.9");

        let err = Error::MissingInputFile(PathBuf::from("path/to/layout.tlf"));
        assert_eq!(err.to_string(), "No such file - path/to/layout.tlf");

        let err = Error::invalid_attribute("rect1", "x", "abc");
        assert_eq!(
            err.to_string(),
            "Invalid value \"abc\" for `x` of item rect1"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
