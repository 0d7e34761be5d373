//! Document model types for both layout schema generations.
//!
//! The current schema is fully typed here. The legacy schema keeps its
//! shapes in markup, so only its document envelope is modelled; the shape
//! codec in [`crate::codec`] maps between the two.

mod document;
mod legacy;
mod list;
mod shape;
mod style;
pub mod value;

pub use document::{LayoutDocument, Margins, PageConfig};
pub use legacy::{LegacyConfig, LegacyDocument, LegacyPage};
pub use list::{ListShape, Section, SectionName, Translate};
pub use shape::{
    DatetimeFormat, EllipseShape, FormatType, ImageBlockShape, ImageData, ImageShape, LineShape,
    NumberFormat, PaddingFormat, PageNumberShape, RectShape, Shape, ShapeKind, TextBlockShape,
    TextFormat, TextShape,
};
pub use style::{
    ImageBlockStyle, ImagePositionY, LineStyle, PageNumberStyle, ShapeStyle, TextAlign, TextStyle,
    VerticalAlign,
};
pub use value::{Coordinate, Spacing};
