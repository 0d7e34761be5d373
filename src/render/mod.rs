//! Rendering module for writing converted documents.

mod json;

pub use json::{to_json, JsonFormat};
