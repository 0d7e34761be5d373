//! Vector markup tree for the legacy schema.
//!
//! A minimal element tree over `quick-xml`: enough to walk shape elements,
//! read their (possibly namespaced) attributes and write them back. Parsing
//! never resolves external entities or fetches anything; undeclared entity
//! references are reported as errors.
//!
//! Markup carrying embedded metadata must go through [`metadata::extract`]
//! before [`parse`], because the metadata comments hold raw JSON.

pub mod metadata;

use crate::error::{Error, Result};
use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A node of the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Child element
    Element(Element),
    /// Text content (unescaped)
    Text(String),
    /// Comment content (verbatim, without `<!--`/`-->`)
    Comment(String),
}

/// A markup element with ordered attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Qualified element name
    pub name: String,

    /// Attributes in document order, values unescaped
    pub attributes: Vec<(String, String)>,

    /// Child nodes
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Set an attribute, replacing an existing value.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Get an attribute by qualified name (e.g. `xlink:href`).
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `class` attribute.
    pub fn class(&self) -> Option<&str> {
        self.attribute("class")
    }

    /// Append a child element.
    pub fn push_element(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Append a text node.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Append a comment node.
    pub fn push_comment(&mut self, comment: impl Into<String>) {
        self.children.push(Node::Comment(comment.into()));
    }

    /// Iterate over child elements, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First child element with the given name.
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.name == name)
    }

    /// First child element with the given class.
    pub fn find_child_by_class(&self, class: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.class() == Some(class))
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Serialize the element and its subtree.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_markup(out),
                Node::Text(t) => out.push_str(&escape(t.as_str())),
                Node::Comment(c) => {
                    out.push_str("<!--");
                    out.push_str(c);
                    out.push_str("-->");
                }
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

/// Parse markup text into its root element.
///
/// Whitespace-only text nodes are dropped, except inside `<text>` where every
/// character is content. Processing instructions, the XML declaration and
/// doctype are skipped.
pub fn parse(markup: &str) -> Result<Element> {
    let mut reader = Reader::from_str(markup);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::Markup(format!("at position {}: {}", reader.buffer_position(), e))
        })?;

        match event {
            Event::Start(ref e) => stack.push(element_from_start(e)?),
            Event::Empty(ref e) => {
                let element = element_from_start(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::Markup("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(ref t) => {
                if let Some(parent) = stack.last_mut() {
                    let raw = std::str::from_utf8(&**t)
                        .map_err(|e| Error::Markup(format!("invalid UTF-8 in text: {}", e)))?;
                    let text = unescape(raw)
                        .map_err(|e| Error::Markup(format!("invalid text {:?}: {}", raw, e)))?;
                    if !text.trim().is_empty() || parent.name == "text" {
                        parent.push_text(text.into_owned());
                    }
                }
            }
            Event::CData(ref t) => {
                if let Some(parent) = stack.last_mut() {
                    parent.push_text(String::from_utf8_lossy(&**t).into_owned());
                }
            }
            Event::Comment(ref t) => {
                if let Some(parent) = stack.last_mut() {
                    parent.push_comment(String::from_utf8_lossy(&**t).into_owned());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Markup(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| Error::Markup("no root element".to_string()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_element(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::Markup(format!(
            "multiple root elements (second is <{}>)",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn element_from_start(start: &BytesStart) -> Result<Element> {
    let name = String::from_utf8(start.name().as_ref().to_vec())
        .map_err(|_| Error::Markup("invalid UTF-8 in element name".to_string()))?;
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::Markup(format!("in <{}>: {}", element.name, e)))?;
        let key = String::from_utf8(attr.key.as_ref().to_vec())
            .map_err(|_| Error::Markup("invalid UTF-8 in attribute name".to_string()))?;
        let raw = std::str::from_utf8(&attr.value)
            .map_err(|_| Error::Markup(format!("invalid UTF-8 in attribute {}", key)))?;
        let value = unescape(raw)
            .map_err(|e| Error::Markup(format!("invalid value for {}: {}", key, e)))?;
        element.attributes.push((key, value.into_owned()));
    }

    Ok(element)
}
