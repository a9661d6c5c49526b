//! Minimal element tree used at the parse boundary.
//!
//! Element and attribute names are stored by local name, so `p:sp` in a
//! slide and `dsp:sp` in a diagram drawing look the same to the typed
//! conversions in [`crate::node::parse`].

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};

use crate::error::{Result, ShapeError};

/// A parsed XML element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Local name, without namespace prefix
    pub name: String,
    /// Attributes by local name, in document order
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Concatenated text content directly inside this element
    pub text: String,
}

impl Element {
    /// Get an attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow a chain of child names.
    pub fn path(&self, names: &[&str]) -> Option<&Element> {
        names.iter().try_fold(self, |el, name| el.child(name))
    }

    /// Depth-first search for the first descendant with the given name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let name = std::str::from_utf8(e.local_name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let local = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
            let raw = std::str::from_utf8(&attr.value)?;
            let value = quick_xml::escape::unescape(raw)
                .map_err(|e| ShapeError::Xml(e.to_string()))?
                .into_owned();
            attributes.push((local, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    /// Strip surrounding whitespace once all text segments are in.
    fn close(mut self) -> Self {
        let trimmed = self.text.trim();
        if trimmed.len() != self.text.len() {
            self.text = trimmed.to_string();
        }
        self
    }
}

/// Expand a `&name;` or `&#N;` reference appearing in text content.
fn push_reference(text: &mut String, r: &BytesRef<'_>) -> Result<()> {
    if let Some(ch) = r.resolve_char_ref()? {
        text.push(ch);
        return Ok(());
    }
    let name = std::str::from_utf8(r.as_ref())?;
    match resolve_predefined_entity(name) {
        Some(value) => {
            text.push_str(value);
            Ok(())
        },
        None => Err(ShapeError::Xml(format!("unknown entity reference &{};", name))),
    }
}

/// Parse a complete XML document and return its root element.
pub fn parse_document(xml: &[u8]) -> Result<Element> {
    // Text is trimmed per element on close, not per event.
    let mut reader = Reader::from_reader(xml);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(Element::from_start(e)?);
            },
            Ok(Event::Empty(ref e)) => {
                let element = Element::from_start(e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            },
            Ok(Event::Text(ref t)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(std::str::from_utf8(t.as_ref())?);
                }
            },
            Ok(Event::GeneralRef(ref r)) => {
                if let Some(current) = stack.last_mut() {
                    push_reference(&mut current.text, r)?;
                }
            },
            Ok(Event::End(_)) => {
                if let Some(element) = stack.pop().map(Element::close) {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ShapeError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    Err(ShapeError::Xml("document has no root element".to_string()))
}
