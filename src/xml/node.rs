//! Owned XML element tree built from `quick_xml` reader events

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::error::{EutilsError, Result};

/// A node of a parsed XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its attributes and children in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    fn from_start(start: &BytesStart) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(EutilsError::xml)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Child elements, skipping text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    pub fn has_child_elements(&self) -> bool {
        self.child_elements().next().is_some()
    }

    /// Concatenated text of the direct text children, trimmed
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            if let XmlNode::Text(t) = child {
                text.push_str(t);
            }
        }
        text.trim().to_string()
    }

    fn push_text(&mut self, text: &str) {
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }
}

/// Parse a complete document and return its root element
///
/// Whitespace-only text is dropped and character entities are expanded.
/// The declaration, comments, processing instructions and DOCTYPE are skipped.
///
/// # Errors
///
/// `EutilsError::XmlParseError` when the input is not a well-formed document
/// with exactly one root element.
pub fn parse_document(xml: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().expand_empty_elements = true;

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(EutilsError::xml("document has more than one root element"));
                }
                stack.push(XmlElement::from_start(e)?);
            }
            Event::Empty(ref e) => {
                let element = XmlElement::from_start(e)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                // end names are already matched by the reader
                let element = stack
                    .pop()
                    .ok_or_else(|| EutilsError::xml("unexpected closing tag"))?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Text(ref e) => {
                let text = e.unescape()?;
                append_text(&text, &mut stack)?;
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                append_text(&text, &mut stack)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(EutilsError::xml(format!(
            "unexpected end of input: <{}> is not closed",
            open.name
        )));
    }

    let root = root.ok_or_else(|| EutilsError::xml("document has no root element"))?;
    debug!(root = %root.name, "Parsed XML document");
    Ok(root)
}

fn close_element(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None if root.is_some() => {
            return Err(EutilsError::xml("document has more than one root element"));
        }
        None => *root = Some(element),
    }
    Ok(())
}

fn append_text(text: &str, stack: &mut [XmlElement]) -> Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(current) => {
            current.push_text(text);
            Ok(())
        }
        None => Err(EutilsError::xml(format!(
            "text outside of the root element: {:?}",
            text.trim()
        ))),
    }
}
