//! Parse the input document into an owned [`Element`] tree.
//!
//! Uses the `quick-xml` pull reader. Tags and attribute keys keep only their
//! local name; namespace declarations are dropped. Text is kept untrimmed so
//! the projector sees the raw content.

use crate::errors::{FlattenError, Result};
use crate::model::{element::Element, level::Level};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::{fs, path::Path};
use tracing::debug;

/// Read and parse an XML file.
pub fn parse_file(path: &Path) -> Result<Element> {
    let xml = fs::read_to_string(path)?;
    parse_document(&xml)
}

/// Parse an XML string and return its document element.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(open_element(&e)?),
            Event::Empty(e) => {
                let el = open_element(&e)?;
                close_element(el, &mut stack, &mut root);
            }
            Event::End(_) => {
                if let Some(el) = stack.pop() {
                    close_element(el, &mut stack, &mut root);
                }
            }
            Event::Text(t) => {
                if let Some(cur) = stack.last_mut() {
                    cur.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(cur) = stack.last_mut() {
                    cur.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype.
            _ => {}
        }
    }

    let root = root.ok_or_else(|| FlattenError::missing("<document element>", "<input>"))?;
    debug!(tag = %root.tag, children = root.children.len(), "parsed document");
    Ok(root)
}

/// Locate the `PersAutoPolicyModRq` message: the document element itself or
/// its first descendant with that tag.
pub fn message_root(doc: &Element) -> Result<&Element> {
    let tag = Level::PersAutoPolicyModRq.tag();
    doc.find_descendant(tag)
        .ok_or_else(|| FlattenError::missing(tag, doc.tag.clone()))
}

fn open_element(e: &BytesStart<'_>) -> Result<Element> {
    let mut el = Element::new(String::from_utf8_lossy(e.local_name().as_ref()));
    for attr in e.attributes() {
        let attr = attr?;
        let full = attr.key.as_ref();
        if full == b"xmlns" || full.starts_with(b"xmlns:") {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        el.attributes.push((key, value));
    }
    Ok(el)
}

fn close_element(el: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None => {
            if root.is_none() {
                *root = Some(el);
            }
        }
    }
}
