//! Reading XML text into a [`Document`] tree.

use quick_xml::{
    NsReader,
    events::{BytesStart, Event},
    name::ResolveResult,
};

use crate::document::{Document, Element};

/// The XML Schema instance namespace. Attributes in it are skipped like
/// namespace declarations.
const XSI_NAMESPACE: &[u8] = b"http://www.w3.org/2001/XMLSchema-instance";

/// Errors produced while reading document text.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The markup itself is malformed.
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        /// Byte offset the reader had reached.
        position: u64,
        /// The underlying reader error.
        source: quick_xml::Error,
    },

    /// An attribute or text value could not be decoded or unescaped.
    #[error("invalid value at byte {position}: {message}")]
    Value {
        /// Byte offset the reader had reached.
        position: u64,
        /// What went wrong.
        message: String,
    },

    /// There is no element at all.
    #[error("document has no root element")]
    NoRoot,

    /// A second top-level element follows the root.
    #[error("document has more than one root element (found '{0}' after the root)")]
    MultipleRoots(String),

    /// Non-whitespace text before or after the root element.
    #[error("text outside the root element at byte {0}")]
    TextOutsideRoot(u64),

    /// The input ended while an element was still open.
    #[error("element '{0}' is never closed")]
    Unclosed(String),
}

/// Parses XML text into a document tree.
///
/// Comments, processing instructions, the XML declaration and any DOCTYPE
/// are skipped. Namespace declarations are resolved onto elements and are
/// not kept as attributes.
///
/// # Errors
///
/// Returns a [`ParseError`] if the text is not a well-formed document with
/// exactly one root element.
pub fn parse(text: &str) -> Result<Document, ParseError> {
    let mut reader = NsReader::from_str(text);
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = position(&reader);
        let (namespace, event) = reader
            .read_resolved_event()
            .map_err(|source| ParseError::Xml { position, source })?;

        match event {
            Event::Start(start) => {
                let namespace = bound(&namespace);
                let element = open_element(&reader, namespace, &start, position, root.as_ref())?;
                open.push(element);
            }
            Event::Empty(start) => {
                let namespace = bound(&namespace);
                let element = open_element(&reader, namespace, &start, position, root.as_ref())?;
                close_element(element, &mut open, &mut root);
            }
            Event::End(_) => {
                if let Some(element) = open.pop() {
                    close_element(element, &mut open, &mut root);
                }
            }
            Event::Text(text) => {
                let value = text.unescape().map_err(|e| ParseError::Value {
                    position,
                    message: e.to_string(),
                })?;
                push_text(&mut open, &value, position)?;
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data);
                push_text(&mut open, &value, position)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = open.pop() {
        return Err(ParseError::Unclosed(element.name));
    }

    root.map(Document::new).ok_or(ParseError::NoRoot)
}

fn position<R>(reader: &NsReader<R>) -> u64 {
    u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX)
}

fn bound(namespace: &ResolveResult) -> Option<String> {
    match namespace {
        ResolveResult::Bound(namespace) => Some(decode(namespace.as_ref())),
        _ => None,
    }
}

fn open_element<R>(
    reader: &NsReader<R>,
    namespace: Option<String>,
    start: &BytesStart,
    position: u64,
    root: Option<&Element>,
) -> Result<Element, ParseError> {
    let name = decode(start.local_name().as_ref());
    if root.is_some() {
        return Err(ParseError::MultipleRoots(name));
    }

    let mut element = Element::new(name);
    element.namespace = namespace;

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| ParseError::Value {
            position,
            message: e.to_string(),
        })?;

        let key = attribute.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let (attribute_namespace, local_name) = reader.resolve_attribute(attribute.key);
        if matches!(attribute_namespace, ResolveResult::Bound(ns) if ns.as_ref() == XSI_NAMESPACE) {
            continue;
        }

        let value = attribute.unescape_value().map_err(|e| ParseError::Value {
            position,
            message: e.to_string(),
        })?;
        element
            .attributes
            .push((decode(local_name.as_ref()), value.into_owned()));
    }

    Ok(element)
}

fn close_element(element: Element, open: &mut Vec<Element>, root: &mut Option<Element>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn push_text(open: &mut [Element], text: &str, position: u64) -> Result<(), ParseError> {
    match open.last_mut() {
        Some(element) => element.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(ParseError::TextOutsideRoot(position)),
    }
    Ok(())
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMESPACE: &str = "http://museum.example.com/exhibit";

    #[test]
    fn builds_tree_with_namespace_and_attributes() {
        let document = parse(
            r#"<?xml version="1.0" encoding="utf-8"?>
<Exhibit xmlns="http://museum.example.com/exhibit" id="EXH001" status="Active">
    <!-- a comment -->
    <BasicInfo>
        <Title>Amphora &amp; lid</Title>
    </BasicInfo>
    <Media/>
</Exhibit>"#,
        )
        .unwrap();

        let root = document.root();
        assert_eq!(root.name(), "Exhibit");
        assert_eq!(root.namespace(), Some(NAMESPACE));
        assert_eq!(
            root.attributes().collect::<Vec<_>>(),
            vec![("id", "EXH001"), ("status", "Active")]
        );
        assert_eq!(root.children().len(), 2);

        let title = root.child("BasicInfo").unwrap().child("Title").unwrap();
        assert_eq!(title.text(), "Amphora & lid");
        assert_eq!(title.namespace(), Some(NAMESPACE));
        assert!(root.child("Media").unwrap().children().is_empty());
    }

    #[test]
    fn prefixed_namespaces_resolve() {
        let document =
            parse(r#"<m:Exhibit xmlns:m="urn:test"><m:Title>x</m:Title></m:Exhibit>"#).unwrap();
        assert_eq!(document.root().name(), "Exhibit");
        assert_eq!(document.root().namespace(), Some("urn:test"));
        assert!(document.root().attribute("m").is_none());
        assert_eq!(document.root().child("Title").unwrap().text(), "x");
    }

    #[test]
    fn schema_instance_attributes_are_skipped() {
        let document = parse(
            r#"<Exhibit xmlns="urn:test"
                xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                xmlns:x="urn:extra"
                xsi:schemaLocation="urn:test exhibit.xsd" x:note="kept" id="EXH001"/>"#,
        )
        .unwrap();
        assert_eq!(
            document.root().attributes().collect::<Vec<_>>(),
            vec![("note", "kept"), ("id", "EXH001")]
        );
    }

    #[test]
    fn cdata_is_text() {
        let document = parse("<A><![CDATA[1 < 2]]></A>").unwrap();
        assert_eq!(document.root().text(), "1 < 2");
    }

    #[test]
    fn unprefixed_element_has_no_namespace() {
        let document = parse("<Exhibit/>").unwrap();
        assert_eq!(document.root().namespace(), None);
    }

    #[test]
    fn mismatched_end_tag_fails() {
        let result = parse("<exhibit><title>Unclosed</exhibit>");
        assert!(matches!(result, Err(ParseError::Xml { .. })));
    }

    #[test]
    fn unclosed_root_fails() {
        assert!(parse("<exhibit><title>x</title>").is_err());
    }

    #[test]
    fn second_root_fails() {
        let result = parse("<a/><b/>");
        assert!(matches!(result, Err(ParseError::MultipleRoots(name)) if name == "b"));
    }

    #[test]
    fn empty_document_fails() {
        assert!(matches!(parse("   "), Err(ParseError::NoRoot)));
        assert!(matches!(parse("<!-- only -->"), Err(ParseError::NoRoot)));
    }

    #[test]
    fn text_outside_root_fails() {
        assert!(matches!(
            parse("hello <a/>"),
            Err(ParseError::TextOutsideRoot(_))
        ));
    }
}
