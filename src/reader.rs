//! Document reading.
//!
//! A read walks the document depth-first against a loaded descriptor tree,
//! stamping each matched descriptor into a fresh instance node and filling
//! its value cells. The descriptor tree is only ever read, so one schema
//! can serve any number of concurrent parses.
//!
//! Fatal conditions (unparsable value, required element missing) abort the
//! whole read; unknown document attributes and unset required attributes
//! only warn, matching the lenient policy of the original format.

use std::path::Path;

use roxmltree::{Document, Node};
use tracing::warn;

use crate::element::Element;
use crate::error::ReadError;
use crate::MAX_DEPTH;

/// Reads a document from a file and validates it against `schema`.
pub fn read_file(path: impl AsRef<Path>, schema: &Element) -> Result<Element, ReadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_string(&text, schema)
}

/// Reads a document from in-memory source text.
pub fn read_string(text: &str, schema: &Element) -> Result<Element, ReadError> {
    let doc = Document::parse(text)?;
    read_doc(&doc, schema)
}

/// Reads an already parsed document. The document root must carry the
/// schema root's name; if it is absent the read fails or succeeds silently
/// according to the root descriptor's cardinality.
pub fn read_doc(doc: &Document, schema: &Element) -> Result<Element, ReadError> {
    let root = doc
        .root()
        .children()
        .find(|n| n.has_tag_name(schema.name()));

    let mut instance = schema.instantiate();
    match root {
        Some(node) => {
            read_xml(node, &mut instance, 0)?;
            Ok(instance)
        }
        None if schema.required().is_required() => Err(ReadError::RequiredElementMissing {
            element: schema.name().to_string(),
        }),
        None => Ok(instance),
    }
}

fn read_xml(xml: Node, element: &mut Element, depth: usize) -> Result<(), ReadError> {
    if depth > MAX_DEPTH {
        return Err(ReadError::TooDeep);
    }

    // Inline text content, if the descriptor declares an inline value.
    if let Some(text) = xml.text() {
        let text = text.trim();
        if !text.is_empty() {
            let name = element.name().to_string();
            if let Some(value) = element.value_mut() {
                value
                    .set_from_string(text)
                    .map_err(|source| ReadError::BadValue {
                        element: name,
                        source,
                    })?;
            }
        }
    }

    // Match document attributes against the declarations. Unknown
    // attributes are ignored with a warning; a parse failure is fatal.
    for attribute in xml.attributes() {
        match element.attribute_mut(attribute.name()) {
            Some(decl) => {
                decl.set_from_string(attribute.value()).map_err(|source| {
                    ReadError::BadAttribute {
                        element: xml.tag_name().name().to_string(),
                        attribute: attribute.name().to_string(),
                        source,
                    }
                })?;
            }
            None => warn!(
                element = xml.tag_name().name(),
                attribute = attribute.name(),
                "attribute not declared in schema, ignoring"
            ),
        }
    }

    for decl in element.attributes() {
        if !decl.is_satisfied() {
            warn!(
                element = xml.tag_name().name(),
                attribute = decl.key(),
                "required attribute not specified"
            );
        }
    }

    // Match document children against each child descriptor, in descriptor
    // declaration order and document order. Single-occurrence cardinalities
    // consume only the first match.
    for i in 0..element.descriptions().len() {
        let descriptor = &element.descriptions()[i];
        let desc_name = descriptor.name().to_string();
        let required = descriptor.required();

        let mut matches = 0;
        for child_xml in xml
            .children()
            .filter(|c| c.is_element() && c.tag_name().name() == desc_name)
        {
            let mut child = element.descriptions()[i].instantiate();
            read_xml(child_xml, &mut child, depth + 1)?;
            element.push_child(child);
            matches += 1;
            if !required.is_multiple() {
                break;
            }
        }

        if matches == 0 && required.is_required() {
            return Err(ReadError::RequiredElementMissing { element: desc_name });
        }
    }

    Ok(())
}
