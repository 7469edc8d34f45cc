//! Schema loading.
//!
//! A schema description is itself an XML document: a tree of `element`
//! nodes, each with `name` and `required` attributes, optional `type` and
//! `default` attributes for an inline value, `attribute` children declaring
//! attributes and `include` children splicing in externally defined
//! subtrees. Loading turns that document into an [`Element`] descriptor
//! tree. Any missing mandatory field aborts the load; no partial descriptor
//! is ever returned.

use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};

use crate::attribute::Attribute;
use crate::element::{Element, Required};
use crate::error::SchemaError;
use crate::value::TypeTag;
use crate::MAX_DEPTH;

/// Resolves `include` directives to schema source text.
///
/// Passing the resolver in explicitly keeps schema composition testable:
/// the loader never consults environment variables or a process-wide search
/// path on its own.
pub trait IncludeResolver {
    fn resolve(&self, filename: &str) -> Result<String, SchemaError>;
}

/// Resolves includes against a base directory.
pub struct DirResolver {
    base: PathBuf,
}

impl DirResolver {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl IncludeResolver for DirResolver {
    fn resolve(&self, filename: &str) -> Result<String, SchemaError> {
        let path = self.base.join(filename);
        std::fs::read_to_string(&path).map_err(|source| SchemaError::Io { path, source })
    }
}

/// A resolver for schemas that are known to contain no includes; any
/// include directive fails the load.
pub struct NoIncludes;

impl IncludeResolver for NoIncludes {
    fn resolve(&self, filename: &str) -> Result<String, SchemaError> {
        Err(SchemaError::UnresolvedInclude {
            filename: filename.to_string(),
        })
    }
}

/// Loads a schema description from a file.
pub fn load_schema_file(
    path: impl AsRef<Path>,
    resolver: &dyn IncludeResolver,
) -> Result<Element, SchemaError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_schema_str(&text, resolver)
}

/// Loads a schema description from in-memory source text.
pub fn load_schema_str(
    text: &str,
    resolver: &dyn IncludeResolver,
) -> Result<Element, SchemaError> {
    let doc = Document::parse(text)?;
    load_schema_doc(&doc, resolver)
}

/// Loads a schema description from an already parsed document. The
/// conventional root is a top-level node named `element`.
pub fn load_schema_doc(
    doc: &Document,
    resolver: &dyn IncludeResolver,
) -> Result<Element, SchemaError> {
    let root = doc
        .root()
        .children()
        .find(|n| n.has_tag_name("element"))
        .ok_or(SchemaError::MissingRootElement)?;
    element_from_xml(root, resolver, 0)
}

fn element_from_xml(
    xml: Node,
    resolver: &dyn IncludeResolver,
    depth: usize,
) -> Result<Element, SchemaError> {
    if depth > MAX_DEPTH {
        return Err(SchemaError::TooDeep);
    }

    let name = xml.attribute("name").ok_or(SchemaError::MissingName)?;
    let token = xml
        .attribute("required")
        .ok_or_else(|| SchemaError::MissingRequired {
            element: name.to_string(),
        })?;
    let required = Required::from_token(token).ok_or_else(|| SchemaError::InvalidRequired {
        element: name.to_string(),
        token: token.to_string(),
    })?;
    let mut element = Element::new(name, required)?;

    // An element with a `type` carries an inline value; the default literal
    // is optional and falls back to the type's zero value.
    if let Some(type_name) = xml.attribute("type") {
        let tag =
            TypeTag::from_schema_name(type_name).ok_or_else(|| SchemaError::UnknownType {
                element: name.to_string(),
                type_name: type_name.to_string(),
            })?;
        element
            .set_value(tag, xml.attribute("default"))
            .map_err(|source| SchemaError::BadElementDefault {
                element: name.to_string(),
                source,
            })?;
    }

    for child in xml.children().filter(|c| c.has_tag_name("attribute")) {
        element.add_attribute(attribute_from_xml(child, name)?)?;
    }

    for child in xml.children().filter(|c| c.has_tag_name("element")) {
        element.add_description(element_from_xml(child, resolver, depth + 1)?);
    }

    // An include behaves exactly like an inline `element` definition.
    for child in xml.children().filter(|c| c.has_tag_name("include")) {
        let filename =
            child
                .attribute("filename")
                .ok_or_else(|| SchemaError::IncludeMissingFilename {
                    element: name.to_string(),
                })?;
        let included = load_include(filename, resolver, depth)?;
        element.add_description(included);
    }

    Ok(element)
}

fn load_include(
    filename: &str,
    resolver: &dyn IncludeResolver,
    depth: usize,
) -> Result<Element, SchemaError> {
    let wrap = |source: SchemaError| SchemaError::Include {
        filename: filename.to_string(),
        source: Box::new(source),
    };

    let text = resolver.resolve(filename)?;
    let doc = Document::parse(&text).map_err(|e| wrap(SchemaError::Xml(e)))?;
    let root = doc
        .root()
        .children()
        .find(|n| n.has_tag_name("element"))
        .ok_or_else(|| wrap(SchemaError::MissingRootElement))?;
    element_from_xml(root, resolver, depth + 1).map_err(wrap)
}

fn attribute_from_xml(xml: Node, element_name: &str) -> Result<Attribute, SchemaError> {
    let missing = |field: &'static str| SchemaError::AttributeMissingField {
        element: element_name.to_string(),
        field,
    };

    let name = xml.attribute("name").ok_or_else(|| missing("name"))?;
    let type_name = xml.attribute("type").ok_or_else(|| missing("type"))?;
    let default = xml.attribute("default").ok_or_else(|| missing("default"))?;
    let required = xml.attribute("required").ok_or_else(|| missing("required"))?;

    let tag = TypeTag::from_schema_name(type_name).ok_or_else(|| SchemaError::UnknownType {
        element: element_name.to_string(),
        type_name: type_name.to_string(),
    })?;

    Attribute::new(name, tag, default, required == "1").map_err(|source| {
        SchemaError::BadAttributeDefault {
            element: element_name.to_string(),
            attribute: name.to_string(),
            source,
        }
    })
}
