use std::path::PathBuf;

use thiserror::Error;

use crate::value::ValueError;

/// Fatal schema-loading failures. Loading never returns a partially built
/// descriptor: the first missing or malformed field aborts the whole call.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("schema has no root `element` node")]
    MissingRootElement,

    #[error("element is missing the name attribute")]
    MissingName,

    #[error("element name must not be empty")]
    EmptyName,

    #[error("element {element:?} is missing the required attribute")]
    MissingRequired { element: String },

    #[error("element {element:?} has unrecognized cardinality token {token:?}")]
    InvalidRequired { element: String, token: String },

    #[error("element {element:?} declares unknown type {type_name:?}")]
    UnknownType { element: String, type_name: String },

    #[error("bad default value for element {element:?}: {source}")]
    BadElementDefault {
        element: String,
        #[source]
        source: ValueError,
    },

    #[error("attribute declaration in element {element:?} is missing its {field} field")]
    AttributeMissingField {
        element: String,
        field: &'static str,
    },

    #[error("bad default value for attribute {attribute:?} of element {element:?}: {source}")]
    BadAttributeDefault {
        element: String,
        attribute: String,
        #[source]
        source: ValueError,
    },

    #[error("element {element:?} declares attribute {key:?} more than once")]
    DuplicateAttribute { element: String, key: String },

    #[error("include in element {element:?} is missing the filename attribute")]
    IncludeMissingFilename { element: String },

    #[error("the resolver does not know include {filename:?}")]
    UnresolvedInclude { filename: String },

    #[error("included schema {filename:?} failed to load: {source}")]
    Include {
        filename: String,
        #[source]
        source: Box<SchemaError>,
    },

    #[error("schema nesting exceeds the maximum depth")]
    TooDeep,
}

/// Fatal document-reading failures. A failed read exposes no partial
/// instance tree.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("required element {element:?} is missing from the document")]
    RequiredElementMissing { element: String },

    #[error("bad value for element {element:?}: {source}")]
    BadValue {
        element: String,
        #[source]
        source: ValueError,
    },

    #[error("bad value for attribute {attribute:?} of element {element:?}: {source}")]
    BadAttribute {
        element: String,
        attribute: String,
        #[source]
        source: ValueError,
    },

    #[error("document nesting exceeds the maximum depth")]
    TooDeep,
}
