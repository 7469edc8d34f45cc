//! Model and parser for SDF element schemas and documents.
//!
//! The format is described by a schema that is itself an XML document: a
//! tree of `element` declarations with typed attributes, typed inline
//! values, cardinality tokens and `include` composition. The crate exposes
//! two independent passes over that shared surface syntax:
//!
//! - [`load_schema_file`] / [`load_schema_str`] / [`load_schema_doc`] build
//!   an immutable [`Element`] descriptor tree from a schema description;
//! - [`read_file`] / [`read_string`] / [`read_doc`] validate a data
//!   document against a descriptor tree and materialize a typed instance
//!   tree.
//!
//! ```
//! use sdformat::{load_schema_str, read_string, schema::NoIncludes};
//!
//! let schema = load_schema_str(
//!     r#"<element name="box" required="1">
//!          <attribute name="size" type="vector3" default="1 1 1" required="0"/>
//!        </element>"#,
//!     &NoIncludes,
//! )?;
//! let instance = read_string(r#"<box size="2 3 4"/>"#, &schema)?;
//! assert_eq!(
//!     instance.attribute("size").unwrap().param().as_vector3().unwrap().y,
//!     3.0
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod attribute;
pub mod element;
pub mod error;
pub mod reader;
pub mod schema;
pub mod value;

pub use attribute::Attribute;
pub use element::{Element, Required};
pub use error::{ReadError, SchemaError};
pub use reader::{read_doc, read_file, read_string};
pub use schema::{load_schema_doc, load_schema_file, load_schema_str, IncludeResolver};
pub use value::{Color, Param, Pose, Time, TypeTag, Value, ValueError, Vector3};

/// Nesting bound for schema loading and document reading. Both passes
/// recurse per nesting level, so the bound keeps adversarially deep input
/// (and include cycles) from exhausting the stack.
pub(crate) const MAX_DEPTH: usize = 64;
