//! Positional structural ↔ XML mapping, plain-text (de)serialization, and
//! an indented, reproducible pretty printer for EDIFACT documents.

mod mapping;
mod pretty;
mod serde_xml;
mod tree;

pub use mapping::{make_xml, parse_xml, MappingError, DEFAULT_ROOT_TAG};
pub use pretty::pretty_xml;
pub use serde_xml::{deserialize, serialize, XmlTextError};
pub use tree::XmlElement;
