//! Dictionary-driven annotation of EDIFACT documents: a textual report and
//! an attributed XML tree, both built from the same row-lookup logic.
//!
//! The codec never parses dictionary files itself — callers deserialize
//! the `SD`/`ED`/`MD` JSON documents with `serde_json` and pass the typed
//! structures in. Dictionary mismatches never abort; they are recorded as
//! report lines or a `"CUSTOM CODE"` attribute value.

mod annotate_xml;
mod dictionary;
mod report;
mod representation;
mod walk;

pub use annotate_xml::annotate_xml;
pub use dictionary::{
    CodeDictionary, CodeEntry, CodeValue, MandatoryOrConditional, MessageDictionary, MessageEntry,
    SegmentDictionary, SegmentEntry, SegmentRow, find_row_by_pos,
};
pub use report::report;
pub use representation::{parse as parse_representation, validate as validate_representation, Class, Length, Representation, Violation};
