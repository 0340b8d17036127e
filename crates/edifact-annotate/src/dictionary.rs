//! Caller-supplied dictionary types: segment (`SD`), code (`ED`), and
//! message (`MD`) dictionaries, as described in the data model. The codec
//! never reads these from disk itself — callers deserialize the JSON
//! documents and hand in the typed structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One row of a segment's component table.
///
/// A row with `representation: None` is a composite header: it groups the
/// component rows that follow it under one data element, and component
/// iteration for that data element begins at the row after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRow {
    /// Decimal position string in steps of 10 (`"010"`, `"020"`, …), or
    /// empty. Lookup is by suffix match, not equality — different
    /// directory versions pad this differently.
    pub pos: String,
    pub code: String,
    pub name: String,
    /// `Some("a3")`/`Some("n..17")`/etc, or `None` for a composite header.
    pub representation: Option<String>,
    pub mc: MandatoryOrConditional,
    #[serde(default)]
    pub repeat: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MandatoryOrConditional {
    #[serde(rename = "M")]
    Mandatory,
    #[serde(rename = "C")]
    Conditional,
}

/// One segment's dictionary entry: its name, description, and component table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentEntry {
    pub name: String,
    pub description: String,
    pub table: Vec<SegmentRow>,
}

/// Maps a segment tag to its dictionary entry.
pub type SegmentDictionary = HashMap<String, SegmentEntry>;

/// One enumerated value of a code-table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeValue {
    pub name: String,
    pub description: String,
}

/// One code's dictionary entry. `table`, when present, enumerates the
/// permitted component values for that code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub name: String,
    #[serde(default)]
    pub table: Option<HashMap<String, CodeValue>>,
}

/// Maps a numeric code (e.g. `"7143"`) to its dictionary entry.
pub type CodeDictionary = HashMap<String, CodeEntry>;

/// One message type's dictionary entry. Only the `description` field is
/// consumed by the codec; the rest is opaque passthrough for the external
/// editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    pub description: String,
}

/// Maps a message type (e.g. `"UTILMD"`) to its dictionary entry.
pub type MessageDictionary = HashMap<String, MessageEntry>;

/// Finds the row in `table` whose `pos` suffix-matches `pos`, per the
/// suffix-match contract in the data model (different directory versions
/// pad `pos` to different widths).
pub fn find_row_by_pos<'a>(table: &'a [SegmentRow], pos: &str) -> Option<&'a SegmentRow> {
    table.iter().find(|row| row.pos.ends_with(pos))
}
