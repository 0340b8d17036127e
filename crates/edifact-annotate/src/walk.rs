//! Shared dictionary row lookup, used by both `report` and `annotate_xml`
//! so the two output formats stay consistent about which row pairs with
//! which element or component.

use crate::dictionary::SegmentRow;

/// The dictionary row(s) located for one data element at index `d_i`.
pub struct LocatedElement<'a> {
    /// `Some` when the located row was a composite header (no
    /// representation) — component pairing then starts at the row after it.
    pub header: Option<&'a SegmentRow>,
    /// Index into `table` that component 0 pairs with.
    pub start_index: usize,
}

/// Finds the row whose `pos` suffix-matches the decimal position
/// `10 * (d_i + 1)` (i.e. `d_i=0` looks for `"10"`, `d_i=1` for `"20"`, …).
pub fn locate_element<'a>(table: &'a [SegmentRow], d_i: usize) -> Option<LocatedElement<'a>> {
    let pos = (10 * (d_i + 1)).to_string();
    let idx = table.iter().position(|row| row.pos.ends_with(&pos))?;
    let row = &table[idx];
    if row.representation.is_none() {
        Some(LocatedElement {
            header: Some(row),
            start_index: idx + 1,
        })
    } else {
        Some(LocatedElement {
            header: None,
            start_index: idx,
        })
    }
}

/// The row paired with the `c_i`-th component of a data element located by
/// [`locate_element`].
pub fn row_for_component<'a>(
    table: &'a [SegmentRow],
    start_index: usize,
    c_i: usize,
) -> Option<&'a SegmentRow> {
    table.get(start_index + c_i)
}
