use edifact_types::{Document, EdifactDelimiters, Segment};

use crate::dictionary::{CodeDictionary, MandatoryOrConditional, SegmentDictionary};
use crate::representation::{self, Violation};
use crate::walk::{locate_element, row_for_component};

/// Renders one segment as a wire-format line (no terminator), for display
/// purposes in the report. Escapes meta-characters the same way the
/// emitter does.
fn render_segment_line(segment: &Segment, delimiters: &EdifactDelimiters) -> String {
    let Segment::Data { tag, elements } = segment else {
        return String::new();
    };
    let mut line = tag.as_str().to_string();
    for element in elements {
        line.push(delimiters.element);
        for (i, component) in element.iter().enumerate() {
            if i > 0 {
                line.push(delimiters.component);
            }
            for ch in component.chars() {
                if ch == delimiters.component || ch == delimiters.element || ch == delimiters.segment
                {
                    line.push(delimiters.release);
                }
                line.push(ch);
            }
        }
    }
    line
}

/// Produces the textual annotated report for `document`, joining each
/// segment against `sd` (names/representations/mandatory flags) and `ed`
/// (code-table value lookups).
pub fn report(document: &Document, sd: &SegmentDictionary, ed: &CodeDictionary) -> String {
    tracing::debug!(segments = document.len(), "annotating document as text report");
    let delimiters = document.una().copied().unwrap_or_default();
    let mut out = String::new();

    for segment in document.data_segments() {
        let Segment::Data { tag, elements } = segment else {
            continue;
        };
        let line = render_segment_line(segment, &delimiters);
        out.push_str(&line);
        out.push('\n');
        out.push_str(&"=".repeat(line.chars().count()));
        out.push('\n');

        let Some(entry) = sd.get(tag.as_str()) else {
            out.push_str(&format!("ERROR: unknown segment tag {:?}\n\n", tag.as_str()));
            continue;
        };
        out.push_str(&format!("{} <{}>\n", entry.name, tag.as_str()));

        for (d_i, components) in elements.iter().enumerate() {
            let Some(located) = locate_element(&entry.table, d_i) else {
                out.push_str(&format!(
                    "  ERROR: no dictionary row for data element {d_i}\n"
                ));
                continue;
            };
            if let Some(header) = located.header {
                out.push_str(&format!("  [{}] {} ({})\n", d_i, header.name, header.code));
            }

            for (c_i, component) in components.iter().enumerate() {
                let Some(row) = row_for_component(&entry.table, located.start_index, c_i) else {
                    out.push_str(&format!("    ERROR: no dictionary row for component {c_i}\n"));
                    continue;
                };

                let mut line = format!("    {} {:?} ({})", row.name, component, row.code);
                let mut unknown_code_error = None;
                if let Some(code_entry) = ed.get(&row.code) {
                    if let Some(table) = &code_entry.table {
                        match table.get(component) {
                            Some(value) => line.push_str(&format!(" — {}", value.name)),
                            None if !component.is_empty() => {
                                unknown_code_error = Some(format!(
                                    "    ERROR: unknown code {component:?} not in ({})\n",
                                    row.code
                                ));
                            }
                            None => {}
                        }
                    }
                }
                out.push_str(&line);
                out.push('\n');
                if let Some(error_line) = unknown_code_error {
                    out.push_str(&error_line);
                }

                if let Some(representation_str) = &row.representation {
                    if let Some(parsed) = representation::parse(representation_str) {
                        if !component.is_empty() {
                            for violation in representation::validate(component, &parsed) {
                                out.push_str(&format!(
                                    "    ERROR: {} {}\n",
                                    row.name,
                                    describe_violation(&violation)
                                ));
                            }
                        }
                    }
                }

                if component.is_empty() && row.mc == MandatoryOrConditional::Mandatory {
                    out.push_str(&format!(
                        "    ERROR: {} is mandatory but missing\n",
                        row.name
                    ));
                }
            }
        }
        out.push('\n');
    }

    out
}

fn describe_violation(violation: &Violation) -> String {
    match violation {
        Violation::WrongClass => "has the wrong representation class".to_string(),
        Violation::WrongLength { expected, actual } => {
            format!("has length {actual}, expected {expected:?}")
        }
    }
}
