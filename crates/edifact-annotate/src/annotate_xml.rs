use edifact_types::{Document, Segment};
use edifact_xml::{make_xml, XmlElement};

use crate::dictionary::{CodeDictionary, MandatoryOrConditional, SegmentDictionary};
use crate::walk::{locate_element, row_for_component};

/// Builds the attributed XML tree: the same shape as [`edifact_xml::make_xml`],
/// but every data-element and component element is decorated with
/// attributes drawn from the dictionaries.
pub fn annotate_xml(
    document: &Document,
    sd: &SegmentDictionary,
    ed: &CodeDictionary,
    root_tag: Option<&str>,
) -> XmlElement {
    tracing::debug!(segments = document.len(), "annotating document as XML");
    let mut root = make_xml(document, root_tag);
    for (segment, element) in document.segments().iter().zip(root.children.iter_mut()) {
        annotate_segment(segment, element, sd, ed);
    }
    root
}

fn annotate_segment(
    segment: &Segment,
    element: &mut XmlElement,
    sd: &SegmentDictionary,
    ed: &CodeDictionary,
) {
    let Segment::Data { tag, elements } = segment else {
        return;
    };
    let Some(entry) = sd.get(tag.as_str()) else {
        return;
    };

    for (d_i, (components, elem_el)) in elements.iter().zip(element.children.iter_mut()).enumerate()
    {
        let Some(located) = locate_element(&entry.table, d_i) else {
            continue;
        };
        if let Some(header) = located.header {
            elem_el.push_attr("code", header.code.clone());
            elem_el.push_attr("name", header.name.clone());
            elem_el.push_attr("pos", header.pos.clone());
        }

        for (c_i, (component, comp_el)) in components.iter().zip(elem_el.children.iter_mut()).enumerate()
        {
            let Some(row) = row_for_component(&entry.table, located.start_index, c_i) else {
                continue;
            };
            comp_el.push_attr("code", row.code.clone());
            comp_el.push_attr("name", row.name.clone());
            comp_el.push_attr(
                "mc",
                match row.mc {
                    MandatoryOrConditional::Mandatory => "M",
                    MandatoryOrConditional::Conditional => "C",
                },
            );
            if let Some(repeat) = row.repeat {
                comp_el.push_attr("repeat", repeat.to_string());
            }
            if let Some(representation) = &row.representation {
                comp_el.push_attr("representation", representation.clone());
            }

            if let Some(code_entry) = ed.get(&row.code) {
                if let Some(table) = &code_entry.table {
                    match table.get(component) {
                        Some(value) => {
                            comp_el.push_attr("value", value.name.clone());
                            comp_el.push_attr("description", value.description.clone());
                        }
                        None if !component.is_empty() => {
                            comp_el.push_attr("value", "CUSTOM CODE");
                        }
                        None => {}
                    }
                }
            }
        }
    }
}
