//! Structural ↔ XML mapping, positional tag derivation.
//!
//! A data element at index `d_i` becomes a child tagged `<SEG><d_i>` (e.g.
//! `LIN0`), and a component at index `c_i` within it becomes a leaf tagged
//! `<SEG><d_i><c_i>` (e.g. `LIN20`). `UNA` is the one segment with no
//! children: its element text is the six-character delimiter record.

use edifact_types::{Document, DocumentError, EdifactDelimiters, Segment, SegmentTag, UnknownSegment};

use crate::tree::XmlElement;

pub const DEFAULT_ROOT_TAG: &str = "EDIFACT";

/// Errors converting between the XML tree and the structural form.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("segment tag {0:?} is not recognised")]
    UnknownSegment(#[from] UnknownSegment),
    #[error("UNA element text must be exactly 6 characters, got {0:?}")]
    InvalidUnaText(String),
    #[error("{0}")]
    Document(#[from] DocumentError),
}

/// Builds a positional XML tree from a structural document.
pub fn make_xml(document: &Document, root_tag: Option<&str>) -> XmlElement {
    let mut root = XmlElement::new(root_tag.unwrap_or(DEFAULT_ROOT_TAG));
    for segment in document.segments() {
        root.children.push(segment_to_xml(segment));
    }
    root
}

fn segment_to_xml(segment: &Segment) -> XmlElement {
    match segment {
        Segment::Una(delimiters) => {
            let record = delimiters.record();
            let text: String = record.iter().collect();
            XmlElement::with_text("UNA", text)
        }
        Segment::Data { tag, elements } => {
            let mut seg_el = XmlElement::new(tag.as_str());
            for (d_i, components) in elements.iter().enumerate() {
                let mut elem_el = XmlElement::new(format!("{}{}", tag.as_str(), d_i));
                for (c_i, component) in components.iter().enumerate() {
                    let mut comp_el = XmlElement::new(format!("{}{}{}", tag.as_str(), d_i, c_i));
                    if !component.is_empty() {
                        comp_el.text = Some(component.clone());
                    }
                    elem_el.children.push(comp_el);
                }
                seg_el.children.push(elem_el);
            }
            seg_el
        }
    }
}

/// Rebuilds the structural document from an XML tree produced by
/// [`make_xml`] (or an equivalent one built by a caller).
pub fn parse_xml(root: &XmlElement) -> Result<Document, MappingError> {
    let mut segments = Vec::with_capacity(root.children.len());
    for child in &root.children {
        segments.push(xml_to_segment(child)?);
    }
    Document::new(segments).map_err(MappingError::from)
}

fn xml_to_segment(element: &XmlElement) -> Result<Segment, MappingError> {
    if element.tag == "UNA" {
        let text = element.text.clone().unwrap_or_default();
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 6 {
            return Err(MappingError::InvalidUnaText(text));
        }
        let delimiters = EdifactDelimiters {
            component: chars[0],
            element: chars[1],
            decimal: chars[2],
            release: chars[3],
            reserved: chars[4],
            segment: chars[5],
            ..EdifactDelimiters::default()
        };
        return Ok(Segment::Una(delimiters));
    }

    let tag = SegmentTag::parse(&element.tag)?;
    let mut elements = Vec::with_capacity(element.children.len());
    for elem_el in &element.children {
        let mut components = Vec::with_capacity(elem_el.children.len());
        for comp_el in &elem_el.children {
            components.push(comp_el.text.clone().unwrap_or_default());
        }
        elements.push(components);
    }
    Ok(Segment::data(tag, elements))
}
