//! Compact (non-pretty) XML text serialization, via `quick_xml`.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::tree::XmlElement;

#[derive(Debug, thiserror::Error)]
pub enum XmlTextError {
    #[error("XML read error: {0}")]
    Read(#[from] quick_xml::Error),
    #[error("unexpected end of document")]
    UnexpectedEof,
}

/// Serializes `root` to a compact (non-indented) XML string.
pub fn serialize(root: &XmlElement) -> Result<String, XmlTextError> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, root)?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
) -> Result<(), XmlTextError> {
    let mut start = BytesStart::new(element.tag.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &element.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.tag.as_str())))?;
    Ok(())
}

/// Parses a compact or pretty-printed XML string back into a tree.
pub fn deserialize(xml: &str) -> Result<XmlElement, XmlTextError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let mut element = XmlElement::new(String::from_utf8_lossy(e.name().as_ref()));
                for attr in e.attributes().flatten() {
                    element.push_attr(
                        String::from_utf8_lossy(attr.key.as_ref()),
                        attr.unescape_value().unwrap_or_default().into_owned(),
                    );
                }
                stack.push(element);
            }
            Event::Empty(e) => {
                let mut element = XmlElement::new(String::from_utf8_lossy(e.name().as_ref()));
                for attr in e.attributes().flatten() {
                    element.push_attr(
                        String::from_utf8_lossy(attr.key.as_ref()),
                        attr.unescape_value().unwrap_or_default().into_owned(),
                    );
                }
                push_finished(&mut stack, &mut root, element);
            }
            Event::Text(t) => {
                if let Some(top) = stack.last_mut() {
                    let text = t.unescape()?.into_owned();
                    if !text.is_empty() {
                        top.text = Some(text);
                    }
                }
            }
            Event::End(_) => {
                let element = stack.pop().ok_or(XmlTextError::UnexpectedEof)?;
                push_finished(&mut stack, &mut root, element);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    root.ok_or(XmlTextError::UnexpectedEof)
}

fn push_finished(stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}
