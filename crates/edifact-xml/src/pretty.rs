//! Indented, reproducible XML text output.
//!
//! `quick_xml`'s own indenting writer does not guarantee attribute
//! ordering, so attributes are sorted alphabetically here before each
//! start tag is written, making output byte-for-byte reproducible.

use crate::tree::XmlElement;

/// Pretty-prints `root` with `indent` spaces per nesting level (default 4).
pub fn pretty_xml(root: &XmlElement, indent: Option<usize>) -> String {
    let width = indent.unwrap_or(4);
    let mut out = String::new();
    write_indented(&mut out, root, 0, width);
    out
}

fn write_indented(out: &mut String, element: &XmlElement, depth: usize, width: usize) {
    let pad = " ".repeat(depth * width);
    out.push_str(&pad);
    out.push('<');
    out.push_str(&element.tag);

    let mut attrs = element.attributes.clone();
    attrs.sort_by(|a, b| a.0.cmp(&b.0));
    for (key, value) in &attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    if element.children.is_empty() && element.text.is_none() {
        out.push_str("/>\n");
        return;
    }

    out.push('>');
    if let Some(text) = &element.text {
        out.push_str(&escape_text(text));
    }
    if element.children.is_empty() {
        out.push_str("</");
        out.push_str(&element.tag);
        out.push_str(">\n");
        return;
    }

    out.push('\n');
    for child in &element.children {
        write_indented(out, child, depth + 1, width);
    }
    out.push_str(&pad);
    out.push_str("</");
    out.push_str(&element.tag);
    out.push_str(">\n");
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
