//! Wire emitter: renders an owned [`Document`] back to EDIFACT bytes.
//!
//! Walks `(segment, data_elements)` pairs in order, joining elements on
//! the element separator and components on the component separator,
//! escaping meta-characters as it goes.
//!
//! The release character itself is also escaped here on emission, in
//! addition to the component/element/segment-terminator characters —
//! otherwise a literal release character in a component round-trips
//! ambiguously. Escaping all four is lossless.

use edifact_types::{DelimiterConflict, Document, EdifactDelimiters, Segment};

/// Options controlling [`make_edi`].
#[derive(Debug, Clone, Copy)]
pub struct EmitOptions {
    /// Emit a leading `UNA` service string advice segment even if the
    /// document has no explicit `Segment::Una` entry (using `delimiters`).
    pub with_una: bool,
    /// Delimiters to use when the document carries no `Segment::Una` and
    /// `with_una` forces one to be emitted, or to encode data segments
    /// when the document has no `Una` segment at all.
    pub delimiters: EdifactDelimiters,
    /// Append `\n` after every segment terminator, for human-readable output.
    pub with_newline: bool,
    /// Append `\r` before the newline (requires `with_newline`).
    pub with_carriage_return: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            with_una: false,
            delimiters: EdifactDelimiters::default(),
            with_newline: false,
            with_carriage_return: false,
        }
    }
}

/// Escapes `value` for the wire: the component separator, element
/// separator, segment terminator, and release character are all preceded
/// by the release character.
fn escape(value: &str, delimiters: &EdifactDelimiters) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == delimiters.component
            || ch == delimiters.element
            || ch == delimiters.segment
            || ch == delimiters.release
        {
            out.push(delimiters.release);
        }
        out.push(ch);
    }
    out
}

/// Renders `document` to EDIFACT wire bytes.
///
/// Validates the pairwise-distinctness of the delimiters being used before
/// emitting anything — a colliding delimiter set (e.g. `release ==
/// component`) would otherwise silently produce ambiguous wire bytes.
///
/// # Errors
///
/// Returns an error if the delimiters in effect (from the document's `Una`
/// segment, or from `options.delimiters` otherwise) fail the
/// pairwise-distinctness invariant.
pub fn make_edi(document: &Document, options: &EmitOptions) -> Result<Vec<u8>, DelimiterConflict> {
    let delimiters = document.una().copied().unwrap_or(options.delimiters);
    delimiters.validate()?;
    tracing::debug!(segments = document.len(), "emitting EDIFACT interchange");
    let mut out = String::new();

    if options.with_una || document.una().is_some() {
        out.push_str(&delimiters.to_una_string());
        terminate(&mut out, &delimiters, options);
    }

    for segment in document.data_segments() {
        write_segment(&mut out, segment, &delimiters);
        terminate(&mut out, &delimiters, options);
    }

    Ok(out.into_bytes())
}

fn write_segment(out: &mut String, segment: &Segment, delimiters: &EdifactDelimiters) {
    let Segment::Data { tag, elements } = segment else {
        return;
    };
    out.push_str(tag.as_str());
    for element in elements {
        out.push(delimiters.element);
        for (i, component) in element.iter().enumerate() {
            if i > 0 {
                out.push(delimiters.component);
            }
            out.push_str(&escape(component, delimiters));
        }
    }
}

fn terminate(out: &mut String, delimiters: &EdifactDelimiters, options: &EmitOptions) {
    out.push(delimiters.segment);
    if options.with_newline {
        if options.with_carriage_return {
            out.push(delimiters.carriage_return);
        }
        out.push(delimiters.newline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edifact_types::SegmentTag;

    fn nad(value: &str, sub: &str) -> Segment {
        Segment::data(
            SegmentTag::parse("NAD").unwrap(),
            vec![vec![value.to_string()], vec![sub.to_string()]],
        )
    }

    #[test]
    fn test_make_edi_without_una() {
        let doc = Document::new(vec![nad("BY", "500")]).unwrap();
        let bytes = make_edi(&doc, &EmitOptions::default()).unwrap();
        assert_eq!(bytes, b"NAD+BY+500'");
    }

    #[test]
    fn test_make_edi_with_una_from_document() {
        let doc = Document::new(vec![
            Segment::Una(EdifactDelimiters::default()),
            nad("BY", "500"),
        ])
        .unwrap();
        let bytes = make_edi(&doc, &EmitOptions::default()).unwrap();
        assert_eq!(bytes, b"UNA:+.? 'NAD+BY+500'");
    }

    #[test]
    fn test_make_edi_forces_una_without_document_una() {
        let doc = Document::new(vec![nad("BY", "500")]).unwrap();
        let options = EmitOptions {
            with_una: true,
            ..EmitOptions::default()
        };
        let bytes = make_edi(&doc, &options).unwrap();
        assert_eq!(bytes, b"UNA:+.? 'NAD+BY+500'");
    }

    #[test]
    fn test_make_edi_escapes_release_character() {
        let seg = Segment::data(
            SegmentTag::parse("FTX").unwrap(),
            vec![vec!["text with a ? mark".to_string()]],
        );
        let doc = Document::new(vec![seg]).unwrap();
        let bytes = make_edi(&doc, &EmitOptions::default()).unwrap();
        assert_eq!(bytes, b"FTX+text with a ?? mark'");
    }

    #[test]
    fn test_make_edi_escapes_component_and_element_separators() {
        let seg = Segment::data(
            SegmentTag::parse("FTX").unwrap(),
            vec![vec!["a+b:c'd".to_string()]],
        );
        let doc = Document::new(vec![seg]).unwrap();
        let bytes = make_edi(&doc, &EmitOptions::default()).unwrap();
        assert_eq!(bytes, b"FTX+a?+b?:c?'d'");
    }

    #[test]
    fn test_make_edi_with_newline() {
        let doc = Document::new(vec![nad("BY", "500")]).unwrap();
        let options = EmitOptions {
            with_newline: true,
            ..EmitOptions::default()
        };
        let bytes = make_edi(&doc, &options).unwrap();
        assert_eq!(bytes, b"NAD+BY+500'\n");
    }

    #[test]
    fn test_make_edi_empty_document() {
        let doc = Document::empty();
        let bytes = make_edi(&doc, &EmitOptions::default()).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_make_edi_rejects_colliding_delimiters() {
        let doc = Document::new(vec![nad("BY", "500")]).unwrap();
        let options = EmitOptions {
            delimiters: EdifactDelimiters {
                release: '+', // collides with element
                ..EdifactDelimiters::default()
            },
            ..EmitOptions::default()
        };
        assert!(make_edi(&doc, &options).is_err());
    }

    #[test]
    fn test_make_edi_rejects_colliding_delimiters_from_document_una() {
        let doc = Document::new(vec![
            Segment::Una(EdifactDelimiters {
                release: '+',
                ..EdifactDelimiters::default()
            }),
            nad("BY", "500"),
        ])
        .unwrap();
        assert!(make_edi(&doc, &EmitOptions::default()).is_err());
    }

    #[test]
    fn test_make_edi_multibyte_delimiters() {
        let doc = Document::new(vec![nad("BY", "500")]).unwrap();
        let options = EmitOptions {
            with_una: true,
            delimiters: EdifactDelimiters {
                component: '✉',
                element: '☺',
                decimal: '☣',
                release: '☎',
                segment: '❤',
                ..EdifactDelimiters::default()
            },
            ..EmitOptions::default()
        };
        let bytes = make_edi(&doc, &options).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "UNA✉☺☣☎ ❤NAD☺BY☺500❤");
    }

    #[test]
    fn test_escape_unescape_roundtrip() {
        let delimiters = EdifactDelimiters::default();
        let original = "a+b:c'd?e";
        let escaped = escape(original, &delimiters);
        let unescaped = crate::unescape::unescape(&escaped, delimiters.release);
        assert_eq!(unescaped, original);
    }
}
