use edifact_types::{Control, Document, EdifactDelimiters, RawSegment, Segment, SegmentTag};

use crate::unescape::unescape;
use crate::{EdifactHandler, ParseError};

/// An [`EdifactHandler`] that accumulates an owned [`Document`] while
/// streaming, unescaping release-character sequences and checking tag
/// admission as each segment arrives.
///
/// This is the bridge between the zero-copy streaming API
/// ([`crate::EdifactStreamParser`]) and the owned structural form that the
/// emitter, XML mapper, and annotator all operate on.
pub struct DocumentBuilder {
    delimiters: EdifactDelimiters,
    explicit_una: bool,
    segments: Vec<Segment>,
    error: Option<ParseError>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            delimiters: EdifactDelimiters::default(),
            explicit_una: false,
            segments: Vec::new(),
            error: None,
        }
    }

    /// Consumes the builder, returning the error recorded (if any) or the
    /// finished document.
    pub fn finish(self) -> Result<Document, ParseError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Document::new(self.segments).map_err(|_| ParseError::UnexpectedEof)
    }

    fn owned_segment(&self, raw: &RawSegment) -> Result<Segment, ParseError> {
        let tag = SegmentTag::parse(raw.id).map_err(|_| ParseError::UnknownSegment {
            tag: raw.id.to_string(),
            position: raw.position,
        })?;
        let elements = raw
            .elements
            .iter()
            .map(|components| {
                components
                    .iter()
                    .map(|c| unescape(c, self.delimiters.release))
                    .collect()
            })
            .collect();
        Ok(Segment::data(tag, elements))
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EdifactHandler for DocumentBuilder {
    fn on_delimiters(&mut self, delimiters: &EdifactDelimiters, explicit_una: bool) {
        self.delimiters = *delimiters;
        self.explicit_una = explicit_una;
        if explicit_una {
            self.segments.push(Segment::Una(*delimiters));
        }
    }

    fn on_segment(&mut self, segment: &RawSegment) -> Control {
        match self.owned_segment(segment) {
            Ok(owned) => {
                self.segments.push(owned);
                Control::Continue
            }
            Err(err) => {
                self.error = Some(err);
                Control::Stop
            }
        }
    }
}

/// Options controlling [`parse_edi`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Syntax identifier to assume when no `UNB+UNOx` marker is found while
    /// sniffing the encoding. Passed through to
    /// [`crate::sniffer::sniff_and_decode`].
    pub default_encoding: String,
    /// If true, and the decoded text contains characters outside the
    /// sniffed identifier's whitelist (only `UNOA`/`UNOB` have one), logs a
    /// warning naming the offending characters rather than silently
    /// ignoring them.
    pub warn_invalid_characters: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_encoding: "UNOC".to_string(),
            warn_invalid_characters: false,
        }
    }
}

/// Parses a complete raw EDIFACT interchange into an owned [`Document`].
///
/// Follows the bytes → sniffer → text → wire parser pipeline: first sniffs
/// the syntax identifier and decodes `input` to UTF-8 text via
/// [`crate::sniffer::sniff_and_decode`], then validates the delimiter
/// uniqueness invariant before tokenizing, and rejects any data segment
/// whose tag is outside the recognised set.
pub fn parse_edi(input: &[u8], options: ParseOptions) -> Result<Document, ParseError> {
    let sniffed = crate::sniffer::sniff_and_decode(input, &options.default_encoding)?;
    if options.warn_invalid_characters {
        let bad = crate::sniffer::invalid_characters(&sniffed.text, &sniffed.identifier);
        if !bad.is_empty() {
            tracing::warn!(
                identifier = %sniffed.identifier,
                characters = ?bad,
                "decoded text contains characters outside the syntax identifier's whitelist"
            );
        }
    }

    let text_bytes = sniffed.text.as_bytes();
    let (has_una, delimiters) = EdifactDelimiters::detect(&sniffed.text);
    if has_una {
        delimiters.validate()?;
    }
    tracing::debug!(
        has_una,
        identifier = %sniffed.identifier,
        input_len = text_bytes.len(),
        "parsing EDIFACT interchange"
    );

    let mut builder = DocumentBuilder::new();
    crate::EdifactStreamParser::parse(text_bytes, &mut builder)?;
    let document = builder.finish()?;
    tracing::debug!(segments = document.len(), "parsed EDIFACT interchange");
    Ok(document)
}
