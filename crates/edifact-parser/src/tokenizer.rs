use edifact_types::EdifactDelimiters;

/// Tokenizes raw EDIFACT text input into segment strings.
///
/// Handles release character escaping, whitespace normalization (strips \r\n),
/// and UNA segment detection.
pub struct EdifactTokenizer {
    delimiters: EdifactDelimiters,
}

impl EdifactTokenizer {
    /// Creates a new tokenizer with the given delimiters.
    pub fn new(delimiters: EdifactDelimiters) -> Self {
        Self { delimiters }
    }

    /// Returns the delimiters used by this tokenizer.
    pub fn delimiters(&self) -> &EdifactDelimiters {
        &self.delimiters
    }

    /// Tokenizes EDIFACT input into segment strings.
    ///
    /// Splits on segment terminator, respecting release character escaping.
    /// Strips `\r` and `\n` characters from the input (EDIFACT uses them
    /// only for readability).
    ///
    /// Each yielded string is a segment WITHOUT its terminator character.
    pub fn tokenize_segments<'a>(&self, input: &'a str) -> SegmentIter<'a> {
        SegmentIter {
            input,
            pos: 0,
            segment_terminator: self.delimiters.segment,
            release_char: self.delimiters.release,
        }
    }

    /// Tokenizes a segment string into data elements.
    ///
    /// Splits on element separator, preserving release character escaping
    /// (unescaping happens at the component level).
    pub fn tokenize_elements<'a>(&self, segment: &'a str) -> ElementIter<'a> {
        ElementIter {
            input: segment,
            pos: 0,
            separator: self.delimiters.element,
            release: self.delimiters.release,
        }
    }

    /// Tokenizes a data element into components.
    ///
    /// Splits on component separator and unescapes release character sequences.
    pub fn tokenize_components<'a>(&self, element: &'a str) -> ComponentIter<'a> {
        ComponentIter {
            input: element,
            pos: 0,
            separator: self.delimiters.component,
            release: self.delimiters.release,
        }
    }
}

/// Iterator over segments in EDIFACT input text.
pub struct SegmentIter<'a> {
    input: &'a str,
    pos: usize,
    segment_terminator: char,
    release_char: char,
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.input.as_bytes();

        // Skip whitespace between segments
        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            if b == b'\r' || b == b'\n' || b == b' ' || b == b'\t' {
                self.pos += 1;
            } else {
                break;
            }
        }

        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        let mut chars = self.input[self.pos..].char_indices();

        while let Some((offset, ch)) = chars.next() {
            let i = self.pos + offset;

            // Skip \r and \n within segments (EDIFACT ignores them)
            if ch == '\r' || ch == '\n' {
                continue;
            }

            // Check for release character — next char is escaped
            if ch == self.release_char {
                // Consume the escaped character too, if present.
                chars.next();
                continue;
            }

            if ch == self.segment_terminator {
                // Found unescaped terminator
                let segment_text = &self.input[start..i];
                self.pos = i + ch.len_utf8();

                let segment_str = strip_crlf(segment_text);
                if segment_str.is_empty() {
                    return self.next(); // skip empty segments
                }
                return Some(segment_str);
            }
        }

        // Remaining content after last terminator (may be trailing whitespace)
        if start < self.input.len() {
            let segment_text = &self.input[start..];
            self.pos = self.input.len();
            let segment_str = strip_crlf(segment_text);
            if segment_str.is_empty() {
                return None;
            }
            return Some(segment_str);
        }

        None
    }
}

/// Trims `\r` and `\n` characters from a segment's text.
///
/// In practice, EDIFACT segments never contain embedded newlines as data
/// (they are only used as line separators between segments for readability).
fn strip_crlf(s: &str) -> &str {
    s.trim_matches(|c: char| c == '\r' || c == '\n')
}

/// Iterator over elements within a segment string.
pub struct ElementIter<'a> {
    input: &'a str,
    pos: usize,
    separator: char,
    release: char,
}

impl<'a> Iterator for ElementIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos > self.input.len() {
            return None;
        }

        let start = self.pos;
        let mut chars = self.input[self.pos..].char_indices();

        while let Some((offset, ch)) = chars.next() {
            let i = self.pos + offset;

            // Release character escapes the next character
            if ch == self.release {
                chars.next();
                continue;
            }

            if ch == self.separator {
                let element = &self.input[start..i];
                self.pos = i + ch.len_utf8();
                return Some(element);
            }
        }

        // Return remaining content
        let element = &self.input[start..];
        self.pos = self.input.len() + 1; // mark as exhausted
        Some(element)
    }
}

/// Iterator over components within a data element.
pub struct ComponentIter<'a> {
    input: &'a str,
    pos: usize,
    separator: char,
    release: char,
}

impl<'a> Iterator for ComponentIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos > self.input.len() {
            return None;
        }

        let start = self.pos;
        let mut chars = self.input[self.pos..].char_indices();

        while let Some((offset, ch)) = chars.next() {
            let i = self.pos + offset;

            // Release character escapes the next character
            if ch == self.release {
                chars.next();
                continue;
            }

            if ch == self.separator {
                let component = &self.input[start..i];
                self.pos = i + ch.len_utf8();
                return Some(component);
            }
        }

        // Return remaining content
        let component = &self.input[start..];
        self.pos = self.input.len() + 1;
        Some(component)
    }
}
