/// Error when parsing a UNA service string advice segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnaParseError {
    /// UNA segment must be exactly 9 characters.
    InvalidLength { expected: usize, actual: usize },
    /// UNA segment must start with "UNA".
    InvalidPrefix,
}

impl std::fmt::Display for UnaParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLength { expected, actual } => {
                write!(
                    f,
                    "UNA segment must be exactly {expected} characters, got {actual}"
                )
            }
            Self::InvalidPrefix => write!(f, "UNA segment must start with 'UNA'"),
        }
    }
}

impl std::error::Error for UnaParseError {}

/// Delimiters fail the pairwise-distinctness invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterConflict {
    pub chars: Vec<char>,
}

impl std::fmt::Display for DelimiterConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "delimiters must be pairwise distinct, got {:?}", self.chars)
    }
}

impl std::error::Error for DelimiterConflict {}

/// EDIFACT delimiter characters.
///
/// The six characters that control EDIFACT message structure, plus the two
/// line-break characters that are only ever consumed as an ignorable suffix
/// to a segment terminator. Each is a single Unicode scalar value — EDIFACT
/// does not require delimiters to be ASCII punctuation, so these are stored
/// as `char` rather than `u8` to admit multi-byte UTF-8 delimiters. When no
/// UNA service string advice is present, the standard defaults apply:
/// - Component separator: `:` (colon)
/// - Element separator: `+` (plus)
/// - Decimal mark: `.` (period)
/// - Release character: `?` (question mark)
/// - Segment terminator: `'` (apostrophe)
/// - Reserved: ` ` (space)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdifactDelimiters {
    /// Component data element separator (default: `:`).
    pub component: char,
    /// Data element separator (default: `+`).
    pub element: char,
    /// Decimal mark (default: `.`).
    pub decimal: char,
    /// Release character / escape (default: `?`).
    pub release: char,
    /// Segment terminator (default: `'`).
    pub segment: char,
    /// Reserved for future use (default: ` `).
    pub reserved: char,
    /// Line feed, consumed only as an ignorable suffix to `segment` (default: `\n`).
    pub newline: char,
    /// Carriage return, consumed only as an ignorable suffix to `segment` (default: `\r`).
    pub carriage_return: char,
}

impl Default for EdifactDelimiters {
    fn default() -> Self {
        Self {
            component: ':',
            element: '+',
            decimal: '.',
            release: '?',
            segment: '\'',
            reserved: ' ',
            newline: '\n',
            carriage_return: '\r',
        }
    }
}

impl EdifactDelimiters {
    /// Standard EDIFACT delimiters (when no UNA segment is present).
    pub const STANDARD: Self = Self {
        component: ':',
        element: '+',
        decimal: '.',
        release: '?',
        segment: '\'',
        reserved: ' ',
        newline: '\n',
        carriage_return: '\r',
    };

    /// Checks the pairwise-distinctness invariant.
    ///
    /// `reserved` is excluded (it is a fixed space, not an independently
    /// chosen delimiter), while `segment` (the terminator) is included — a
    /// terminator colliding with another delimiter cannot be tokenized
    /// unambiguously.
    pub fn validate(&self) -> Result<(), DelimiterConflict> {
        let chars = [
            self.component,
            self.element,
            self.decimal,
            self.release,
            self.segment,
            self.newline,
            self.carriage_return,
        ];
        let mut seen = std::collections::HashSet::with_capacity(chars.len());
        for &c in &chars {
            if !seen.insert(c) {
                return Err(DelimiterConflict {
                    chars: chars.to_vec(),
                });
            }
        }
        Ok(())
    }

    /// Parse delimiters from a UNA service string advice segment.
    ///
    /// The UNA segment is exactly 9 characters: `UNA` followed by 6
    /// delimiter characters, each of which may be a multi-byte UTF-8
    /// scalar value. Format: `UNA<component><element><decimal><release><reserved><terminator>`
    ///
    /// Line-break characters are not part of the UNA encoding; `newline` and
    /// `carriage_return` are carried over from `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 9 characters or does not start with `UNA`.
    pub fn from_una(&self, una: &str) -> Result<Self, UnaParseError> {
        let chars: Vec<char> = una.chars().collect();
        if chars.len() != 9 {
            return Err(UnaParseError::InvalidLength {
                expected: 9,
                actual: chars.len(),
            });
        }

        if chars[0] != 'U' || chars[1] != 'N' || chars[2] != 'A' {
            return Err(UnaParseError::InvalidPrefix);
        }

        // UNA format positions:
        // 0-2: "UNA"
        // 3: component separator
        // 4: element separator
        // 5: decimal mark
        // 6: release character
        // 7: reserved
        // 8: segment terminator
        Ok(Self {
            component: chars[3],
            element: chars[4],
            decimal: chars[5],
            release: chars[6],
            reserved: chars[7],
            segment: chars[8],
            newline: self.newline,
            carriage_return: self.carriage_return,
        })
    }

    /// Byte length of the `UNA` record (`"UNA"` plus six delimiter
    /// characters) at the start of `text`, if `text` actually starts with
    /// one. Accounts for delimiter characters that encode to more than one
    /// UTF-8 byte.
    pub fn una_len(text: &str) -> Option<usize> {
        if !text.starts_with("UNA") {
            return None;
        }
        let mut end = 0;
        let mut count = 0;
        for (idx, ch) in text.char_indices() {
            if count == 9 {
                break;
            }
            end = idx + ch.len_utf8();
            count += 1;
        }
        if count == 9 { Some(end) } else { None }
    }

    /// Detect delimiters from an EDIFACT message.
    ///
    /// If the message starts with a UNA segment, parses delimiters from it.
    /// Otherwise, returns the standard defaults.
    ///
    /// Returns `(has_una, delimiters)`.
    pub fn detect(input: &str) -> (bool, Self) {
        Self::default().detect_with(input)
    }

    /// Like [`Self::detect`], but preserving `self`'s line-break characters
    /// and falling back to `self` (rather than the global default) when no
    /// UNA is present.
    pub fn detect_with(&self, input: &str) -> (bool, Self) {
        match Self::una_len(input) {
            Some(len) => match self.from_una(&input[..len]) {
                Ok(d) => (true, d),
                Err(_) => (false, *self),
            },
            None => (false, *self),
        }
    }

    /// The six-character UNA delimiter record, in wire order: component,
    /// element, decimal, release, reserved, terminator.
    pub fn record(&self) -> [char; 6] {
        [
            self.component,
            self.element,
            self.decimal,
            self.release,
            self.reserved,
            self.segment,
        ]
    }

    /// Formats the delimiters as a UNA service string advice segment.
    ///
    /// Returns the UNA string: `UNA:+.? '` (longer if any delimiter is a
    /// multi-byte character).
    pub fn to_una_string(&self) -> String {
        format!(
            "UNA{}{}{}{}{}{}",
            self.component, self.element, self.decimal, self.release, self.reserved, self.segment,
        )
    }
}

impl std::fmt::Display for EdifactDelimiters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_una_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delimiters() {
        let d = EdifactDelimiters::default();
        assert_eq!(d.component, ':');
        assert_eq!(d.element, '+');
        assert_eq!(d.decimal, '.');
        assert_eq!(d.release, '?');
        assert_eq!(d.segment, '\'');
        assert_eq!(d.reserved, ' ');
        assert_eq!(d.newline, '\n');
        assert_eq!(d.carriage_return, '\r');
    }

    #[test]
    fn test_delimiters_equality() {
        let a = EdifactDelimiters::default();
        let b = EdifactDelimiters::default();
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(EdifactDelimiters::default().validate().is_ok());
    }

    #[test]
    fn test_validate_collision_is_error() {
        let d = EdifactDelimiters {
            release: '+', // collides with element
            ..EdifactDelimiters::default()
        };
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_validate_reserved_collision_is_ignored() {
        // reserved colliding with component is not a configuration error.
        let d = EdifactDelimiters {
            reserved: ':',
            ..EdifactDelimiters::default()
        };
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_from_una_standard() {
        let una = "UNA:+.? '";
        let d = EdifactDelimiters::default().from_una(una).unwrap();
        assert_eq!(d, EdifactDelimiters::default());
    }

    #[test]
    fn test_from_una_custom_delimiters() {
        let una = "UNA;*.# |";
        let d = EdifactDelimiters::default().from_una(una).unwrap();
        assert_eq!(d.component, ';');
        assert_eq!(d.element, '*');
        assert_eq!(d.decimal, '.');
        assert_eq!(d.release, '#');
        assert_eq!(d.reserved, ' ');
        assert_eq!(d.segment, '|');
    }

    #[test]
    fn test_from_una_multibyte_delimiters() {
        let una = "UNA✉☺☣☎❤ ";
        let d = EdifactDelimiters::default().from_una(una).unwrap();
        assert_eq!(d.component, '✉');
        assert_eq!(d.element, '☺');
        assert_eq!(d.decimal, '☣');
        assert_eq!(d.release, '☎');
        assert_eq!(d.segment, ' ');
    }

    #[test]
    fn test_from_una_too_short() {
        let una = "UNA:+.";
        assert!(EdifactDelimiters::default().from_una(una).is_err());
    }

    #[test]
    fn test_from_una_wrong_prefix() {
        let una = "XXX:+.? '";
        assert!(EdifactDelimiters::default().from_una(una).is_err());
    }

    #[test]
    fn test_detect_with_una() {
        let input = "UNA:+.? 'UNB+UNOC:3+sender+recipient'";
        let (has_una, delimiters) = EdifactDelimiters::detect(input);
        assert!(has_una);
        assert_eq!(delimiters, EdifactDelimiters::default());
    }

    #[test]
    fn test_detect_without_una() {
        let input = "UNB+UNOC:3+sender+recipient'";
        let (has_una, delimiters) = EdifactDelimiters::detect(input);
        assert!(!has_una);
        assert_eq!(delimiters, EdifactDelimiters::default());
    }

    #[test]
    fn test_detect_empty_input() {
        let input = "";
        let (has_una, delimiters) = EdifactDelimiters::detect(input);
        assert!(!has_una);
        assert_eq!(delimiters, EdifactDelimiters::default());
    }

    #[test]
    fn test_detect_with_multibyte_una() {
        let input = "UNA✉☺☣☎ ❤\nUNB+UNOC:3+sender+recipient❤";
        let (has_una, delimiters) = EdifactDelimiters::detect(input);
        assert!(has_una);
        assert_eq!(delimiters.component, '✉');
        assert_eq!(delimiters.segment, '❤');
        let una_len = EdifactDelimiters::una_len(input).unwrap();
        assert_eq!(&input[una_len..una_len + 1], "\n");
    }

    #[test]
    fn test_una_roundtrip() {
        let original = EdifactDelimiters {
            component: ';',
            element: '*',
            decimal: ',',
            release: '#',
            segment: '!',
            reserved: ' ',
            ..EdifactDelimiters::default()
        };
        let una_string = original.to_una_string();
        let parsed = EdifactDelimiters::default()
            .from_una(&una_string)
            .unwrap();
        assert_eq!(original.record(), parsed.record());
    }

    #[test]
    fn test_una_roundtrip_multibyte() {
        let original = EdifactDelimiters {
            component: '✉',
            element: '☺',
            decimal: '☣',
            release: '☎',
            segment: '❤',
            reserved: ' ',
            ..EdifactDelimiters::default()
        };
        let una_string = original.to_una_string();
        let parsed = EdifactDelimiters::default()
            .from_una(&una_string)
            .unwrap();
        assert_eq!(original.record(), parsed.record());
    }

    #[test]
    fn test_record_order() {
        let d = EdifactDelimiters::default();
        assert_eq!(d.record(), [':', '+', '.', '?', ' ', '\'']);
    }
}
