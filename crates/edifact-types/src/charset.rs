/// A four-letter syntax identifier, as carried in the first component of a
/// `UNB` segment's first data element (e.g. `UNOY`).
///
/// Binds an interchange to one of the encodings in the table below. This
/// type is a thin newtype rather than an enum because unrecognised
/// identifiers must be representable (for error reporting) without panicking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxIdentifier(pub String);

impl SyntaxIdentifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SyntaxIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the charset table: the encoding a syntax identifier maps to,
/// plus an optional whitelist of printable characters accepted under it.
pub struct Charset {
    pub identifier: &'static str,
    pub description: &'static str,
    /// `None` means "no whitelist beyond Unicode printability".
    pub whitelist: Option<&'static [char]>,
}

const UNOA_UNOB_WHITELIST: &[char] = &[
    ' ', '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', '0', '1',
    '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?', '@', 'A', 'B', 'C', 'D',
    'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W',
    'X', 'Y', 'Z', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~',
];

const UNOB_EXTRA_LOWERCASE: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// The charset table: every syntax identifier this codec recognises.
///
/// `UNOA` keeps the restricted uppercase-only whitelist; `UNOB` would add
/// lowercase but the table row for it is generated at lookup time in
/// [`whitelist_for`] to avoid duplicating ~70 `char` literals twice.
pub const CHARSETS: &[Charset] = &[
    Charset {
        identifier: "UNOA",
        description: "ASCII, restricted (uppercase + digits + symbols)",
        whitelist: Some(UNOA_UNOB_WHITELIST),
    },
    Charset {
        identifier: "UNOB",
        description: "ASCII, extended (adds lowercase)",
        whitelist: None, // see whitelist_for
    },
    Charset {
        identifier: "UNOC",
        description: "ISO-8859-1",
        whitelist: None,
    },
    Charset {
        identifier: "UNOD",
        description: "ISO-8859-2",
        whitelist: None,
    },
    Charset {
        identifier: "UNOE",
        description: "ISO-8859-5",
        whitelist: None,
    },
    Charset {
        identifier: "UNOF",
        description: "ISO-8859-7",
        whitelist: None,
    },
    Charset {
        identifier: "UNOG",
        description: "ISO-8859-3",
        whitelist: None,
    },
    Charset {
        identifier: "UNOH",
        description: "ISO-8859-4",
        whitelist: None,
    },
    Charset {
        identifier: "UNOI",
        description: "ISO-8859-6",
        whitelist: None,
    },
    Charset {
        identifier: "UNOJ",
        description: "ISO-8859-8",
        whitelist: None,
    },
    Charset {
        identifier: "UNOK",
        description: "ISO-8859-9",
        whitelist: None,
    },
    Charset {
        identifier: "UNOL",
        description: "ISO-8859-15",
        whitelist: None,
    },
    Charset {
        identifier: "UNOX",
        description: "ISO-2022-JP extended",
        whitelist: None,
    },
    Charset {
        identifier: "UNOY",
        description: "UTF-8 (ISO 10646-1)",
        whitelist: None,
    },
    Charset {
        identifier: "UNOW",
        description: "UTF-16 (ISO 10646-1 with code extension)",
        whitelist: None,
    },
];

/// Looks up the charset row for a syntax identifier.
pub fn lookup(identifier: &str) -> Option<&'static Charset> {
    CHARSETS.iter().find(|c| c.identifier == identifier)
}

/// Every recognised identifier, in table order — used when falling back
/// across all encodings on a decode failure.
pub fn all_identifiers() -> impl Iterator<Item = &'static str> {
    CHARSETS.iter().map(|c| c.identifier)
}

/// Returns the whitelist for `identifier`, if one is defined, building the
/// `UNOB` whitelist (uppercase whitelist + lowercase) lazily.
pub fn whitelist_for(identifier: &str) -> Option<Vec<char>> {
    match identifier {
        "UNOA" => Some(UNOA_UNOB_WHITELIST.to_vec()),
        "UNOB" => Some(
            UNOA_UNOB_WHITELIST
                .iter()
                .chain(UNOB_EXTRA_LOWERCASE)
                .copied()
                .collect(),
        ),
        _ => None,
    }
}
