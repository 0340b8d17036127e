//! Syntax-identifier sniffing and charset decoding.
//!
//! Finds `UNB`, then finds the first `UNO` substring after it, and reads
//! the next four bytes as the syntax identifier. If no `UNB` is present,
//! falls back to a caller-supplied default identifier. Decoding then goes
//! through `encoding_rs`, trying every other known identifier's encoding
//! on failure before giving up.

use edifact_types::charset;

use crate::ParseError;

/// Maps a syntax identifier to its `encoding_rs` encoding.
///
/// Lives here rather than in `edifact_types::charset` so that the leaf
/// types crate stays free of the `encoding_rs` dependency.
fn encoding_for(identifier: &str) -> Option<&'static encoding_rs::Encoding> {
    use encoding_rs::*;
    Some(match identifier {
        "UNOA" | "UNOB" => WINDOWS_1252, // ASCII-range whitelist enforced separately
        "UNOC" => WINDOWS_1252,          // ISO-8859-1 superset, ASCII-compatible
        "UNOD" => ISO_8859_2,
        "UNOE" => ISO_8859_5,
        "UNOF" => ISO_8859_7,
        "UNOG" => ISO_8859_3,
        "UNOH" => ISO_8859_4,
        "UNOI" => ISO_8859_6,
        "UNOJ" => ISO_8859_8,
        "UNOK" => WINDOWS_1254, // ISO-8859-9 has no dedicated encoding_rs label; 1254 is its superset
        "UNOL" => ISO_8859_15,
        "UNOX" => ISO_2022_JP,
        "UNOY" => UTF_8,
        "UNOW" => UTF_16LE,
        _ => return None,
    })
}

/// Scans `input` for `UNB` then `UNO`, returning the 4-byte identifier that
/// follows, if found.
fn sniff_identifier(input: &[u8]) -> Option<String> {
    let unb_pos = find(input, b"UNB")?;
    let after_unb = &input[unb_pos..];
    let uno_pos = find(after_unb, b"UNO")?;
    let ident_start = uno_pos;
    let ident_end = ident_start + 4;
    if ident_end > after_unb.len() {
        return None;
    }
    std::str::from_utf8(&after_unb[ident_start..ident_end])
        .ok()
        .map(str::to_string)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Outcome of sniffing: the identifier that was used and the decoded text.
pub struct Sniffed {
    pub identifier: String,
    pub text: String,
}

/// Detects the syntax identifier in `input` and decodes it to UTF-8 text.
///
/// `default_identifier` is used when no `UNB+UNOx` marker is found at all.
/// On decode failure under the sniffed identifier, every other table
/// identifier's encoding is tried in turn; the first one that decodes
/// without replacement characters wins.
pub fn sniff_and_decode(input: &[u8], default_identifier: &str) -> Result<Sniffed, ParseError> {
    let identifier = sniff_identifier(input).unwrap_or_else(|| default_identifier.to_string());
    if let Some(text) = try_decode(input, &identifier) {
        return Ok(Sniffed { identifier, text });
    }

    for candidate in charset::all_identifiers() {
        if candidate == identifier {
            continue;
        }
        if let Some(text) = try_decode(input, candidate) {
            return Ok(Sniffed {
                identifier: candidate.to_string(),
                text,
            });
        }
    }

    Err(ParseError::Undecodable)
}

fn try_decode(input: &[u8], identifier: &str) -> Option<String> {
    let encoding = encoding_for(identifier)?;
    let (text, _, had_errors) = encoding.decode(input);
    if had_errors {
        None
    } else {
        Some(text.into_owned())
    }
}

/// Scans decoded `text` for characters outside `identifier`'s whitelist
/// (only `UNOA`/`UNOB` have one). Returns the offending characters found,
/// for callers that want to surface a non-fatal warning.
pub fn invalid_characters(text: &str, identifier: &str) -> Vec<char> {
    let Some(whitelist) = charset::whitelist_for(identifier) else {
        return Vec::new();
    };
    text.chars().filter(|c| !whitelist.contains(c)).collect()
}
