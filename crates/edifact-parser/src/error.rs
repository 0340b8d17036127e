use edifact_types::{DelimiterConflict, SegmentPosition};

/// Errors that can occur during EDIFACT parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The UNA service string advice header is invalid.
    #[error("invalid UNA header at byte {offset}")]
    InvalidUna { offset: usize },

    /// A segment was not properly terminated.
    #[error("unterminated segment at byte {offset}")]
    UnterminatedSegment { offset: usize },

    /// The input ended unexpectedly.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The input contains invalid UTF-8.
    #[error("invalid UTF-8 at byte {offset}: {source}")]
    InvalidUtf8 {
        offset: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A segment ID could not be determined.
    #[error("empty segment ID at byte {offset}")]
    EmptySegmentId { offset: usize },

    /// Handler returned Control::Stop.
    #[error("parsing stopped by handler at {position}")]
    StoppedByHandler { position: SegmentPosition },

    /// The UNA delimiters fail the pairwise-distinctness invariant.
    #[error("delimiter configuration error: {0}")]
    ConfigError(#[from] DelimiterConflict),

    /// A three-letter tag outside the recognised segment set.
    #[error("unknown segment tag {tag:?} at {position}")]
    UnknownSegment {
        tag: String,
        position: SegmentPosition,
    },

    /// The `UNB` syntax identifier is not in the charset table.
    #[error("unsupported syntax identifier {identifier:?}")]
    UnsupportedIdentifier { identifier: String },

    /// The input could not be decoded under the sniffed identifier, nor
    /// under any fallback identifier in the charset table.
    #[error("input is not decodable under any known charset")]
    Undecodable,
}
