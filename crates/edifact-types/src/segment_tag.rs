/// The closed set of recognised EDIFACT segment tags.
///
/// Kept sorted so admission checks can binary-search instead of hashing.
pub const RECOGNISED_SEGMENTS: &[&str] = &[
    "ADR", "AGR", "AJT", "ALC", "ALI", "APP", "APR", "ARD", "ARR", "ASI", "ATT", "AUT", "BAS",
    "BGM", "BII", "BUS", "CAV", "CCD", "CCI", "CDI", "CDS", "CDV", "CED", "CIN", "CLA", "CLI",
    "CMP", "CNI", "CNT", "COD", "COM", "COT", "CPI", "CPS", "CPT", "CST", "CTA", "CUX", "DAM",
    "DFN", "DGS", "DII", "DIM", "DLI", "DLM", "DMS", "DOC", "DRD", "DSG", "DSI", "DTM", "EDT",
    "EFI", "ELM", "ELU", "ELV", "EMP", "EQA", "EQD", "EQN", "ERC", "ERP", "EVE", "FCA", "FII",
    "FNS", "FNT", "FOR", "FSQ", "FTX", "GDS", "GEI", "GID", "GIN", "GIR", "GOR", "GPO", "GRU",
    "HAN", "HYN", "ICD", "IDE", "IFD", "IHC", "IMD", "IND", "INP", "INV", "IRQ", "LAN", "LIN",
    "LOC", "MEA", "MEM", "MKS", "MOA", "MSG", "MTD", "NAD", "NAT", "PAC", "PAI", "PAS", "PCC",
    "PCD", "PCI", "PDI", "PER", "PGI", "PIA", "PNA", "POC", "PRC", "PRI", "PRV", "PSD", "PTY",
    "PYT", "QRS", "QTY", "QUA", "QVR", "RCS", "REL", "RFF", "RJL", "RNG", "ROD", "RSL", "RTE",
    "SAL", "SCC", "SCD", "SEG", "SEL", "SEQ", "SFI", "SGP", "SGU", "SPR", "SPS", "STA", "STC",
    "STG", "STS", "TAX", "TCC", "TDT", "TEM", "TMD", "TMP", "TOD", "TPL", "TRU", "TSR", "UCD",
    "UCF", "UCI", "UCM", "UCS", "UGH", "UGT", "UIB", "UIH", "UIR", "UIT", "UIZ", "UNB", "UNE",
    "UNG", "UNH", "UNO", "UNP", "UNS", "UNT", "UNZ", "USA", "USB", "USC", "USD", "USE", "USF",
    "USH", "USL", "USR", "UST", "USU", "USX", "USY", "VLI",
];
// 190 entries. Does not include `UNA` (the service-string-advice segment
// is detected and handled before tag admission is checked at all).

/// Error returned when a three-letter tag is not in the recognised set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSegment(pub String);

impl std::fmt::Display for UnknownSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown segment tag {:?}", self.0)
    }
}

impl std::error::Error for UnknownSegment {}

/// A validated, uppercase, three-letter EDIFACT segment tag.
///
/// `UNA` is handled specially by callers (it is a service-string advice, not
/// a tag with data elements) and is deliberately absent from
/// [`RECOGNISED_SEGMENTS`] — see `edifact_types::Segment`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentTag(String);

impl SegmentTag {
    /// Validates `tag` against the recognised set (case-insensitively,
    /// normalising to uppercase).
    pub fn parse(tag: &str) -> Result<Self, UnknownSegment> {
        let upper = tag.to_ascii_uppercase();
        if is_recognised(&upper) {
            Ok(Self(upper))
        } else {
            Err(UnknownSegment(tag.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SegmentTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SegmentTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns `true` if `tag` (already uppercase) is in the recognised set.
pub fn is_recognised(tag: &str) -> bool {
    RECOGNISED_SEGMENTS.binary_search(&tag).is_ok()
}
