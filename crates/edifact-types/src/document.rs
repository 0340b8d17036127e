use crate::{EdifactDelimiters, SegmentTag};

/// An owned EDIFACT segment: either the service string advice (`UNA`) or a
/// data segment with a recognised tag and its element/component values.
///
/// Unlike [`crate::RawSegment`], which borrows from the input buffer for the
/// zero-copy streaming API, `Segment` owns its strings so a parsed document
/// can outlive the bytes it was parsed from and be handed to an emitter,
/// XML mapper, or annotator as an independent value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// The service string advice segment. Valid only at document index 0,
    /// and at most once per document — see [`Document::push`].
    Una(EdifactDelimiters),
    /// A data segment: a recognised tag followed by its elements, each of
    /// which is a (possibly single-element) list of components.
    Data {
        tag: SegmentTag,
        elements: Vec<Vec<String>>,
    },
}

impl Segment {
    /// Convenience constructor for a data segment.
    pub fn data(tag: SegmentTag, elements: Vec<Vec<String>>) -> Self {
        Self::Data { tag, elements }
    }

    /// The segment's tag as a string: `"UNA"` for the service string advice,
    /// the data tag otherwise.
    pub fn tag_str(&self) -> &str {
        match self {
            Self::Una(_) => "UNA",
            Self::Data { tag, .. } => tag.as_str(),
        }
    }

    pub fn is_una(&self) -> bool {
        matches!(self, Self::Una(_))
    }

    /// The data segment's elements, or `None` for `Una`.
    pub fn data(&self) -> Option<&Vec<Vec<String>>> {
        match self {
            Self::Una(_) => None,
            Self::Data { elements, .. } => Some(elements),
        }
    }

    /// Gets component `component_index` of element `element_index`, or `""`
    /// if either index is out of range. No-op (returns `""`) for `Una`.
    pub fn get_component(&self, element_index: usize, component_index: usize) -> &str {
        match self {
            Self::Una(_) => "",
            Self::Data { elements, .. } => elements
                .get(element_index)
                .and_then(|e| e.get(component_index))
                .map(String::as_str)
                .unwrap_or(""),
        }
    }
}

/// Error returned when building a [`Document`] from a segment sequence that
/// violates the `UNA`-placement invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// A `UNA` segment appeared somewhere other than index 0.
    UnaNotFirst { index: usize },
    /// More than one `UNA` segment was present.
    DuplicateUna,
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnaNotFirst { index } => {
                write!(f, "UNA segment must be at index 0, found at index {index}")
            }
            Self::DuplicateUna => write!(f, "a document may carry at most one UNA segment"),
        }
    }
}

impl std::error::Error for DocumentError {}

/// An owned EDIFACT interchange: an ordered sequence of [`Segment`]s.
///
/// `UNA`, if present, is always at index 0 — this is enforced by
/// [`Document::new`] and [`Document::push`] rather than left to callers to
/// uphold by convention.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    segments: Vec<Segment>,
}

impl Document {
    /// Builds a document from a complete segment list, validating the `UNA`
    /// placement invariant up front.
    pub fn new(segments: Vec<Segment>) -> Result<Self, DocumentError> {
        for (index, segment) in segments.iter().enumerate() {
            if segment.is_una() && index != 0 {
                return if segments[0].is_una() {
                    Err(DocumentError::DuplicateUna)
                } else {
                    Err(DocumentError::UnaNotFirst { index })
                };
            }
        }
        Ok(Self { segments })
    }

    /// An empty document with no segments.
    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Appends a segment, rejecting a `UNA` that would violate the
    /// placement invariant.
    pub fn push(&mut self, segment: Segment) -> Result<(), DocumentError> {
        if segment.is_una() {
            if !self.segments.is_empty() {
                return Err(if self.segments[0].is_una() {
                    DocumentError::DuplicateUna
                } else {
                    DocumentError::UnaNotFirst {
                        index: self.segments.len(),
                    }
                });
            }
        }
        self.segments.push(segment);
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// The `UNA` segment's delimiters, if a service string advice was
    /// present, else `None`.
    pub fn una(&self) -> Option<&EdifactDelimiters> {
        match self.segments.first() {
            Some(Segment::Una(d)) => Some(d),
            _ => None,
        }
    }

    /// Iterates over the document's data segments, skipping `UNA`.
    pub fn data_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| !s.is_una())
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nad(value: &str) -> Segment {
        Segment::data(
            SegmentTag::parse("NAD").unwrap(),
            vec![vec![value.to_string()]],
        )
    }

    #[test]
    fn test_document_without_una() {
        let doc = Document::new(vec![nad("BY")]).unwrap();
        assert!(doc.una().is_none());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_document_with_una_at_index_zero() {
        let doc = Document::new(vec![
            Segment::Una(EdifactDelimiters::default()),
            nad("BY"),
        ])
        .unwrap();
        assert!(doc.una().is_some());
        assert_eq!(doc.data_segments().count(), 1);
    }

    #[test]
    fn test_document_rejects_una_not_first() {
        let err = Document::new(vec![nad("BY"), Segment::Una(EdifactDelimiters::default())])
            .unwrap_err();
        assert_eq!(err, DocumentError::UnaNotFirst { index: 1 });
    }

    #[test]
    fn test_document_rejects_duplicate_una() {
        let err = Document::new(vec![
            Segment::Una(EdifactDelimiters::default()),
            Segment::Una(EdifactDelimiters::default()),
        ])
        .unwrap_err();
        assert_eq!(err, DocumentError::DuplicateUna);
    }

    #[test]
    fn test_push_builds_same_as_new() {
        let mut doc = Document::empty();
        doc.push(Segment::Una(EdifactDelimiters::default())).unwrap();
        doc.push(nad("BY")).unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_push_rejects_second_una() {
        let mut doc = Document::empty();
        doc.push(Segment::Una(EdifactDelimiters::default())).unwrap();
        let err = doc.push(Segment::Una(EdifactDelimiters::default())).unwrap_err();
        assert_eq!(err, DocumentError::DuplicateUna);
    }

    #[test]
    fn test_push_rejects_una_after_data() {
        let mut doc = Document::empty();
        doc.push(nad("BY")).unwrap();
        let err = doc.push(Segment::Una(EdifactDelimiters::default())).unwrap_err();
        assert_eq!(err, DocumentError::UnaNotFirst { index: 1 });
    }

    #[test]
    fn test_get_component() {
        let seg = nad("BY");
        assert_eq!(seg.get_component(0, 0), "BY");
        assert_eq!(seg.get_component(0, 1), "");
        assert_eq!(seg.get_component(1, 0), "");
    }

    #[test]
    fn test_data_returns_elements_for_data_segment() {
        let seg = nad("BY");
        assert_eq!(seg.data(), Some(&vec![vec!["BY".to_string()]]));
    }

    #[test]
    fn test_data_is_none_for_una() {
        let seg = Segment::Una(EdifactDelimiters::default());
        assert_eq!(seg.data(), None);
    }

    #[test]
    fn test_una_get_component_is_empty() {
        let seg = Segment::Una(EdifactDelimiters::default());
        assert_eq!(seg.get_component(0, 0), "");
        assert_eq!(seg.tag_str(), "UNA");
    }
}
