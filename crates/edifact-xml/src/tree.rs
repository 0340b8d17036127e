/// A generic, ordered XML element tree.
///
/// This is the in-memory representation [`crate::mapping::make_xml`] and
/// [`crate::mapping::parse_xml`] operate on; [`crate::pretty::pretty_xml`]
/// and [`crate::serialize`]/[`crate::deserialize`] convert it to and from
/// text. Attributes are kept as an ordered `Vec` rather than a map so
/// insertion order from annotation is preserved until pretty-printing
/// explicitly sorts them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    pub fn push_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((key.into(), value.into()));
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(&self, index: usize) -> Option<&XmlElement> {
        self.children.get(index)
    }
}
