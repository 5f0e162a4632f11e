//! Owned XML element tree.
//!
//! The document is small (one message), so the whole tree is materialized once
//! and every extractor borrows subtrees from it.

/// A single XML element with its attributes, direct text and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Local tag name (namespace prefix dropped).
    pub tag: String,
    /// Attributes in document order as `(local name, unescaped value)`.
    pub attributes: Vec<(String, String)>,
    /// Concatenated direct text/CDATA content, unescaped and untrimmed.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper, mostly for tests.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with `tag`.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct children with `tag`.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// First element with `tag` in pre-order, including `self`.
    pub fn find_descendant(&self, tag: &str) -> Option<&Element> {
        self.iter().find(|e| e.tag == tag)
    }

    /// Pre-order walk over `self` and all descendants.
    pub fn iter(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// `true` when the direct text has non-whitespace content.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Pre-order iterator returned by [`Element::iter`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
