//! Element projection: one XML element → flat columns.
//!
//! Naming convention:
//! - attribute `name` on `<Tag>` → column `Tag_name`;
//! - non-blank direct text of `<Tag>` → column `Tag` (raw, unstripped).
//!
//! [`project`] never recurses. Tables that flatten a whole subtree use
//! [`project_subtree`], which merges the projections of every element the
//! [`TagFilter`] allows; later elements overwrite earlier ones on collision.

use crate::model::{element::Element, table::Row};

/// Which tags take part in a subtree walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFilter {
    All,
    Include(&'static [&'static str]),
    Exclude(&'static [&'static str]),
}

impl TagFilter {
    pub fn allows(&self, tag: &str) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Include(tags) => tags.contains(&tag),
            TagFilter::Exclude(tags) => !tags.contains(&tag),
        }
    }
}

/// Project one element's own attributes and text.
pub fn project(element: &Element) -> Row {
    let mut row = Row::new();
    project_into(element, &mut row);
    row
}

/// Merge projections of `element` and its descendants, in document order.
pub fn project_subtree(element: &Element, filter: TagFilter) -> Row {
    let mut row = Row::new();
    for e in element.iter().filter(|e| filter.allows(&e.tag)) {
        project_into(e, &mut row);
    }
    row
}

/// Copy of `element` where only tags the filter allows keep their attributes
/// and text. The structure is kept, so the copy hashes like a subtree.
pub fn filtered_subtree(element: &Element, filter: TagFilter) -> Element {
    let mut out = Element::new(element.tag.clone());
    if filter.allows(&element.tag) {
        out.attributes = element.attributes.clone();
        out.text = element.text.clone();
    }
    out.children = element
        .children
        .iter()
        .map(|c| filtered_subtree(c, filter))
        .collect();
    out
}

fn project_into(element: &Element, row: &mut Row) {
    for (name, value) in &element.attributes {
        row.insert(format!("{}_{}", element.tag, name), value.clone());
    }
    if element.has_text() {
        row.insert(element.tag.clone(), element.text.clone());
    }
}
