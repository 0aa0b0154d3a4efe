//! Table of contents tree construction.
//!
//! Headings arrive in document order; the tree mirrors heading nesting by
//! level, not list nesting. An entry becomes a child of the nearest
//! preceding entry with a strictly smaller level.

use serde::Serialize;

/// One table-of-contents entry with its nested children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Anchor id, unique across the document.
    pub id: String,
    /// Plain heading text.
    pub title: String,
    /// Heading level (1-6).
    pub level: u8,
    /// Entries nested under this heading.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    pub(crate) fn new(id: String, title: String, level: u8) -> Self {
        Self {
            id,
            title,
            level,
            children: Vec::new(),
        }
    }
}

/// Builds the TOC tree from headings in document order.
///
/// Maintains a stack of open ancestors. A new entry pops everything with an
/// equal or greater level, then the popped entries attach to the entry below
/// them (or to the document list when the stack empties).
#[derive(Default)]
pub(crate) struct TocBuilder {
    roots: Vec<TocEntry>,
    stack: Vec<TocEntry>,
}

impl TocBuilder {
    fn attach(&mut self, entry: TocEntry) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(entry),
            None => self.roots.push(entry),
        }
    }

    pub(crate) fn push(&mut self, entry: TocEntry) {
        while self
            .stack
            .last()
            .is_some_and(|top| top.level >= entry.level)
        {
            if let Some(closed) = self.stack.pop() {
                self.attach(closed);
            }
        }
        self.stack.push(entry);
    }

    pub(crate) fn finish(mut self) -> Vec<TocEntry> {
        while let Some(closed) = self.stack.pop() {
            self.attach(closed);
        }
        self.roots
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(id: &str, level: u8) -> TocEntry {
        TocEntry::new(id.to_owned(), id.to_uppercase(), level)
    }

    fn build(entries: Vec<TocEntry>) -> Vec<TocEntry> {
        let mut builder = TocBuilder::default();
        for e in entries {
            builder.push(e);
        }
        builder.finish()
    }

    #[test]
    fn test_empty() {
        assert!(build(Vec::new()).is_empty());
    }

    #[test]
    fn test_siblings_under_parent() {
        // # A, ## B, ## C, # D
        let toc = build(vec![
            entry("a", 1),
            entry("b", 2),
            entry("c", 2),
            entry("d", 1),
        ]);

        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].title, "A");
        assert_eq!(toc[0].children.len(), 2);
        assert_eq!(toc[0].children[0].title, "B");
        assert_eq!(toc[0].children[1].title, "C");
        assert!(toc[0].children[0].children.is_empty());
        assert_eq!(toc[1].title, "D");
        assert!(toc[1].children.is_empty());
    }

    #[test]
    fn test_deep_nesting() {
        let toc = build(vec![entry("a", 1), entry("b", 2), entry("c", 3)]);

        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].children[0].children[0].title, "C");
    }

    #[test]
    fn test_level_jump_attaches_to_nearest_smaller() {
        // # A, #### B: B nests directly under A despite the gap
        let toc = build(vec![entry("a", 1), entry("b", 4)]);

        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].children.len(), 1);
        assert_eq!(toc[0].children[0].level, 4);
    }

    #[test]
    fn test_document_starting_below_level_one() {
        // ## A, # B: A has no smaller ancestor, both are roots
        let toc = build(vec![entry("a", 2), entry("b", 1)]);

        assert_eq!(toc.len(), 2);
        assert!(toc[0].children.is_empty());
    }

    #[test]
    fn test_equal_levels_never_nest() {
        let toc = build(vec![entry("a", 3), entry("b", 3), entry("c", 3)]);

        assert_eq!(toc.len(), 3);
        assert!(toc.iter().all(|e| e.children.is_empty()));
    }

    #[test]
    fn test_serialization_skips_empty_children() {
        let toc = build(vec![entry("a", 1), entry("b", 2)]);
        let json = serde_json::to_value(&toc).unwrap();

        assert_eq!(json[0]["id"], "a");
        assert_eq!(json[0]["children"][0]["id"], "b");
        assert!(json[0]["children"][0].get("children").is_none());
    }
}
