//! Heading anchor ids.
//!
//! Slugification itself is delegated to the `slug` crate (lowercase,
//! ASCII-transliterated, hyphen-separated). [`SlugCounter`] makes the
//! resulting ids unique within one document.

use std::collections::HashMap;

/// Derive a URL-safe slug from heading text.
///
/// Text that slugifies to nothing (punctuation-only headings) falls back
/// to `"section"` so every heading still gets an anchor.
#[must_use]
pub fn slugify(text: &str) -> String {
    let slug = slug::slugify(text);
    if slug.is_empty() {
        "section".to_owned()
    } else {
        slug
    }
}

/// Document-scoped disambiguation of repeated base slugs.
///
/// The first occurrence keeps the bare slug; each repeat gets a `-N`
/// suffix with a 1-based counter per base slug. Created fresh for every
/// render pass, never shared across documents.
#[derive(Default)]
pub(crate) struct SlugCounter {
    seen: HashMap<String, usize>,
}

impl SlugCounter {
    /// Assign a unique id for `base`.
    pub(crate) fn assign(&mut self, base: &str) -> String {
        let count = self.seen.entry(base.to_owned()).or_insert(0);
        let id = if *count == 0 {
            base.to_owned()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        id
    }
}
