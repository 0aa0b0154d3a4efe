//! Front-matter parsing.
//!
//! Articles start with an optional `---`-delimited header block of
//! `key: value` lines:
//!
//! ```text
//! ---
//! title: Getting Started
//! category: Guides > Setup
//! ---
//! ```
//!
//! Parsing never fails: a missing block yields empty front-matter, and
//! malformed lines inside the block are skipped with a warning.

use indexmap::IndexMap;

/// Delimiter line opening and closing the front-matter block.
const DELIMITER: &str = "---";

/// Parsed front-matter fields in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frontmatter {
    fields: IndexMap<String, String>,
}

impl Frontmatter {
    /// Split `raw` into front-matter and body.
    ///
    /// The block must start on the first line and close with a second
    /// `---` line; without a closing delimiter the whole input is treated
    /// as body. The returned body has the block removed and is trimmed.
    #[must_use]
    pub fn parse(raw: &str) -> (Self, String) {
        let mut lines = raw.lines();
        if lines.next().map(str::trim) != Some(DELIMITER) {
            return (Self::default(), raw.trim().to_owned());
        }

        let mut fields = IndexMap::new();
        let mut consumed = false;
        for line in lines.by_ref() {
            if line.trim() == DELIMITER {
                consumed = true;
                break;
            }
            if let Some((key, value)) = line.split_once(": ") {
                fields.insert(key.trim().to_owned(), value.trim().to_owned());
            } else if !line.trim().is_empty() {
                tracing::warn!(line, "skipping malformed front-matter line");
            }
        }

        if !consumed {
            // Unterminated block: not front-matter after all
            return (Self::default(), raw.trim().to_owned());
        }

        let body = lines.collect::<Vec<_>>().join("\n").trim().to_owned();
        (Self { fields }, body)
    }

    /// Look up a field by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The `title` field, if present.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    /// The `category` field, if present and non-empty.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.get("category").filter(|c| !c.trim().is_empty())
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Iterate fields in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
