//! Article records.

use serde::Serialize;

use crate::category::UNCATEGORIZED;
use crate::frontmatter::Frontmatter;

/// One loaded article: stable slug, parsed front-matter, markdown body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Article {
    /// Unique, stable identifier derived from the source file name.
    pub slug: String,
    /// Parsed front-matter header.
    pub frontmatter: Frontmatter,
    /// Markdown body with the front-matter block removed.
    pub content: String,
}

impl Article {
    /// Build an article from raw source text (front-matter plus body).
    #[must_use]
    pub fn from_source(slug: impl Into<String>, raw: &str) -> Self {
        let (frontmatter, content) = Frontmatter::parse(raw);
        Self {
            slug: slug.into(),
            frontmatter,
            content,
        }
    }

    /// Display title; falls back to the slug when front-matter omits one.
    #[must_use]
    pub fn title(&self) -> &str {
        self.frontmatter.title().unwrap_or(&self.slug)
    }

    /// Category path; falls back to [`UNCATEGORIZED`] when absent.
    #[must_use]
    pub fn category(&self) -> &str {
        self.frontmatter.category().unwrap_or(UNCATEGORIZED)
    }
}

/// Lightweight article reference held by category nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArticleRef {
    /// Display title.
    pub title: String,
    /// Slug of the referenced article.
    pub slug: String,
}

/// Find an article by slug.
#[must_use]
pub fn find_article<'a>(articles: &'a [Article], slug: &str) -> Option<&'a Article> {
    articles.iter().find(|a| a.slug == slug)
}
