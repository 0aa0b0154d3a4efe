//! Category tree construction.
//!
//! Articles carry a `"A > B > C"` category path in front-matter; the tree
//! folds those flat paths into nested [`CategoryNode`]s for the navigation
//! sidebar. The tree is rebuilt from scratch whenever the article set
//! changes; there is no incremental update.

use indexmap::IndexMap;
use serde::Serialize;

use crate::article::{Article, ArticleRef};

/// Fallback category label for articles without a usable `category` field.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Literal separator between category path segments.
pub const CATEGORY_SEPARATOR: &str = " > ";

/// One category path segment with its articles and child categories.
///
/// Articles attach only at the final segment of their path; intermediate
/// segments never hold article entries. Key order is first-seen order, both
/// here and at the tree root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    /// Articles whose category path terminates at this node, input order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub articles: Vec<ArticleRef>,
    /// Child categories keyed by name.
    #[serde(rename = "subCategories", skip_serializing_if = "IndexMap::is_empty")]
    pub sub_categories: IndexMap<String, CategoryNode>,
}

impl CategoryNode {
    /// Deep search for an article slug in this node's subtree.
    #[must_use]
    pub fn contains_slug(&self, slug: &str) -> bool {
        self.articles.iter().any(|a| a.slug == slug)
            || self.sub_categories.values().any(|n| n.contains_slug(slug))
    }
}

/// Root of the category tree: top-level categories keyed by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTree {
    roots: IndexMap<String, CategoryNode>,
}

impl CategoryTree {
    /// Look up a top-level category by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CategoryNode> {
        self.roots.get(name)
    }

    /// Iterate top-level categories in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryNode)> {
        self.roots.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Number of top-level categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Deep search for an article slug anywhere in the tree.
    ///
    /// Drives the sidebar's expand-active-branch behavior.
    #[must_use]
    pub fn contains_slug(&self, slug: &str) -> bool {
        self.roots.values().any(|n| n.contains_slug(slug))
    }
}

/// Fold a flat article list into a category tree.
///
/// Splits each article's category on the literal `" > "` separator, walks
/// the segments left to right creating nodes as needed (revisits reuse the
/// existing node), and appends an [`ArticleRef`] at the final segment.
/// No sorting: category order is first-seen, article order is input order.
/// Pure function of its input; never fails.
#[must_use]
pub fn build_category_tree(articles: &[Article]) -> CategoryTree {
    let mut roots: IndexMap<String, CategoryNode> = IndexMap::new();

    for article in articles {
        let segments: Vec<&str> = article
            .category()
            .split(CATEGORY_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let segments = if segments.is_empty() {
            vec![UNCATEGORIZED]
        } else {
            segments
        };

        let last = segments.len() - 1;
        let mut current = &mut roots;
        for (depth, name) in segments.into_iter().enumerate() {
            let node = current.entry(name.to_owned()).or_default();
            if depth == last {
                node.articles.push(ArticleRef {
                    title: article.title().to_owned(),
                    slug: article.slug.clone(),
                });
                break;
            }
            current = &mut node.sub_categories;
        }
    }

    CategoryTree { roots }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn article(slug: &str, title: &str, category: &str) -> Article {
        Article::from_source(
            slug,
            &format!("---\ntitle: {title}\ncategory: {category}\n---\nbody"),
        )
    }

    #[test]
    fn test_empty_input() {
        let tree = build_category_tree(&[]);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_single_segment() {
        let tree = build_category_tree(&[article("s1", "T1", "Guides")]);

        assert_eq!(tree.len(), 1);
        let guides = tree.get("Guides").unwrap();
        assert_eq!(guides.articles.len(), 1);
        assert_eq!(guides.articles[0].slug, "s1");
        assert_eq!(guides.articles[0].title, "T1");
        assert!(guides.sub_categories.is_empty());
    }

    #[test]
    fn test_shared_prefix_branches() {
        let tree = build_category_tree(&[
            article("s1", "T1", "A > B"),
            article("s2", "T2", "A > C"),
        ]);

        assert_eq!(tree.len(), 1);
        let a = tree.get("A").unwrap();
        assert!(a.articles.is_empty());
        assert_eq!(a.sub_categories.len(), 2);
        assert_eq!(a.sub_categories["B"].articles[0].slug, "s1");
        assert_eq!(a.sub_categories["C"].articles[0].slug, "s2");
    }

    #[test]
    fn test_articles_only_at_leaf_depth() {
        let tree = build_category_tree(&[
            article("deep", "Deep", "A > B > C"),
            article("mid", "Mid", "A > B"),
        ]);

        let a = tree.get("A").unwrap();
        let b = &a.sub_categories["B"];
        let c = &b.sub_categories["C"];
        assert!(a.articles.is_empty());
        assert_eq!(b.articles[0].slug, "mid");
        assert_eq!(c.articles[0].slug, "deep");
    }

    #[test]
    fn test_first_seen_category_order() {
        let tree = build_category_tree(&[
            article("s1", "T1", "Zebra"),
            article("s2", "T2", "Alpha"),
            article("s3", "T3", "Zebra"),
        ]);

        let names: Vec<_> = tree.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zebra", "Alpha"]);
        assert_eq!(tree.get("Zebra").unwrap().articles.len(), 2);
    }

    #[test]
    fn test_article_order_preserved() {
        let tree = build_category_tree(&[
            article("s1", "T1", "Guides"),
            article("s2", "T2", "Guides"),
            article("s3", "T3", "Guides"),
        ]);

        let slugs: Vec<_> = tree
            .get("Guides")
            .unwrap()
            .articles
            .iter()
            .map(|a| a.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn test_missing_category_falls_back() {
        let tree = build_category_tree(&[Article::from_source("lost", "just a body")]);

        let node = tree.get(UNCATEGORIZED).unwrap();
        assert_eq!(node.articles[0].slug, "lost");
        // Missing title falls back to the slug
        assert_eq!(node.articles[0].title, "lost");
    }

    #[test]
    fn test_rebuild_is_structurally_equal() {
        let articles = vec![
            article("s1", "T1", "A > B"),
            article("s2", "T2", "A"),
            article("s3", "T3", "C"),
        ];

        assert_eq!(build_category_tree(&articles), build_category_tree(&articles));
    }

    #[test]
    fn test_every_article_appears_once_at_path_depth() {
        fn count(node: &CategoryNode, slug: &str, depth: usize, hits: &mut Vec<usize>) {
            for a in &node.articles {
                if a.slug == slug {
                    hits.push(depth);
                }
            }
            for child in node.sub_categories.values() {
                count(child, slug, depth + 1, hits);
            }
        }

        let articles = vec![
            article("one", "One", "A"),
            article("two", "Two", "A > B"),
            article("three", "Three", "A > B > C"),
        ];
        let tree = build_category_tree(&articles);

        for (slug, expected_depth) in [("one", 1), ("two", 2), ("three", 3)] {
            let mut hits = Vec::new();
            for (_, node) in tree.iter() {
                count(node, slug, 1, &mut hits);
            }
            assert_eq!(hits, vec![expected_depth], "slug {slug}");
        }
    }

    #[test]
    fn test_contains_slug_deep() {
        let tree = build_category_tree(&[article("deep", "Deep", "A > B > C")]);

        assert!(tree.contains_slug("deep"));
        assert!(tree.get("A").unwrap().contains_slug("deep"));
        assert!(!tree.contains_slug("missing"));
    }

    #[test]
    fn test_serialization_shape() {
        let tree = build_category_tree(&[article("s1", "T1", "A > B")]);
        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(
            json["A"]["subCategories"]["B"]["articles"][0]["slug"],
            "s1"
        );
        // Empty collections are omitted
        assert!(json["A"].get("articles").is_none());
    }
}
