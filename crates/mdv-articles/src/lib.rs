//! Article model and category tree for the article viewer.
//!
//! This crate owns everything between raw markdown files and the
//! navigation sidebar:
//! - [`Frontmatter`]: tolerant parsing of the `---`-delimited header block
//! - [`Article`]: slug + front-matter + body records
//! - [`load_articles`]: filesystem discovery with deterministic ordering
//! - [`build_category_tree`]: folding `"A > B > C"` category paths into a
//!   nested [`CategoryTree`]
//!
//! # Example
//!
//! ```
//! use mdv_articles::{Article, build_category_tree};
//!
//! let articles = vec![
//!     Article::from_source("setup", "---\ntitle: Setup\ncategory: Guides > Setup\n---\n# Setup"),
//!     Article::from_source("faq", "---\ntitle: FAQ\ncategory: Guides\n---\n# FAQ"),
//! ];
//! let tree = build_category_tree(&articles);
//! assert!(tree.get("Guides").unwrap().contains_slug("setup"));
//! ```

mod article;
mod category;
mod frontmatter;
mod loader;

pub use article::{Article, ArticleRef, find_article};
pub use category::{
    CATEGORY_SEPARATOR, CategoryNode, CategoryTree, UNCATEGORIZED, build_category_tree,
};
pub use frontmatter::Frontmatter;
pub use loader::{LoadError, load_articles};
