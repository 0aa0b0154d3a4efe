//! Markdown rendering for the article viewer.
//!
//! [`Renderer`] converts a markdown string into HTML, assigns a unique
//! anchor id to every heading, and builds a hierarchical table of contents
//! that mirrors heading nesting by level.
//!
//! Syntax highlighting is delegated to a [`Highlight`] collaborator; the
//! built-in [`SyntectHighlighter`] falls back to first-line language
//! detection and, failing that, to plain escaped code. No highlighting
//! problem ever aborts a render.
//!
//! # Example
//!
//! ```
//! use mdv_renderer::Renderer;
//!
//! let renderer = Renderer::new();
//! let result = renderer.render("# Hello\n\n## Section");
//! assert!(result.html.contains(r#"<h2 id="section">"#));
//! assert_eq!(result.toc[0].children[0].id, "section");
//! ```

mod highlight;
mod renderer;
mod slug;
mod state;
mod toc;

pub use highlight::{Highlight, NoHighlight, SyntectHighlighter};
pub use renderer::{RenderOptions, Rendered, Renderer};
pub use slug::slugify;
pub use state::escape_html;
pub use toc::TocEntry;
