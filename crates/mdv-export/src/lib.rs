//! Export payload assembly.
//!
//! Builds the strings handed to download and document-conversion
//! collaborators: a standalone HTML page, round-trippable markdown source,
//! and a word-processor-friendly HTML variant. Binary DOCX/PDF generation
//! happens outside this crate.

use std::fmt::Write;
use std::sync::LazyLock;

use mdv_articles::Article;
use mdv_renderer::escape_html;
use regex::Regex;

/// Wrap rendered article HTML in a standalone document.
///
/// The result is complete enough for an `.html` download and serves as the
/// input to external DOCX/PDF converters.
#[must_use]
pub fn html_document(title: &str, body_html: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n</head>\n<body>\n{body_html}\n</body>\n</html>\n",
        escape_html(title)
    )
}

/// Reassemble an article's markdown source for download.
///
/// Emits the `---` front-matter block (fields in source order) followed by
/// the body. Articles without front-matter yield just the body. The result
/// parses back to an equal article.
#[must_use]
pub fn markdown_source(article: &Article) -> String {
    if article.frontmatter.is_empty() {
        return article.content.clone();
    }

    let mut out = String::from("---\n");
    for (key, value) in article.frontmatter.iter() {
        let _ = writeln!(out, "{key}: {value}");
    }
    out.push_str("---\n\n");
    out.push_str(&article.content);
    out
}

static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<pre[^>]*><code[^>]*>(.*?)</code></pre>").expect("static pattern")
});

/// Rewrite `<pre><code>` blocks as single-column tables.
///
/// Word processors drop `<pre>` formatting when importing HTML; a table
/// row per line survives the conversion. Code content is left as-is (it is
/// already escaped by the renderer).
#[must_use]
pub fn code_blocks_to_tables(html: &str) -> String {
    CODE_BLOCK_RE
        .replace_all(html, |caps: &regex::Captures<'_>| {
            let mut table =
                String::from(r#"<table style="width:100%; border-collapse:collapse;">"#);
            for line in caps[1].trim_end_matches('\n').split('\n') {
                let _ = write!(table, "<tr><td>{line}</td></tr>");
            }
            table.push_str("</table>");
            table
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_html_document_wraps_body() {
        let doc = html_document("My Article", "<p>Hello</p>");

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>My Article</title>"));
        assert!(doc.contains("<p>Hello</p>"));
        assert!(doc.ends_with("</html>\n"));
    }

    #[test]
    fn test_html_document_escapes_title() {
        let doc = html_document("A < B", "<p>x</p>");
        assert!(doc.contains("<title>A &lt; B</title>"));
    }

    #[test]
    fn test_markdown_source_roundtrip() {
        let original = Article::from_source(
            "guide",
            "---\ntitle: Guide\ncategory: Docs > Intro\n---\n\n# Guide\n\nBody.",
        );

        let source = markdown_source(&original);
        let reparsed = Article::from_source("guide", &source);

        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_markdown_source_without_frontmatter() {
        let article = Article::from_source("plain", "# Just body");
        assert_eq!(markdown_source(&article), "# Just body");
    }

    #[test]
    fn test_code_blocks_to_tables() {
        let html = "<p>before</p><pre><code class=\"language-rust\">fn main() {\n    body();\n}\n</code></pre><p>after</p>";
        let converted = code_blocks_to_tables(html);

        assert!(!converted.contains("<pre>"));
        assert!(converted.contains("<table"));
        assert!(converted.contains("<tr><td>fn main() {</td></tr>"));
        assert!(converted.contains("<tr><td>}</td></tr>"));
        assert!(converted.contains("<p>before</p>"));
        assert!(converted.contains("<p>after</p>"));
    }

    #[test]
    fn test_code_blocks_to_tables_multiple_blocks() {
        let html = "<pre><code>a</code></pre><p>mid</p><pre><code>b</code></pre>";
        let converted = code_blocks_to_tables(html);

        assert_eq!(converted.matches("<table").count(), 2);
        assert!(converted.contains("<p>mid</p>"));
    }

    #[test]
    fn test_code_blocks_to_tables_no_blocks() {
        let html = "<p>no code here</p>";
        assert_eq!(code_blocks_to_tables(html), html);
    }
}
