//! Syntax highlighting collaborator.
//!
//! The renderer never highlights code itself; it hands `(code, language
//! hint)` to a [`Highlight`] implementation and falls back to escaped plain
//! code when the collaborator returns `None`. Highlighting problems are
//! therefore always local to one code block.

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Maps `(code, language hint)` to highlighted HTML markup.
///
/// Returning `None` means "could not highlight"; the renderer emits the
/// escaped source instead. Implementations must not error out of a render.
pub trait Highlight: Send + Sync {
    /// Highlight `code`, returning HTML markup or `None` to fall back.
    fn highlight(&self, code: &str, lang: Option<&str>) -> Option<String>;
}

/// No-op highlighter; every block falls back to escaped plain code.
pub struct NoHighlight;

impl Highlight for NoHighlight {
    fn highlight(&self, _code: &str, _lang: Option<&str>) -> Option<String> {
        None
    }
}

/// Syntect-backed highlighter producing class-annotated spans.
///
/// Uses `class="…"` spans rather than inline colors so the page stylesheet
/// keeps control of the theme. Unknown or missing languages go through
/// first-line auto-detection before giving up.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
}

impl SyntectHighlighter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlight for SyntectHighlighter {
    fn highlight(&self, code: &str, lang: Option<&str>) -> Option<String> {
        let syntax = lang
            .and_then(|token| self.syntaxes.find_syntax_by_token(token))
            .or_else(|| self.syntaxes.find_syntax_by_first_line(code))?;

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntaxes,
            ClassStyle::Spaced,
        );
        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::warn!(lang = ?lang, error = %e, "highlighting failed, using plain code");
                return None;
            }
        }
        Some(generator.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_highlight_always_falls_back() {
        assert!(NoHighlight.highlight("fn main() {}", Some("rust")).is_none());
    }

    #[test]
    fn test_known_language() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter
            .highlight("fn main() {}\n", Some("rust"))
            .unwrap();
        assert!(html.contains("<span"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_language_by_extension_token() {
        let highlighter = SyntectHighlighter::new();
        assert!(highlighter.highlight("let x = 1;\n", Some("rs")).is_some());
    }

    #[test]
    fn test_unknown_language_auto_detects() {
        let highlighter = SyntectHighlighter::new();
        // Shebang line drives first-line detection despite the bogus hint
        let html = highlighter.highlight("#!/bin/bash\necho hi\n", Some("klingon"));
        assert!(html.is_some());
    }

    #[test]
    fn test_undetectable_falls_back() {
        let highlighter = SyntectHighlighter::new();
        assert!(
            highlighter
                .highlight("just some prose\n", Some("klingon"))
                .is_none()
        );
    }

    #[test]
    fn test_output_is_escaped() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter
            .highlight("let s = \"<tag>\";\n", Some("rust"))
            .unwrap();
        assert!(!html.contains("<tag>"));
        assert!(html.contains("&lt;tag&gt;"));
    }
}
