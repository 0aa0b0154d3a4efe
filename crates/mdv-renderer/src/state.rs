//! Per-render buffers for multi-event markdown constructs.
//!
//! Headings, fenced code blocks, images and tables each span several parser
//! events. These small state holders collect the pieces until the closing
//! event arrives and the renderer can emit the finished element.

use pulldown_cmark::Alignment;

/// Escape text for safe inclusion in HTML.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Collects heading text while a heading is open.
///
/// Two buffers run in parallel: `text` holds the plain title used for
/// slugging and the TOC entry, `html` holds the rendered inline markup
/// that goes inside the emitted `<hN>` tag.
#[derive(Default)]
pub(crate) struct HeadingState {
    active: bool,
    level: u8,
    text: String,
    html: String,
}

impl HeadingState {
    pub(crate) fn start(&mut self, level: u8) {
        self.active = true;
        self.level = level;
        self.text.clear();
        self.html.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub(crate) fn html_buffer(&mut self) -> &mut String {
        &mut self.html
    }

    /// Close the heading, returning `(level, plain text, inline html)`.
    pub(crate) fn complete(&mut self) -> Option<(u8, String, String)> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some((
            self.level,
            std::mem::take(&mut self.text),
            std::mem::take(&mut self.html),
        ))
    }
}

/// Collects the content of an open fenced or indented code block.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    lang: Option<String>,
    content: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, lang: Option<String>) {
        self.active = true;
        self.lang = lang;
        self.content.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub(crate) fn push_newline(&mut self) {
        self.content.push('\n');
    }

    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.lang.take(), std::mem::take(&mut self.content))
    }
}

/// Collects the alt text of an open image tag.
#[derive(Default)]
pub(crate) struct ImageState {
    active: bool,
    alt: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        self.active = true;
        self.alt.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt.push_str(text);
    }

    pub(crate) fn end(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.alt)
    }
}

/// Tracks column alignments and head/body position inside a table.
#[derive(Default)]
pub(crate) struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Inline style attribute for the current cell, empty when unaligned.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell) {
            Some(Alignment::Left) => r#" style="text-align: left""#,
            Some(Alignment::Center) => r#" style="text-align: center""#,
            Some(Alignment::Right) => r#" style="text-align: right""#,
            _ => "",
        }
    }
}
