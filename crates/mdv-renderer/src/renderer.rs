//! Markdown renderer producing HTML with anchored headings and a TOC tree.

use std::fmt::Write;
use std::sync::LazyLock;

use pulldown_cmark::{
    CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use regex::Regex;

use crate::highlight::{Highlight, NoHighlight};
use crate::slug::{SlugCounter, slugify};
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, escape_html};
use crate::toc::{TocBuilder, TocEntry};

/// Result of rendering one markdown document.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// Rendered HTML with `id` attributes on every heading.
    pub html: String,
    /// Table of contents tree mirroring heading nesting.
    pub toc: Vec<TocEntry>,
}

/// Rendering options.
///
/// The defaults match the article-viewer profile: GFM extensions, smart
/// typography, newline-to-`<br>`, bare-URL autolinking, and a TOC covering
/// all heading levels.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Enable tables, strikethrough and task lists.
    pub gfm: bool,
    /// Typographic substitution (curly quotes, en/em dashes, ellipses).
    pub smart_punctuation: bool,
    /// Render single newlines as `<br>`.
    pub hard_breaks: bool,
    /// Turn bare `http(s)://` URLs in text into links.
    pub autolink: bool,
    /// Include level-1 headings in the TOC. Level-1 headings always get
    /// anchor ids; this only controls their presence in the tree.
    pub toc_include_h1: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            smart_punctuation: true,
            hard_breaks: true,
            autolink: true,
            toc_include_h1: true,
        }
    }
}

/// Markdown renderer.
///
/// Holds configuration and the highlight collaborator; all per-document
/// state (slug counters, ancestor stack, output buffer) lives in the render
/// pass, so one renderer can serve any number of [`render`](Self::render)
/// calls independently.
pub struct Renderer {
    options: RenderOptions,
    highlighter: Box<dyn Highlight>,
}

impl Renderer {
    /// Create a renderer with default options and no highlighting.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
            highlighter: Box::new(NoHighlight),
        }
    }

    /// Replace the full option set.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Enable or disable GFM extensions.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.options.gfm = enabled;
        self
    }

    /// Enable or disable typographic substitution.
    #[must_use]
    pub fn with_smart_punctuation(mut self, enabled: bool) -> Self {
        self.options.smart_punctuation = enabled;
        self
    }

    /// Enable or disable newline-to-`<br>` conversion.
    #[must_use]
    pub fn with_hard_breaks(mut self, enabled: bool) -> Self {
        self.options.hard_breaks = enabled;
        self
    }

    /// Enable or disable bare-URL autolinking.
    #[must_use]
    pub fn with_autolink(mut self, enabled: bool) -> Self {
        self.options.autolink = enabled;
        self
    }

    /// Include or exclude level-1 headings from the TOC.
    #[must_use]
    pub fn with_toc_include_h1(mut self, enabled: bool) -> Self {
        self.options.toc_include_h1 = enabled;
        self
    }

    /// Set the syntax highlighting collaborator.
    #[must_use]
    pub fn with_highlighter<H: Highlight + 'static>(mut self, highlighter: H) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    /// Parser options derived from the configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.options.gfm {
            options |= Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS;
        }
        if self.options.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }
        options
    }

    /// Render markdown to HTML and extract the TOC tree.
    ///
    /// Deterministic: the same input always yields byte-identical HTML and a
    /// structurally equal TOC. Empty or whitespace-only input yields empty
    /// output.
    #[must_use]
    pub fn render(&self, markdown: &str) -> Rendered {
        let mut pass = RenderPass::new(self);
        for event in Parser::new_ext(markdown, self.parser_options()) {
            pass.process_event(event);
        }
        pass.finish()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// State of one render call. Discarded when the call returns.
struct RenderPass<'a> {
    renderer: &'a Renderer,
    output: String,
    heading: HeadingState,
    code: CodeBlockState,
    image: ImageState,
    table: TableState,
    pending_image: Option<(String, String)>,
    slugs: SlugCounter,
    toc: TocBuilder,
}

impl<'a> RenderPass<'a> {
    fn new(renderer: &'a Renderer) -> Self {
        Self {
            renderer,
            output: String::with_capacity(4096),
            heading: HeadingState::default(),
            code: CodeBlockState::default(),
            image: ImageState::default(),
            table: TableState::default(),
            pending_image: None,
            slugs: SlugCounter::default(),
            toc: TocBuilder::default(),
        }
    }

    fn finish(self) -> Rendered {
        Rendered {
            html: self.output,
            toc: self.toc.finish(),
        }
    }

    /// Push content to output or heading buffer based on context.
    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(&tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) => self.output.push_str(&html),
            Event::InlineHtml(html) => self.inline_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: &Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the id is known
                self.heading.start(heading_level_to_num(*level));
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => info
                        .split_whitespace()
                        .next()
                        .map(std::borrow::ToOwned::to_owned),
                    _ => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::Table(alignments) => {
                self.table.start(alignments.clone());
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let cell = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{cell}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Link { dest_url, .. } => {
                let link = format!(r#"<a href="{}">"#, escape_html(dest_url));
                self.push_inline(&link);
            }
            Tag::Image { dest_url, title, .. } => {
                // Alt text arrives as events; the tag is written at TagEnd::Image
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => self.complete_heading(),
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => self.complete_code_block(),
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    self.write_image(&src, &alt, &title);
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn complete_heading(&mut self) {
        if let Some((level, text, html)) = self.heading.complete() {
            let title = text.trim().to_owned();
            let id = self.slugs.assign(&slugify(&title));
            write!(
                self.output,
                r#"<h{level} id="{id}">{}</h{level}>"#,
                html.trim()
            )
            .unwrap();
            if level > 1 || self.renderer.options.toc_include_h1 {
                self.toc.push(TocEntry::new(id, title, level));
            }
        }
    }

    fn complete_code_block(&mut self) {
        let (lang, content) = self.code.end();
        let markup = self
            .renderer
            .highlighter
            .highlight(&content, lang.as_deref())
            .unwrap_or_else(|| escape_html(&content));
        if let Some(lang) = lang {
            write!(
                self.output,
                r#"<pre><code class="language-{}">{markup}</code></pre>"#,
                escape_html(&lang)
            )
            .unwrap();
        } else {
            write!(self.output, "<pre><code>{markup}</code></pre>").unwrap();
        }
    }

    fn write_image(&mut self, src: &str, alt: &str, title: &str) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        let tag = format!(
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        );
        // May sit inside an open heading; the tag then belongs in the <hN>
        self.push_inline(&tag);
    }

    fn inline_html(&mut self, html: &str) {
        // Alt text stays plain; tags inside an image are dropped
        if !self.image.is_active() {
            self.push_inline(html);
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else if self.renderer.options.autolink {
            let linked = linkify(text);
            self.output.push_str(&linked);
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
        } else if self.heading.is_active() {
            self.heading.push_text(code);
            write!(
                self.heading.html_buffer(),
                "<code>{}</code>",
                escape_html(code)
            )
            .unwrap();
        } else {
            write!(self.output, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_newline();
        } else if self.heading.is_active() {
            self.heading.push_text(" ");
            self.heading.push_html(" ");
        } else if self.image.is_active() {
            self.image.push_str(" ");
        } else if self.renderer.options.hard_breaks {
            self.output.push_str("<br>");
        } else {
            self.output.push('\n');
        }
    }

    fn task_list_marker(&mut self, checked: bool) {
        self.output.push_str(if checked {
            r#"<input type="checkbox" checked disabled>"#
        } else {
            r#"<input type="checkbox" disabled>"#
        });
    }
}

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"]+"#).expect("static pattern"));

/// Strip trailing sentence punctuation that belongs to the prose, not the
/// URL. A closing `)` is kept while the URL has a matching `(`, so
/// Wikipedia-style `…_(disambiguation)` links survive intact.
fn trim_url(mut url: &str) -> &str {
    loop {
        match url.chars().last() {
            Some('.' | ',' | ';' | ':' | '!' | '?') => url = &url[..url.len() - 1],
            Some(')') if url.matches(')').count() > url.matches('(').count() => {
                url = &url[..url.len() - 1];
            }
            _ => break,
        }
    }
    url
}

/// Escape `text`, converting bare URLs into anchors.
fn linkify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in URL_RE.find_iter(text) {
        let url = trim_url(found.as_str());
        if url.is_empty() {
            continue;
        }
        out.push_str(&escape_html(&text[last..found.start()]));
        let escaped = escape_html(url);
        write!(out, r#"<a href="{escaped}">{escaped}</a>"#).unwrap();
        last = found.start() + url.len();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
