//! Markdown to HTML conversion for page bodies.
//!
//! Wraps the pulldown-cmark HTML writer and rewrites a few constructs into
//! site components:
//! - `##` headings open a numbered content section
//! - GFM alerts (`> [!TIP]`) become tip boxes
//! - fenced code blocks get a header (`title="File.java"` or the language)
//!   and a copy button
//! - `mermaid` fences become `<!--diagram:N-->` placeholders when diagrams
//!   are enabled, filled in by [`replace_diagram_placeholders`]
//!
//! Placeholders are written as raw HTML events. Text and code are escaped by
//! the HTML writer, so page prose can never produce one; raw HTML comments in
//! the source that look like a placeholder are defused.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use regex::{Captures, Regex};

use crate::components;

/// Fence language routed to the diagram renderer.
pub(crate) const MERMAID_LANGUAGE: &str = "mermaid";

/// `title="..."` attribute in a fence info string.
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"title="([^"]*)""#).unwrap());

const PLACEHOLDER_PREFIX: &str = "<!--diagram:";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--diagram:(\d+)-->").unwrap());

/// Output of [`render_markdown`].
#[derive(Debug, Default)]
pub(crate) struct RenderedMarkdown {
    /// HTML with diagram placeholders.
    pub html: String,
    /// Diagram sources in placeholder order.
    pub diagrams: Vec<String>,
}

/// Language and title parsed from a fence info string.
#[derive(Debug, Default, PartialEq, Eq)]
struct FenceInfo {
    language: Option<String>,
    title: Option<String>,
}

impl FenceInfo {
    fn from_kind(kind: &CodeBlockKind<'_>) -> Self {
        let CodeBlockKind::Fenced(info) = kind else {
            return Self::default();
        };
        let language = info
            .split_whitespace()
            .next()
            .filter(|word| !word.contains('='))
            .map(str::to_owned);
        let title = TITLE_RE.captures(info).map(|c| c[1].to_owned());
        Self { language, title }
    }
}

enum Capture<'a> {
    None,
    Heading(Vec<Event<'a>>),
    Code(FenceInfo, String),
}

struct BodyWriter<'a> {
    events: Vec<Event<'a>>,
    section: usize,
    in_section: bool,
    diagrams_enabled: bool,
    diagrams: Vec<String>,
}

impl<'a> BodyWriter<'a> {
    fn push_html(&mut self, html: String) {
        self.events.push(Event::Html(html.into()));
    }

    fn section(&mut self, title_events: Vec<Event<'a>>) {
        let mut title = String::new();
        html::push_html(&mut title, title_events.into_iter());

        self.section += 1;
        let mut out = String::new();
        if self.in_section {
            out.push_str("</section>");
        }
        out.push_str(r#"<section class="content-section">"#);
        components::section_header(self.section, &title, &mut out);
        self.in_section = true;
        self.push_html(out);
    }

    fn code(&mut self, info: FenceInfo, text: String) {
        if self.diagrams_enabled && info.language.as_deref() == Some(MERMAID_LANGUAGE) {
            let index = self.diagrams.len();
            self.diagrams.push(text);
            self.push_html(format!("{}\n", diagram_placeholder(index)));
            return;
        }

        let mut out = String::new();
        components::code_block(
            info.language.as_deref(),
            info.title.as_deref(),
            text.trim_end_matches('\n'),
            &mut out,
        );
        self.push_html(out);
    }

    fn finish(mut self) -> RenderedMarkdown {
        if self.in_section {
            self.push_html("</section>".to_owned());
        }
        let mut html = String::new();
        html::push_html(&mut html, self.events.into_iter());
        RenderedMarkdown {
            html,
            diagrams: self.diagrams,
        }
    }
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Convert a page body to HTML.
pub(crate) fn render_markdown(markdown: &str, diagrams_enabled: bool) -> RenderedMarkdown {
    let mut writer = BodyWriter {
        events: Vec::new(),
        section: 0,
        in_section: false,
        diagrams_enabled,
        diagrams: Vec::new(),
    };
    let mut capture = Capture::None;

    for event in Parser::new_ext(markdown, options()) {
        capture = match (capture, event) {
            (Capture::Heading(title), Event::End(TagEnd::Heading(HeadingLevel::H2))) => {
                writer.section(title);
                Capture::None
            }
            (Capture::Heading(mut title), event) => {
                title.push(event);
                Capture::Heading(title)
            }
            (Capture::Code(info, text), Event::End(TagEnd::CodeBlock)) => {
                writer.code(info, text);
                Capture::None
            }
            (Capture::Code(info, mut text), Event::Text(chunk)) => {
                text.push_str(&chunk);
                Capture::Code(info, text)
            }
            (code @ Capture::Code(..), _) => code,
            (
                Capture::None,
                Event::Start(Tag::Heading {
                    level: HeadingLevel::H2,
                    ..
                }),
            ) => Capture::Heading(Vec::new()),
            (Capture::None, Event::Start(Tag::CodeBlock(kind))) => {
                Capture::Code(FenceInfo::from_kind(&kind), String::new())
            }
            (Capture::None, Event::Start(Tag::BlockQuote(Some(kind)))) => {
                let mut out = String::new();
                components::tip_box_start(kind, &mut out);
                writer.push_html(out);
                Capture::None
            }
            (Capture::None, Event::End(TagEnd::BlockQuote(Some(_)))) => {
                let mut out = String::new();
                components::tip_box_end(&mut out);
                writer.push_html(out);
                Capture::None
            }
            (Capture::None, Event::Html(raw)) if raw.contains(PLACEHOLDER_PREFIX) => {
                writer.push_html(defuse_placeholders(&raw));
                Capture::None
            }
            (Capture::None, Event::InlineHtml(raw)) if raw.contains(PLACEHOLDER_PREFIX) => {
                writer
                    .events
                    .push(Event::InlineHtml(defuse_placeholders(&raw).into()));
                Capture::None
            }
            (Capture::None, event) => {
                writer.events.push(event);
                Capture::None
            }
        };
    }

    writer.finish()
}

/// Placeholder left in the HTML for diagram `index`.
pub(crate) fn diagram_placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{index}-->")
}

/// Keep an author-written comment from being taken for a placeholder.
fn defuse_placeholders(raw: &str) -> String {
    raw.replace(PLACEHOLDER_PREFIX, "<!-- diagram:")
}

/// Replace each diagram placeholder with its rendered markup.
///
/// Runs in a single pass over `html`, so markup that itself contains a
/// placeholder-like string is never rescanned. Placeholders without a
/// matching entry are left as they are.
pub(crate) fn replace_diagram_placeholders(html: &str, rendered: &[String]) -> String {
    PLACEHOLDER_RE
        .replace_all(html, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| rendered.get(index))
                .map_or_else(|| caps[0].to_owned(), Clone::clone)
        })
        .into_owned()
}
