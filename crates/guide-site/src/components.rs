//! Presentational HTML fragments shared by pages.

use std::fmt::Write;

use guide_diagrams::escape_html;
use pulldown_cmark::BlockQuoteKind;

use crate::front_matter::{NextLink, PageTag, PathCard};

/// Language shown in a code header when the fence has no title or language.
const DEFAULT_CODE_LANGUAGE: &str = "java";

pub(crate) fn tags(tags: &[PageTag], out: &mut String) {
    if tags.is_empty() {
        return;
    }
    out.push_str(r#"<div class="page-tags">"#);
    for tag in tags {
        write!(
            out,
            r#"<span class="page-tag {}">{}</span>"#,
            tag.variant.as_str(),
            escape_html(&tag.text)
        )
        .unwrap();
    }
    out.push_str("</div>");
}

pub(crate) fn section_header(number: usize, title_html: &str, out: &mut String) {
    write!(
        out,
        r#"<div class="section-header"><span class="circular-number">{number}</span><h2>{title_html}</h2></div>"#
    )
    .unwrap();
}

/// Code block with a filename (or language) header and a copy button.
///
/// The copy script reads the text of the sibling `<code>` element.
pub(crate) fn code_block(language: Option<&str>, title: Option<&str>, content: &str, out: &mut String) {
    let language = language.unwrap_or(DEFAULT_CODE_LANGUAGE);
    out.push_str(r#"<div class="code-block-wrapper"><div class="code-header">"#);
    match title {
        Some(title) => write!(
            out,
            r#"<span class="code-filename">{}</span>"#,
            escape_html(title)
        ),
        None => write!(
            out,
            r#"<span class="code-language">{}</span>"#,
            escape_html(&language.to_uppercase())
        ),
    }
    .unwrap();
    write!(
        out,
        r#"<button type="button" class="copy-button" aria-label="复制代码">📋 复制</button></div><pre class="code-content"><code class="language-{}">{}</code></pre></div>"#,
        escape_html(language),
        escape_html(content)
    )
    .unwrap();
}

/// Opening markup of a tip box for a GFM alert kind.
pub(crate) fn tip_box_start(kind: BlockQuoteKind, out: &mut String) {
    let (variant, title) = match kind {
        BlockQuoteKind::Note => ("blue", "说明"),
        BlockQuoteKind::Tip => ("tip", "提示"),
        BlockQuoteKind::Important => ("indigo", "重要"),
        BlockQuoteKind::Warning => ("warning", "注意"),
        BlockQuoteKind::Caution => ("yellow", "警告"),
    };
    write!(
        out,
        r#"<div class="tip-box tip-box-{variant}"><h4 class="tip-box-title">{title}</h4>"#
    )
    .unwrap();
}

pub(crate) fn tip_box_end(out: &mut String) {
    out.push_str("</div>");
}

pub(crate) fn learning_path_cards(cards: &[PathCard], out: &mut String) {
    if cards.is_empty() {
        return;
    }
    out.push_str(r#"<div class="cards-grid">"#);
    for card in cards {
        let mut inner = String::new();
        write!(
            inner,
            r#"<div class="learning-path-card-icon">{}</div><div class="learning-path-card-title">{}</div><div class="learning-path-card-description">{}</div>"#,
            escape_html(&card.icon),
            escape_html(&card.title),
            escape_html(&card.description)
        )
        .unwrap();
        if let Some(meta) = &card.meta {
            write!(
                inner,
                r#"<div class="learning-path-card-meta">{}</div>"#,
                escape_html(meta)
            )
            .unwrap();
        }
        match &card.href {
            Some(href) => write!(
                out,
                r#"<a href="{}" class="learning-path-card">{inner}</a>"#,
                escape_html(href)
            ),
            None => write!(out, r#"<div class="learning-path-card">{inner}</div>"#),
        }
        .unwrap();
    }
    out.push_str("</div>");
}

pub(crate) fn next_link(next: &NextLink, out: &mut String) {
    write!(
        out,
        r#"<section class="content-section"><div class="text-center"><a href="{}" class="btn btn-primary btn-lg">{} →</a></div></section>"#,
        escape_html(&next.href),
        escape_html(&next.text)
    )
    .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::front_matter::TagVariant;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tags() {
        let mut out = String::new();
        tags(
            &[PageTag {
                text: "<RAG>".to_owned(),
                variant: TagVariant::Purple,
            }],
            &mut out,
        );
        assert_eq!(
            out,
            r#"<div class="page-tags"><span class="page-tag purple">&lt;RAG&gt;</span></div>"#
        );
    }

    #[test]
    fn test_no_tags_renders_nothing() {
        let mut out = String::new();
        tags(&[], &mut out);
        assert_eq!(out, "");
    }

    #[test]
    fn test_code_block_with_title() {
        let mut out = String::new();
        code_block(Some("java"), Some("App.java"), "a < b", &mut out);
        assert!(out.contains(r#"<span class="code-filename">App.java</span>"#));
        assert!(out.contains(r#"<code class="language-java">a &lt; b</code>"#));
        assert!(out.contains("copy-button"));
    }

    #[test]
    fn test_code_block_without_title_shows_language() {
        let mut out = String::new();
        code_block(Some("bash"), None, "mvn package", &mut out);
        assert!(out.contains(r#"<span class="code-language">BASH</span>"#));

        let mut out = String::new();
        code_block(None, None, "x", &mut out);
        assert!(out.contains(r#"<span class="code-language">JAVA</span>"#));
    }

    #[test]
    fn test_card_without_href_is_div() {
        let mut out = String::new();
        learning_path_cards(
            &[PathCard {
                icon: "🚀".to_owned(),
                title: "快速入门".to_owned(),
                description: "上手".to_owned(),
                meta: Some("15 分钟".to_owned()),
                href: None,
            }],
            &mut out,
        );
        assert!(out.starts_with(r#"<div class="cards-grid"><div class="learning-path-card">"#));
        assert!(out.contains(r#"<div class="learning-path-card-meta">15 分钟</div>"#));
    }

    #[test]
    fn test_next_link() {
        let mut out = String::new();
        next_link(
            &NextLink {
                href: "/rag-setup".to_owned(),
                text: "下一步".to_owned(),
            },
            &mut out,
        );
        assert!(out.contains(r#"<a href="/rag-setup" class="btn btn-primary btn-lg">下一步 →</a>"#));
    }
}
