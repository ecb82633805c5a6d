//! Page shell: sidebar, main content, footer.

use std::fmt::Write;

use guide_diagrams::escape_html;

use crate::components;
use crate::front_matter::PageMeta;
use crate::navigation::{footer_links, nav_groups};

/// Stylesheet served by the asset route.
pub const STYLESHEET_PATH: &str = "/assets/style.css";

/// Copy-button script served by the asset route.
pub const SCRIPT_PATH: &str = "/assets/copy.js";

/// Title of the not-found view.
pub const NOT_FOUND_TITLE: &str = "页面未找到";

/// Text of the loading view.
pub const LOADING_TEXT: &str = "加载中...";

/// Seconds before the loading view reloads itself.
const LOADING_REFRESH_SECS: u32 = 1;

const FOOTER_TAGLINE: &str = "LangChain4j 学习指南 - 帮助新人快速掌握 Java AI 开发";

const LOGO_SVG: &str = r#"<svg class="sidebar-logo-svg" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M13 10V3L4 14h7v7l9-11h-7z"/></svg>"#;

/// Site branding shown in the sidebar and document titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOptions {
    pub title: String,
    pub subtitle: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            title: "LangChain4j".to_owned(),
            subtitle: "入门指南".to_owned(),
        }
    }
}

/// Everything needed to wrap main content in the shell.
pub(crate) struct Shell<'a> {
    pub site: &'a SiteOptions,
    /// Path of the current page, marked active in the sidebar.
    pub active_path: Option<&'a str>,
    pub title: &'a str,
    pub main: &'a str,
    pub refresh: bool,
}

impl Shell<'_> {
    pub(crate) fn render(&self) -> String {
        let mut out = String::with_capacity(self.main.len() + 8 * 1024);
        out.push_str(r#"<!DOCTYPE html><html lang="zh-CN"><head><meta charset="utf-8">"#);
        out.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#);
        write!(
            out,
            "<title>{} - {}</title>",
            escape_html(self.title),
            escape_html(&self.site.title)
        )
        .unwrap();
        if self.refresh {
            write!(
                out,
                r#"<meta http-equiv="refresh" content="{LOADING_REFRESH_SECS}">"#
            )
            .unwrap();
        }
        write!(out, r#"<link rel="stylesheet" href="{STYLESHEET_PATH}">"#).unwrap();
        out.push_str(r#"</head><body><div class="page-container">"#);
        sidebar(self.site, self.active_path, &mut out);
        out.push_str(r#"<div class="content-area"><main class="main-content"><div class="content-wrapper">"#);
        out.push_str(self.main);
        out.push_str("</div></main>");
        footer(&mut out);
        write!(
            out,
            r#"</div></div><script src="{SCRIPT_PATH}" defer></script></body></html>"#
        )
        .unwrap();
        out
    }
}

fn sidebar(site: &SiteOptions, active_path: Option<&str>, out: &mut String) {
    write!(
        out,
        r#"<aside class="sidebar"><div class="sidebar-content"><div class="sidebar-logo"><div class="sidebar-logo-icon">{LOGO_SVG}</div><div><h1 class="sidebar-logo-title">{}</h1><p class="sidebar-logo-subtitle">{}</p></div></div><div class="space-y-6">"#,
        escape_html(&site.title),
        escape_html(&site.subtitle)
    )
    .unwrap();

    for group in nav_groups() {
        write!(
            out,
            r#"<div class="sidebar-nav-group"><h3 class="sidebar-nav-title">{}</h3><ul class="sidebar-nav-list">"#,
            escape_html(group.title)
        )
        .unwrap();
        for item in group.items {
            let class = if active_path == Some(item.path) {
                "sidebar-nav-link active"
            } else {
                "sidebar-nav-link"
            };
            write!(
                out,
                r#"<li><a href="{}" class="{class}">{}</a></li>"#,
                item.path,
                escape_html(item.label)
            )
            .unwrap();
        }
        out.push_str("</ul></div>");
    }

    out.push_str("</div></div></aside>");
}

fn footer(out: &mut String) {
    let links = footer_links();
    out.push_str(r#"<footer class="footer"><div class="footer-content">"#);

    out.push_str(r#"<div class="footer-section"><h4>学习资源</h4>"#);
    for link in links.learning {
        write!(out, r#"<a href="{}">{}</a>"#, link.path, escape_html(link.label)).unwrap();
    }
    out.push_str("</div>");

    for (heading, column) in [("官方资源", links.official), ("社区", links.community)] {
        write!(out, r#"<div class="footer-section"><h4>{heading}</h4>"#).unwrap();
        for link in column {
            write!(
                out,
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                escape_html(link.href),
                escape_html(link.label)
            )
            .unwrap();
        }
        out.push_str("</div>");
    }

    write!(
        out,
        r#"</div><div class="footer-bottom"><p>{FOOTER_TAGLINE}</p></div></footer>"#
    )
    .unwrap();
}

/// Main content of a loaded page.
pub(crate) fn page_main(meta: &PageMeta, body_html: &str) -> String {
    let mut out = String::with_capacity(body_html.len() + 1024);
    components::tags(&meta.tags, &mut out);
    write!(
        out,
        r#"<h1 class="page-title">{}</h1>"#,
        escape_html(&meta.title)
    )
    .unwrap();
    if !meta.description.is_empty() {
        write!(
            out,
            r#"<p class="page-description">{}</p>"#,
            escape_html(&meta.description)
        )
        .unwrap();
    }
    components::learning_path_cards(&meta.cards, &mut out);
    out.push_str(body_html);
    if let Some(next) = &meta.next {
        components::next_link(next, &mut out);
    }
    out
}

/// Main content of the not-found view.
pub(crate) fn not_found_main() -> String {
    format!(
        r#"<div class="text-center py-20"><h1 class="text-4xl font-bold text-gray-900 mb-4">{NOT_FOUND_TITLE}</h1><p class="text-gray-600 mb-8">该页面不存在，请检查 URL 是否正确。</p><a href="/" class="btn btn-primary">返回首页</a></div>"#
    )
}

/// Main content of the loading view.
pub(crate) fn loading_main() -> String {
    format!(
        r#"<div class="flex items-center justify-center min-h-[60vh]"><div class="text-center"><div class="animate-spin rounded-full h-12 w-12 border-b-2 border-indigo-600 mx-auto mb-4"></div><p class="text-gray-600">{LOADING_TEXT}</p></div></div>"#
    )
}
