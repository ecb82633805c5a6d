//! Error fallback markup.

use crate::consts::{ERROR_CLASS, FAILURE_HEADING, PREVIEW_CHARS, SOURCE_HEADING};

/// Inline style of the fallback block.
const FALLBACK_STYLE: &str = "white-space: pre-wrap; font-size: 12px; color: #dc2626; \
                              background: #fef2f2; padding: 12px; border-radius: 8px;";

/// Build the visible error block shown in place of a failed diagram.
///
/// The preview holds the first 500 characters of `source` followed by `...`,
/// even when the source is shorter.
#[must_use]
pub fn fallback_html(message: &str, source: &str) -> String {
    let preview: String = source.chars().take(PREVIEW_CHARS).collect();
    let text = format!("{FAILURE_HEADING}:\n{message}\n\n{SOURCE_HEADING}:\n{preview}...");
    format!(
        r#"<pre class="{ERROR_CLASS}" style="{FALLBACK_STYLE}">{}</pre>"#,
        escape_html(&text)
    )
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
