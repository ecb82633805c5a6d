//! Source normalization applied before every render.
//!
//! Diagram sources are usually written inside indented page markup, so every
//! render strips the indentation shared by all non-blank lines, trims the
//! result and rewrites `<br>` variants to [`CANONICAL_BREAK`].

use std::sync::LazyLock;

use regex::Regex;

use crate::consts::CANONICAL_BREAK;

/// Matches `<br>`, `<BR/>`, `<br />`, `<Br  />` and similar.
static BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

/// Normalize a raw diagram source.
///
/// Never fails: lines shorter than the common indentation simply become empty.
///
/// # Example
///
/// ```
/// use guide_diagrams::normalize;
///
/// assert_eq!(normalize("\n  graph TD\n    A-->B\n"), "graph TD\n  A-->B");
/// ```
#[must_use]
pub fn normalize(chart: &str) -> String {
    let stripped = strip_common_indent(chart);
    canonicalize_breaks(stripped.trim())
}

/// Remove the leading whitespace shared by every non-blank line.
///
/// Indentation is counted in characters. Blank and whitespace-only lines do
/// not contribute to the minimum.
#[must_use]
pub fn strip_common_indent(chart: &str) -> String {
    let min_indent = chart
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .min()
        .unwrap_or(0);

    chart
        .split('\n')
        .map(|line| skip_chars(line, min_indent))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrite every line-break directive to its canonical form.
#[must_use]
pub fn canonicalize_breaks(source: &str) -> String {
    BREAK_RE.replace_all(source, CANONICAL_BREAK).into_owned()
}

/// Number of leading whitespace characters in a line.
fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Drop the first `n` characters of a line, or all of it if shorter.
fn skip_chars(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn min_indent(source: &str) -> Option<usize> {
        source
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(leading_whitespace)
            .min()
    }

    #[test]
    fn test_strips_common_indent_and_outer_blank_lines() {
        assert_eq!(normalize("\n  graph TD\n    A-->B\n"), "graph TD\n  A-->B");
    }

    #[test]
    fn test_indent_taken_from_shallowest_line() {
        let chart = "\n        graph LR\n            A[环境准备] --> B[获取 API Key]\n\n            style A fill:#e3f2fd\n        ";
        assert_eq!(
            normalize(chart),
            "graph LR\n    A[环境准备] --> B[获取 API Key]\n\n    style A fill:#e3f2fd"
        );
    }

    #[test]
    fn test_result_has_zero_minimum_indent() {
        let inputs = [
            "    sequenceDiagram\n      A->>B: hi\n    B-->>A: ok",
            "\t\tgraph TD\n\t\t\tA --> B",
            "      flowchart LR\n\n   \n        X --> Y",
            "graph TD\nA-->B",
        ];
        for input in inputs {
            assert_eq!(min_indent(&normalize(input)), Some(0), "input: {input:?}");
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "\n  graph TD\n    A-->B<br>C\n",
            "    pie\n      \"a\" : 1\n\n      \"b\" : 2",
            "graph TD\n  A<BR />B",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_blank_lines_shorter_than_indent() {
        // Whitespace-only line is shorter than the 8-space prefix.
        let chart = "        graph TD\n  \n\n        A --> B";
        assert_eq!(normalize(chart), "graph TD\n\n\nA --> B");
    }

    #[test]
    fn test_whitespace_only_input() {
        assert_eq!(normalize("   \n\t\n  "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_multibyte_characters_after_indent() {
        let chart = "  graph TD\n    甲 --> 乙";
        assert_eq!(normalize(chart), "graph TD\n  甲 --> 乙");
    }

    #[test]
    fn test_break_variants_canonicalized() {
        for variant in ["<br>", "<BR/>", "<br />", "<Br  />", "<bR\t/>"] {
            assert_eq!(canonicalize_breaks(variant), "<br/>", "variant: {variant}");
        }
    }

    #[test]
    fn test_break_canonicalization_is_stable() {
        let once = canonicalize_breaks("A[one<br>two<BR />three]");
        assert_eq!(once, "A[one<br/>two<br/>three]");
        assert_eq!(canonicalize_breaks(&once), once);
    }

    #[test]
    fn test_other_tags_untouched() {
        assert_eq!(canonicalize_breaks("<b>bold</b> <brx>"), "<b>bold</b> <brx>");
    }

    #[test]
    fn test_skip_chars_clamps() {
        assert_eq!(skip_chars("ab", 5), "");
        assert_eq!(skip_chars("", 3), "");
        assert_eq!(skip_chars("  x", 2), "x");
    }
}
