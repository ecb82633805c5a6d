//! Local Mermaid syntax check.
//!
//! Kroki has no parse-only endpoint, so the parse phase recognizes the
//! diagram header locally and rejects sources that Kroki would refuse
//! before any network round trip.

use crate::error::EngineError;

/// Mermaid diagram type keywords accepted as the first meaningful line.
const DIAGRAM_KEYWORDS: &[&str] = &[
    "graph",
    "flowchart",
    "flowchart-elk",
    "sequenceDiagram",
    "classDiagram",
    "classDiagram-v2",
    "stateDiagram",
    "stateDiagram-v2",
    "erDiagram",
    "journey",
    "gantt",
    "pie",
    "quadrantChart",
    "requirementDiagram",
    "gitGraph",
    "C4Context",
    "C4Container",
    "C4Component",
    "C4Dynamic",
    "C4Deployment",
    "mindmap",
    "timeline",
    "sankey-beta",
    "xychart-beta",
    "block-beta",
    "packet-beta",
    "architecture-beta",
    "kanban",
    "radar-beta",
];

/// Flow directions accepted after `graph` / `flowchart`, including the
/// arrow shorthands (`>` left to right, `<` right to left, `^` bottom to
/// top, `v` top to bottom).
const FLOW_DIRECTIONS: &[&str] = &["TB", "TD", "BT", "RL", "LR", ">", "<", "^", "v"];

/// Find the diagram header keyword of a normalized source.
///
/// Skips `%%` comments and directives and a leading `---` front-matter block.
#[must_use]
pub fn detect_keyword(source: &str) -> Option<&'static str> {
    let header = header_line(source)?;
    let word = header.split_whitespace().next()?;
    let word = word.split(';').next().unwrap_or_default();
    DIAGRAM_KEYWORDS.iter().copied().find(|k| *k == word)
}

/// Parse-phase check used by [`KrokiEngine`](crate::KrokiEngine).
///
/// Returns `Ok(false)` for a source without any meaningful line.
pub fn check(source: &str) -> Result<bool, EngineError> {
    let Some(header) = header_line(source) else {
        return Ok(false);
    };

    let Some(keyword) = detect_keyword(source) else {
        return Err(EngineError::Syntax(format!(
            "No diagram type detected matching given configuration for text: {header}"
        )));
    };

    if matches!(keyword, "graph" | "flowchart")
        && let Some(direction) = header.split_whitespace().nth(1)
    {
        let direction = direction.split(';').next().unwrap_or_default();
        if !FLOW_DIRECTIONS.contains(&direction) {
            return Err(EngineError::Syntax(format!(
                "unknown flow direction '{direction}' (expected one of {})",
                FLOW_DIRECTIONS.join(", ")
            )));
        }
    }

    Ok(true)
}

/// First line that is not blank, a comment, or part of front matter.
fn header_line(source: &str) -> Option<&str> {
    let mut in_front_matter = false;
    let mut first = true;

    for line in source.lines().map(str::trim) {
        if first && line == "---" {
            in_front_matter = true;
            first = false;
            continue;
        }
        if in_front_matter {
            if line == "---" {
                in_front_matter = false;
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }
        first = false;
        if line.starts_with("%%") {
            continue;
        }
        return Some(line);
    }

    None
}
