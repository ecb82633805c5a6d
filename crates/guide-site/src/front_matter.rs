//! YAML front matter of page sources.

use serde::{Deserialize, Serialize};

const DELIMITER: &str = "---";

/// Page metadata from front matter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<PageTag>,
    /// Learning-path cards shown below the description.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<PathCard>,
    /// Call-to-action link at the bottom of the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NextLink>,
}

/// Colored tag above the title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageTag {
    pub text: String,
    #[serde(default)]
    pub variant: TagVariant,
}

/// Tag color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagVariant {
    #[default]
    Indigo,
    Purple,
    Green,
    Blue,
    Yellow,
    Orange,
    Cyan,
    Pink,
    Red,
}

impl TagVariant {
    /// CSS class suffix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Indigo => "indigo",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Cyan => "cyan",
            Self::Pink => "pink",
            Self::Red => "red",
        }
    }
}

/// Learning-path card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathCard {
    pub icon: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Link to the next page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NextLink {
    pub href: String,
    pub text: String,
}

/// Error parsing front matter.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    #[error("missing front matter block")]
    Missing,
    #[error("unterminated front matter block")]
    Unterminated,
    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split a page source into metadata and markdown body.
pub fn split_front_matter(source: &str) -> Result<(PageMeta, &str), FrontMatterError> {
    let Some(rest) = source
        .strip_prefix(DELIMITER)
        .and_then(|r| r.strip_prefix('\n').or_else(|| r.strip_prefix("\r\n")))
    else {
        return Err(FrontMatterError::Missing);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let meta = serde_yaml::from_str(yaml)?;
            return Ok((meta, body));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}
