//! Internal constants for diagram rendering.

use std::time::Duration;

/// Default HTTP timeout for Kroki requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix of every generated render target id.
pub const TARGET_PREFIX: &str = "chart-";

/// Canonical form of a self-closing line-break directive.
pub const CANONICAL_BREAK: &str = "<br/>";

/// Number of source characters shown in the fallback preview.
pub const PREVIEW_CHARS: usize = 500;

/// Heading of the fallback block ("diagram failed to load").
pub const FAILURE_HEADING: &str = "图表加载失败";

/// Heading of the source preview in the fallback block ("diagram content").
pub const SOURCE_HEADING: &str = "图表内容";

/// CSS class marking the fallback block.
pub const ERROR_CLASS: &str = "error";
