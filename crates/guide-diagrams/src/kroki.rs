//! Kroki-backed Mermaid engine.
//!
//! - Parse phase runs the local [`syntax`](crate::syntax) check
//! - Render phase POSTs the source to `{kroki_url}/mermaid/svg`
//! - Init options travel as Kroki diagram options (query parameters)
//! - The returned SVG is rescoped to the render target id

use std::sync::{LazyLock, OnceLock};
use std::time::Duration;

use regex::Regex;
use ureq::Agent;

use crate::consts::DEFAULT_TIMEOUT;
use crate::engine::DiagramEngine;
use crate::error::EngineError;
use crate::options::InitOptions;
use crate::syntax;
use crate::target::RenderTarget;

/// Kroki endpoint for Mermaid sources.
const MERMAID_ENDPOINT: &str = "mermaid";

/// Opening `<svg ...>` tag of a document.
static SVG_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<svg\b[^>]*>").unwrap());

/// `id` attribute inside a tag.
static ID_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\sid="([^"]*)""#).unwrap());

/// Mermaid renderer backed by a Kroki server.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use std::time::Duration;
/// use guide_diagrams::{DiagramRuntime, KrokiEngine};
///
/// let engine = KrokiEngine::new("https://kroki.io").timeout(Duration::from_secs(10));
/// let runtime = DiagramRuntime::new(Arc::new(engine));
/// ```
pub struct KrokiEngine {
    /// Kroki server URL without trailing slash.
    server_url: String,
    /// HTTP agent for connection pooling (reused across render calls).
    agent: Agent,
    /// Diagram options captured on initialization.
    options: OnceLock<Vec<(String, String)>>,
}

impl KrokiEngine {
    /// Create an engine for the given Kroki server URL.
    #[must_use]
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url: String = server_url.into();
        Self {
            server_url: server_url.trim_end_matches('/').to_owned(),
            agent: create_agent(DEFAULT_TIMEOUT),
            options: OnceLock::new(),
        }
    }

    /// Set HTTP timeout for Kroki requests.
    ///
    /// Default is 30 seconds.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.agent = create_agent(timeout);
        self
    }

    /// Kroki server URL this engine renders against.
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Send a source to Kroki and return the response body.
    ///
    /// Handles HTTP errors by reading the response body for error details.
    fn send(&self, source: &str) -> Result<Vec<u8>, EngineError> {
        let url = format!("{}/{MERMAID_ENDPOINT}/svg", self.server_url);

        let mut request = self.agent.post(&url).header("Content-Type", "text/plain");
        for (key, value) in self.options.get().into_iter().flatten() {
            request = request.query(key, value);
        }

        let response = request
            .send(source.as_bytes())
            .map_err(|e| EngineError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(EngineError::Http(format!("HTTP {status}: {error_body}")));
        }

        body.read_to_vec().map_err(|e| EngineError::Io(e.to_string()))
    }
}

impl DiagramEngine for KrokiEngine {
    fn initialize(&self, options: &InitOptions) {
        if self.options.set(options.kroki_pairs()).is_err() {
            tracing::debug!("Kroki engine already initialized");
        }
    }

    fn parse(&self, source: &str) -> Result<bool, EngineError> {
        syntax::check(source)
    }

    fn render(&self, target: &RenderTarget, source: &str) -> Result<String, EngineError> {
        let data = self.send(source)?;
        let svg = String::from_utf8(data)
            .map_err(|e| EngineError::Io(format!("invalid UTF-8 in SVG: {e}")))?;
        Ok(scope_svg(svg.trim(), target))
    }
}

/// Create HTTP agent with the specified timeout.
fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Give the root `<svg>` element the target id.
///
/// Mermaid scopes its embedded stylesheet with `#<id>` selectors, so every
/// reference to the old id is rewritten as well. Without an existing id one
/// is inserted.
#[must_use]
pub fn scope_svg(svg: &str, target: &RenderTarget) -> String {
    let Some(open) = SVG_OPEN_RE.find(svg) else {
        return svg.to_owned();
    };
    let open_tag = open.as_str();

    let Some(old_id) = ID_ATTR_RE.captures(open_tag).map(|c| c[1].to_owned()) else {
        let scoped_tag = format!(r#"<svg id="{target}"{}"#, &open_tag[4..]);
        return format!("{}{scoped_tag}{}", &svg[..open.start()], &svg[open.end()..]);
    };

    if old_id.is_empty() {
        let scoped_tag = open_tag.replacen(r#" id="""#, &format!(r#" id="{target}""#), 1);
        return format!("{}{scoped_tag}{}", &svg[..open.start()], &svg[open.end()..]);
    }

    // Escaped id always yields a valid pattern
    let reference_re =
        Regex::new(&format!(r"#{}([^\w-]|$)", regex::escape(&old_id))).unwrap();
    let scoped_tag = open_tag.replacen(
        &format!(r#" id="{old_id}""#),
        &format!(r#" id="{target}""#),
        1,
    );
    let scoped = format!("{}{scoped_tag}{}", &svg[..open.start()], &svg[open.end()..]);
    reference_re
        .replace_all(&scoped, format!("#{target}${{1}}").as_str())
        .into_owned()
}
