//! Shared diagram runtime: one-time engine initialization and the
//! normalize → parse → render pipeline.

use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::engine::DiagramEngine;
use crate::error::DiagramError;
use crate::fallback::fallback_html;
use crate::normalize::normalize;
use crate::options::InitOptions;
use crate::target::RenderTarget;

/// Successful render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Target id the markup is scoped to.
    pub target: RenderTarget,
    /// Inline diagram markup.
    pub markup: String,
    /// Normalized source that was rendered.
    pub normalized: String,
}

/// Failed render pass.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct DiagramFailure {
    /// Normalized source that failed.
    pub normalized: String,
    /// Stage-tagged error.
    #[source]
    pub error: DiagramError,
}

impl DiagramFailure {
    /// Visible error block for this failure.
    #[must_use]
    pub fn fallback_html(&self) -> String {
        fallback_html(&self.error.to_string(), &self.normalized)
    }
}

/// Initialization state captured by the first mount.
#[derive(Debug)]
struct InitState {
    config: Option<Value>,
    options: InitOptions,
}

/// Process-wide diagram runtime shared by every slot.
///
/// Holds the engine and the write-once initialization state. Share it with
/// `Arc`; every [`DiagramSlot`](crate::DiagramSlot) mounted on the same runtime
/// sees the same engine configuration.
pub struct DiagramRuntime {
    engine: Arc<dyn DiagramEngine>,
    init: OnceLock<InitState>,
}

impl DiagramRuntime {
    /// Create a runtime around an engine. The engine is not initialized yet.
    #[must_use]
    pub fn new(engine: Arc<dyn DiagramEngine>) -> Self {
        Self {
            engine,
            init: OnceLock::new(),
        }
    }

    /// Initialize the engine on first call and return the effective options.
    ///
    /// The first caller's `config` wins. A later call with a different
    /// `config` is ignored with a warning. An override that does not fit
    /// [`InitOptions`] is logged and the defaults are used.
    pub fn ensure_initialized(&self, config: Option<&Value>) -> &InitOptions {
        let mut initialized_now = false;
        let state = self.init.get_or_init(|| {
            initialized_now = true;
            let options = resolve_options(config);
            tracing::debug!(theme = %options.theme, "Initializing diagram engine");
            self.engine.initialize(&options);
            InitState {
                config: config.cloned(),
                options,
            }
        });

        if !initialized_now && config.is_some() && state.config.as_ref() != config {
            tracing::warn!("Diagram engine already initialized; ignoring later config");
        }

        &state.options
    }

    /// Whether the engine has been initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.init.get().is_some()
    }

    /// Run one render pass over `chart` without touching any container.
    ///
    /// Failures are logged and returned, never raised. The render phase runs
    /// only after the parse phase reported success.
    pub fn render(&self, chart: &str) -> Result<Rendered, DiagramFailure> {
        self.ensure_initialized(None);

        let normalized = normalize(chart);
        let result = self.run_engine(&normalized);

        match result {
            Ok((target, markup)) => Ok(Rendered {
                target,
                markup,
                normalized,
            }),
            Err(error) => {
                tracing::error!(
                    stage = error.stage(),
                    error = %error,
                    source = %normalized,
                    "Diagram render failed"
                );
                Err(DiagramFailure { normalized, error })
            }
        }
    }

    /// Render `chart` to markup, substituting the fallback block on failure.
    pub fn render_html(&self, chart: &str) -> String {
        match self.render(chart) {
            Ok(rendered) => rendered.markup,
            Err(failure) => failure.fallback_html(),
        }
    }

    fn run_engine(&self, normalized: &str) -> Result<(RenderTarget, String), DiagramError> {
        match self.engine.parse(normalized) {
            Ok(true) => {}
            Ok(false) => return Err(DiagramError::ParseRejected),
            Err(e) => return Err(DiagramError::Parse(e)),
        }

        let target = RenderTarget::generate();
        let markup = self
            .engine
            .render(&target, normalized)
            .map_err(DiagramError::Render)?;
        Ok((target, markup))
    }
}

fn resolve_options(config: Option<&Value>) -> InitOptions {
    let Some(config) = config else {
        return InitOptions::default();
    };
    InitOptions::with_overrides(config).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Invalid diagram config, using defaults");
        InitOptions::default()
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::error::EngineError;
    use pretty_assertions::assert_eq;

    /// Parse behavior of [`MockEngine`].
    #[derive(Clone, Copy)]
    pub(crate) enum ParseMode {
        Accept,
        Reject,
        Fail,
    }

    /// Engine recording every call.
    pub(crate) struct MockEngine {
        pub(crate) parse_mode: ParseMode,
        pub(crate) render_fails: bool,
        pub(crate) inits: AtomicUsize,
        pub(crate) renders: AtomicUsize,
        pub(crate) seen_options: Mutex<Vec<InitOptions>>,
        pub(crate) seen_sources: Mutex<Vec<String>>,
    }

    impl MockEngine {
        pub(crate) fn new(parse_mode: ParseMode, render_fails: bool) -> Self {
            Self {
                parse_mode,
                render_fails,
                inits: AtomicUsize::new(0),
                renders: AtomicUsize::new(0),
                seen_options: Mutex::new(Vec::new()),
                seen_sources: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn ok() -> Self {
            Self::new(ParseMode::Accept, false)
        }
    }

    impl DiagramEngine for MockEngine {
        fn initialize(&self, options: &InitOptions) {
            self.inits.fetch_add(1, Ordering::SeqCst);
            self.seen_options.lock().unwrap().push(options.clone());
        }

        fn parse(&self, source: &str) -> Result<bool, EngineError> {
            self.seen_sources.lock().unwrap().push(source.to_owned());
            match self.parse_mode {
                ParseMode::Accept => Ok(true),
                ParseMode::Reject => Ok(false),
                ParseMode::Fail => Err(EngineError::Syntax("unexpected token".to_owned())),
            }
        }

        fn render(&self, target: &RenderTarget, source: &str) -> Result<String, EngineError> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            if self.render_fails {
                return Err(EngineError::Http("HTTP 500: down".to_owned()));
            }
            Ok(format!(r#"<svg id="{target}">{}</svg>"#, source.len()))
        }
    }

    fn runtime(engine: &Arc<MockEngine>) -> DiagramRuntime {
        DiagramRuntime::new(Arc::clone(engine) as Arc<dyn DiagramEngine>)
    }

    #[test]
    fn test_initializes_once() {
        let engine = Arc::new(MockEngine::ok());
        let runtime = runtime(&engine);
        assert!(!runtime.is_initialized());

        runtime.ensure_initialized(None);
        runtime.ensure_initialized(None);
        runtime.render("graph TD\nA-->B").unwrap();

        assert!(runtime.is_initialized());
        assert_eq!(engine.inits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_first_config_wins() {
        let engine = Arc::new(MockEngine::ok());
        let runtime = runtime(&engine);

        let options = runtime.ensure_initialized(Some(&json!({"theme": "dark"})));
        assert_eq!(options.theme, "dark");

        let options = runtime.ensure_initialized(Some(&json!({"theme": "forest"})));
        assert_eq!(options.theme, "dark");
        assert_eq!(engine.inits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let engine = Arc::new(MockEngine::ok());
        let runtime = runtime(&engine);

        let options = runtime.ensure_initialized(Some(&json!(["not", "an", "object"])));
        assert_eq!(*options, InitOptions::default());
    }

    #[test]
    fn test_render_passes_normalized_source() {
        let engine = Arc::new(MockEngine::ok());
        let runtime = runtime(&engine);

        let rendered = runtime
            .render("\n    graph TD\n      A[One<BR>Two]-->B\n")
            .unwrap();

        assert_eq!(rendered.normalized, "graph TD\n  A[One<br/>Two]-->B");
        assert_eq!(
            engine.seen_sources.lock().unwrap().as_slice(),
            ["graph TD\n  A[One<br/>Two]-->B".to_owned()]
        );
        assert!(rendered.markup.contains(rendered.target.as_str()));
    }

    #[test]
    fn test_parse_rejected_skips_render() {
        let engine = Arc::new(MockEngine::new(ParseMode::Reject, false));
        let runtime = runtime(&engine);

        let failure = runtime.render("graph TD\nA-->B").unwrap_err();
        assert!(matches!(failure.error, DiagramError::ParseRejected));
        assert_eq!(failure.error.stage(), "parse");
        assert_eq!(engine.renders.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_parse_error_skips_render() {
        let engine = Arc::new(MockEngine::new(ParseMode::Fail, false));
        let runtime = runtime(&engine);

        let html = runtime.render_html("graph TD\nA-->B");
        assert!(html.starts_with(r#"<pre class="error""#));
        assert!(html.contains("unexpected token"));
        assert!(!html.contains("<svg"));
        assert_eq!(engine.renders.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_render_error_yields_fallback() {
        let engine = Arc::new(MockEngine::new(ParseMode::Accept, true));
        let runtime = runtime(&engine);

        let failure = runtime.render("graph TD\nA-->B").unwrap_err();
        assert_eq!(failure.error.stage(), "render");

        let html = failure.fallback_html();
        assert!(html.contains("HTTP 500: down"));
        assert!(html.contains("graph TD\nA--&gt;B..."));
    }

    #[test]
    fn test_each_pass_gets_fresh_target() {
        let engine = Arc::new(MockEngine::ok());
        let runtime = runtime(&engine);

        let first = runtime.render("graph TD\nA-->B").unwrap();
        let second = runtime.render("graph TD\nA-->B").unwrap();
        assert_ne!(first.target, second.target);
    }
}
