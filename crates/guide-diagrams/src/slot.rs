//! Per-instance diagram container.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::runtime::{DiagramFailure, DiagramRuntime, Rendered};

/// Sequence number of one render pass on a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTicket(u64);

#[derive(Debug, Default)]
struct SlotState {
    chart: String,
    content: String,
    failed: bool,
}

/// One diagram instance on a page.
///
/// Mounting a slot initializes the shared runtime on first use. Each pass
/// takes a [`RenderTicket`]; only the pass holding the most recently issued
/// ticket may commit, so a slow pass finishing after a newer one is dropped.
///
/// # Example
///
/// ```ignore
/// let slot = DiagramSlot::mount(Arc::clone(&runtime), None);
/// slot.set_chart("graph TD\n  A-->B");
/// let html = slot.to_html();
/// ```
pub struct DiagramSlot {
    runtime: Arc<DiagramRuntime>,
    issued: AtomicU64,
    state: Mutex<SlotState>,
}

impl DiagramSlot {
    /// Mount a slot, initializing the runtime with `config` if this is the
    /// first mount on it.
    #[must_use]
    pub fn mount(runtime: Arc<DiagramRuntime>, config: Option<&Value>) -> Self {
        runtime.ensure_initialized(config);
        Self {
            runtime,
            issued: AtomicU64::new(0),
            state: Mutex::new(SlotState::default()),
        }
    }

    /// Set the chart source and run a render pass.
    ///
    /// An empty chart leaves the content untouched. Setting the same chart
    /// again is a no-op. Returns whether the content was replaced.
    ///
    /// # Panics
    ///
    /// Panics if the state lock is poisoned.
    pub fn set_chart(&self, chart: &str) -> bool {
        if chart.is_empty() {
            return false;
        }
        {
            let mut state = self.state.lock().unwrap();
            if state.chart == chart {
                return false;
            }
            state.chart = chart.to_owned();
        }

        let ticket = self.begin();
        let result = self.runtime.render(chart);
        self.commit(ticket, result)
    }

    /// Issue a ticket for a new pass, invalidating all earlier ones.
    pub fn begin(&self) -> RenderTicket {
        RenderTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Commit the result of a pass.
    ///
    /// Success replaces the content with the markup, failure with the
    /// fallback block. Returns `false` and leaves the content alone when a
    /// newer ticket has been issued since `ticket`.
    ///
    /// # Panics
    ///
    /// Panics if the state lock is poisoned.
    pub fn commit(
        &self,
        ticket: RenderTicket,
        result: Result<Rendered, DiagramFailure>,
    ) -> bool {
        let (content, failed) = match result {
            Ok(rendered) => (rendered.markup, false),
            Err(failure) => (failure.fallback_html(), true),
        };

        let mut state = self.state.lock().unwrap();
        let latest = self.issued.load(Ordering::SeqCst);
        if ticket.0 != latest {
            tracing::debug!(ticket = ticket.0, latest, "Discarding stale diagram render");
            return false;
        }
        state.content = content;
        state.failed = failed;
        true
    }

    /// Current inner content.
    ///
    /// # Panics
    ///
    /// Panics if the state lock is poisoned.
    #[must_use]
    pub fn content(&self) -> String {
        self.state.lock().unwrap().content.clone()
    }

    /// Whether the current content is the fallback block.
    ///
    /// # Panics
    ///
    /// Panics if the state lock is poisoned.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.state.lock().unwrap().failed
    }

    /// Slot markup including the wrapper elements.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="mermaid-chart-wrapper"><div class="mermaid-chart">{}</div></div>"#,
            self.content()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use serde_json::json;

    use super::*;
    use crate::engine::DiagramEngine;
    use crate::runtime::tests::{MockEngine, ParseMode};
    use pretty_assertions::assert_eq;

    fn shared(engine: &Arc<MockEngine>) -> Arc<DiagramRuntime> {
        Arc::new(DiagramRuntime::new(
            Arc::clone(engine) as Arc<dyn DiagramEngine>
        ))
    }

    #[test]
    fn test_three_mounts_initialize_once() {
        let engine = Arc::new(MockEngine::ok());
        let runtime = shared(&engine);

        let slots: Vec<_> = (0..3)
            .map(|_| DiagramSlot::mount(Arc::clone(&runtime), Some(&json!({"theme": "dark"}))))
            .collect();
        for slot in &slots {
            assert!(slot.set_chart("graph TD\nA-->B"));
        }

        assert_eq!(engine.inits.load(Ordering::SeqCst), 1);
        assert_eq!(engine.seen_options.lock().unwrap()[0].theme, "dark");
    }

    #[test]
    fn test_success_replaces_content() {
        let engine = Arc::new(MockEngine::ok());
        let slot = DiagramSlot::mount(shared(&engine), None);

        assert!(slot.set_chart("graph TD\nA-->B"));
        assert!(slot.content().starts_with("<svg id=\"chart-"));
        assert!(!slot.failed());
    }

    #[test]
    fn test_empty_chart_leaves_content_untouched() {
        let engine = Arc::new(MockEngine::ok());
        let slot = DiagramSlot::mount(shared(&engine), None);

        assert!(!slot.set_chart(""));
        assert_eq!(slot.content(), "");
        assert_eq!(engine.seen_sources.lock().unwrap().len(), 0);

        slot.set_chart("graph TD\nA-->B");
        let before = slot.content();
        assert!(!slot.set_chart(""));
        assert_eq!(slot.content(), before);
    }

    #[test]
    fn test_failure_shows_only_fallback() {
        let engine = Arc::new(MockEngine::new(ParseMode::Fail, false));
        let slot = DiagramSlot::mount(shared(&engine), None);

        slot.set_chart("graph TD\nA-->B");
        let content = slot.content();
        assert!(slot.failed());
        assert!(content.starts_with(r#"<pre class="error""#));
        assert!(!content.contains("<svg"));
    }

    #[test]
    fn test_new_chart_replaces_previous_content_entirely() {
        let engine = Arc::new(MockEngine::ok());
        let slot = DiagramSlot::mount(shared(&engine), None);

        slot.set_chart("graph TD\nA-->B");
        let first = slot.content();
        slot.set_chart("graph LR\nA-->B-->C");
        let second = slot.content();

        assert_ne!(first, second);
        assert_eq!(second.matches("<svg").count(), 1);
    }

    #[test]
    fn test_same_chart_is_not_rerendered() {
        let engine = Arc::new(MockEngine::ok());
        let slot = DiagramSlot::mount(shared(&engine), None);

        assert!(slot.set_chart("graph TD\nA-->B"));
        assert!(!slot.set_chart("graph TD\nA-->B"));
        assert_eq!(engine.renders.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let engine = Arc::new(MockEngine::ok());
        let runtime = shared(&engine);
        let slot = DiagramSlot::mount(Arc::clone(&runtime), None);

        let old = slot.begin();
        let new = slot.begin();

        let newer = runtime.render("graph LR\nB-->C").unwrap();
        let newer_markup = newer.markup.clone();
        assert!(slot.commit(new, Ok(newer)));

        let older = runtime.render("graph TD\nA-->B").unwrap();
        assert!(!slot.commit(old, Ok(older)));
        assert_eq!(slot.content(), newer_markup);
    }

    #[test]
    fn test_wrapper_markup() {
        let engine = Arc::new(MockEngine::ok());
        let slot = DiagramSlot::mount(shared(&engine), None);
        assert_eq!(
            slot.to_html(),
            r#"<div class="mermaid-chart-wrapper"><div class="mermaid-chart"></div></div>"#
        );
    }
}
