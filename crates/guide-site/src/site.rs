//! Lazily rendered site.
//!
//! [`Site`] owns one cell per route. A page is parsed and rendered, diagrams
//! included, the first time it is requested and memoized for the lifetime of
//! the process.
//!
//! # Thread Safety
//!
//! `Site` is shared across request handlers behind an `Arc`:
//! - [`Site::loaded`] never blocks (reads a `OnceLock`)
//! - [`Site::page`] uses double-checked locking so concurrent first requests
//!   for the same page render it once
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use guide_site::{Site, SiteOptions};
//!
//! let site = Arc::new(Site::new(SiteOptions::default()));
//! let page = site.page("/rag-intro")?;
//! let html = site.page_document(&page);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;

use guide_diagrams::{DiagramRuntime, DiagramSlot};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::front_matter::{FrontMatterError, PageMeta, split_front_matter};
use crate::layout::{self, LOADING_TEXT, NOT_FOUND_TITLE, Shell, SiteOptions};
use crate::markdown::{render_markdown, replace_diagram_placeholders};
use crate::navigation::{NavigationData, navigation};
use crate::routes::{Resolution, Route, resolve, routes};

/// A fully rendered page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub path: &'static str,
    pub page_id: &'static str,
    pub meta: PageMeta,
    /// Body HTML without the shell.
    #[serde(rename = "content")]
    pub body_html: String,
    pub diagram_count: usize,
    /// Diagrams replaced by the error fallback.
    pub diagram_failures: usize,
}

/// Error returned when a page cannot be produced.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Page not found: {0}")]
    NotFound(String),
    #[error("Invalid front matter in {path}: {source}")]
    FrontMatter {
        path: &'static str,
        #[source]
        source: FrontMatterError,
    },
}

/// Diagram rendering wired into page loads.
pub struct DiagramSettings {
    pub runtime: Arc<DiagramRuntime>,
    /// Engine overrides passed on every mount; the first mount's value wins.
    pub config: Option<Value>,
}

struct PageCell {
    route: &'static Route,
    page: OnceLock<Arc<RenderedPage>>,
    load: Mutex<()>,
}

/// The guide site: routes, navigation, and memoized pages.
pub struct Site {
    options: SiteOptions,
    diagrams: Option<DiagramSettings>,
    pages: HashMap<&'static str, PageCell>,
}

impl Site {
    /// Create a site with diagrams disabled.
    ///
    /// Mermaid fences render as plain code blocks until
    /// [`with_diagrams`](Self::with_diagrams) is called.
    #[must_use]
    pub fn new(options: SiteOptions) -> Self {
        let pages = routes()
            .iter()
            .map(|route| {
                (
                    route.path,
                    PageCell {
                        route,
                        page: OnceLock::new(),
                        load: Mutex::new(()),
                    },
                )
            })
            .collect();
        Self {
            options,
            diagrams: None,
            pages,
        }
    }

    /// Enable diagram rendering.
    #[must_use]
    pub fn with_diagrams(mut self, settings: DiagramSettings) -> Self {
        self.diagrams = Some(settings);
        self
    }

    #[must_use]
    pub fn options(&self) -> &SiteOptions {
        &self.options
    }

    #[must_use]
    pub fn diagrams_enabled(&self) -> bool {
        self.diagrams.is_some()
    }

    #[must_use]
    pub fn resolve(&self, path: &str) -> Resolution {
        resolve(path)
    }

    #[must_use]
    pub fn navigation(&self) -> NavigationData {
        navigation()
    }

    /// Page at `path` if it has already been rendered.
    #[must_use]
    pub fn loaded(&self, path: &str) -> Option<Arc<RenderedPage>> {
        self.pages.get(path)?.page.get().cloned()
    }

    /// Render the page at `path`, or return the memoized result.
    ///
    /// Failed loads are not memoized.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NotFound`] for unrouted paths and
    /// [`PageError::FrontMatter`] when the page source is malformed.
    ///
    /// # Panics
    ///
    /// Panics if the page load lock is poisoned.
    pub fn page(&self, path: &str) -> Result<Arc<RenderedPage>, PageError> {
        let cell = self
            .pages
            .get(path)
            .ok_or_else(|| PageError::NotFound(path.to_owned()))?;

        if let Some(page) = cell.page.get() {
            return Ok(Arc::clone(page));
        }

        let _guard = cell.load.lock().unwrap();
        if let Some(page) = cell.page.get() {
            return Ok(Arc::clone(page));
        }

        let page = Arc::new(self.render_route(cell.route)?);
        let _ = cell.page.set(Arc::clone(&page));
        Ok(page)
    }

    /// Render every routed page, in route order.
    pub fn load_all(&self) -> Vec<(&'static str, Result<Arc<RenderedPage>, PageError>)> {
        routes()
            .iter()
            .map(|route| (route.path, self.page(route.path)))
            .collect()
    }

    /// Full HTML document for a rendered page.
    #[must_use]
    pub fn page_document(&self, page: &RenderedPage) -> String {
        let main = layout::page_main(&page.meta, &page.body_html);
        Shell {
            site: &self.options,
            active_path: Some(page.path),
            title: &page.meta.title,
            main: &main,
            refresh: false,
        }
        .render()
    }

    /// Full HTML document for an unknown path.
    #[must_use]
    pub fn not_found_document(&self) -> String {
        let main = layout::not_found_main();
        Shell {
            site: &self.options,
            active_path: None,
            title: NOT_FOUND_TITLE,
            main: &main,
            refresh: false,
        }
        .render()
    }

    /// Full HTML document shown while the page at `path` is still loading.
    ///
    /// The document reloads itself shortly.
    #[must_use]
    pub fn loading_document(&self, path: &str) -> String {
        let main = layout::loading_main();
        Shell {
            site: &self.options,
            active_path: Some(path),
            title: LOADING_TEXT,
            main: &main,
            refresh: true,
        }
        .render()
    }

    fn render_route(&self, route: &'static Route) -> Result<RenderedPage, PageError> {
        let start = Instant::now();
        let (meta, body) = split_front_matter(route.source).map_err(|source| {
            PageError::FrontMatter {
                path: route.path,
                source,
            }
        })?;

        let mut rendered = render_markdown(body, self.diagrams.is_some());
        let diagram_count = rendered.diagrams.len();
        let mut diagram_failures = 0;

        if let Some(settings) = &self.diagrams
            && diagram_count > 0
        {
            let outputs: Vec<(String, bool)> = rendered
                .diagrams
                .par_iter()
                .map(|chart| {
                    let slot =
                        DiagramSlot::mount(Arc::clone(&settings.runtime), settings.config.as_ref());
                    slot.set_chart(chart);
                    (slot.to_html(), slot.failed())
                })
                .collect();

            diagram_failures = outputs.iter().filter(|(_, failed)| *failed).count();
            let markup: Vec<String> = outputs.into_iter().map(|(html, _)| html).collect();
            rendered.html = replace_diagram_placeholders(&rendered.html, &markup);
        }

        tracing::info!(
            path = route.path,
            diagrams = diagram_count,
            failures = diagram_failures,
            elapsed_ms = start.elapsed().as_millis(),
            "Rendered page"
        );

        Ok(RenderedPage {
            path: route.path,
            page_id: route.page_id,
            meta,
            body_html: rendered.html,
            diagram_count,
            diagram_failures,
        })
    }
}
