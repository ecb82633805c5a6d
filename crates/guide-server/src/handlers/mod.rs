//! HTTP request handlers.

pub(crate) mod documents;
pub(crate) mod navigation;
pub(crate) mod pages;

use std::sync::Arc;

use guide_site::{RenderedPage, Site};
use tokio::sync::watch;

use crate::error::ServerError;
use crate::state::AppState;

/// Convert an API path (without leading slash) to a route path.
pub(crate) fn to_url_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// Load a page on a blocking worker.
///
/// Page loads render diagrams through blocking HTTP calls, so they never run
/// on the async executor.
pub(crate) async fn load_page(site: &Arc<Site>, path: String) -> Result<Arc<RenderedPage>, ServerError> {
    let site = Arc::clone(site);
    let page = tokio::task::spawn_blocking(move || site.page(&path)).await??;
    Ok(page)
}

/// Start loading the page at `path` in the background, or join the load
/// already running for it.
///
/// At most one background load per path is in flight. The returned receiver
/// turns `true` once that load has ended, successfully or not.
///
/// # Panics
///
/// Panics if the pending loads lock is poisoned.
pub(crate) fn start_load(state: &Arc<AppState>, path: &str) -> watch::Receiver<bool> {
    let mut pending = state.pending_loads.lock().unwrap();
    if let Some(done) = pending.get(path) {
        return done.clone();
    }

    let (tx, done) = watch::channel(false);
    pending.insert(path.to_owned(), done.clone());
    drop(pending);

    let state = Arc::clone(state);
    let path = path.to_owned();
    tokio::task::spawn_blocking(move || {
        if let Err(e) = state.site.page(&path) {
            tracing::warn!(path, error = %e, "Background page load failed");
        }
        state.pending_loads.lock().unwrap().remove(&path);
        let _ = tx.send(true);
    });

    done
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_url_path() {
        assert_eq!(to_url_path(""), "/");
        assert_eq!(to_url_path("rag-intro"), "/rag-intro");
        assert_eq!(to_url_path("/faq"), "/faq");
    }
}
