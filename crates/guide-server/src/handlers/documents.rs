//! HTML documents for browser navigation.
//!
//! Every path outside `/api` and `/assets` lands here. Unknown paths get the
//! not-found view. A page that is still loading after the configured timeout
//! gets the loading view, which refreshes itself until the load completes.
//! Refreshes join the background load already running for the page.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use guide_site::{RenderedPage, Resolution};

use crate::error::ServerError;
use crate::handlers::{load_page, start_load};
use crate::state::AppState;

/// Handle GET for any page path.
pub(crate) async fn get_document(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ServerError> {
    let path = uri.path();

    if matches!(state.site.resolve(path), Resolution::NotFound) {
        tracing::debug!(path, "No route");
        return Ok((
            StatusCode::NOT_FOUND,
            Html(state.site.not_found_document()),
        )
            .into_response());
    }

    if let Some(page) = state.site.loaded(path) {
        return Ok(page_response(&state, &page));
    }

    let mut done = start_load(&state, path);
    let finished = tokio::time::timeout(state.loading_timeout, done.wait_for(|ended| *ended))
        .await
        .is_ok();
    if !finished {
        tracing::info!(path, "Page still loading, serving loading view");
        return Ok(Html(state.site.loading_document(path)).into_response());
    }

    // A failed background load is not memoized; retry here to surface the error.
    let page = match state.site.loaded(path) {
        Some(page) => page,
        None => load_page(&state.site, path.to_owned()).await?,
    };
    Ok(page_response(&state, &page))
}

fn page_response(state: &AppState, page: &RenderedPage) -> Response {
    if state.verbose && page.diagram_failures > 0 {
        tracing::warn!(
            path = page.path,
            failures = page.diagram_failures,
            "Page has diagrams rendered as fallback"
        );
    }
    Html(state.site.page_document(page)).into_response()
}
