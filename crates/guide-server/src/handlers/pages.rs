//! Pages API endpoint.
//!
//! Loads a page and returns its metadata and body HTML as JSON.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use guide_site::Resolution;
use md5::{Digest, Md5};

use crate::error::ServerError;
use crate::handlers::{load_page, to_url_path};
use crate::state::AppState;

/// Handle GET /api/pages/ (home page).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(String::new(), state, headers).await
}

/// Handle GET /api/pages/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(path, state, headers).await
}

async fn get_page_impl(
    path: String,
    state: Arc<AppState>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let path = to_url_path(&path);
    if matches!(state.site.resolve(&path), Resolution::NotFound) {
        return Err(ServerError::PageNotFound(path));
    }

    let page = load_page(&state.site, path).await?;
    let etag = compute_etag(&state.version, &page.body_html);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        Json(page.as_ref()),
    )
        .into_response())
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
