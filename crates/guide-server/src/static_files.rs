//! Static asset serving.
//!
//! Uses `guide-assets` for asset retrieval in both embedded and filesystem modes.

use axum::extract::Path;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::ServerError;

/// Handle GET /assets/{path}.
pub(crate) async fn serve_asset(Path(path): Path<String>) -> Result<Response, ServerError> {
    let Some(content) = guide_assets::get(&path) else {
        return Err(ServerError::AssetNotFound(path));
    };
    let mime = guide_assets::mime_for(&path);
    Ok(([(header::CONTENT_TYPE, mime)], content.into_owned()).into_response())
}
