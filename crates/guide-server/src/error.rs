//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use guide_site::PageError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No route for the given path.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Asset not found at the given path.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// Page load error from guide-site.
    #[error("Page error: {0}")]
    Page(#[from] PageError),

    /// Blocking page load task failed.
    #[error("Page load task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::PageNotFound(path) | Self::Page(PageError::NotFound(path)) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Page not found", "path": path}),
            ),
            Self::AssetNotFound(path) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Asset not found", "path": path}),
            ),
            Self::Page(e) => {
                tracing::error!(error = %e, "Page load failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": e.to_string()}),
                )
            }
            Self::Join(e) => {
                tracing::error!(error = %e, "Page load task failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": e.to_string()}),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = ServerError::PageNotFound("/nope".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ServerError::Page(PageError::NotFound("/nope".to_owned())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_asset_not_found_status() {
        let response = ServerError::AssetNotFound("app.js".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
