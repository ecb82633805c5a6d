//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route("/api/pages/", get(handlers::pages::get_root_page))
        .route("/api/pages/{*path}", get(handlers::pages::get_page));

    Router::new()
        .merge(api_routes)
        .route("/assets/{*path}", get(static_files::serve_asset))
        .fallback(handlers::documents::get_document)
        .layer(
            ServiceBuilder::new()
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use guide_diagrams::{
        DiagramEngine, DiagramRuntime, EngineError, InitOptions, RenderTarget, check_syntax,
    };
    use guide_site::{DiagramSettings, Site, SiteOptions};
    use tower::ServiceExt;

    use super::*;

    const BODY_LIMIT: usize = 4 * 1024 * 1024;

    /// Engine that renders a marker SVG, optionally blocking until released.
    struct GateEngine {
        open: AtomicBool,
    }

    impl GateEngine {
        fn new(open: bool) -> Self {
            Self {
                open: AtomicBool::new(open),
            }
        }
    }

    impl DiagramEngine for GateEngine {
        fn initialize(&self, _options: &InitOptions) {}

        fn parse(&self, source: &str) -> Result<bool, EngineError> {
            check_syntax(source)
        }

        fn render(&self, target: &RenderTarget, _source: &str) -> Result<String, EngineError> {
            while !self.open.load(Ordering::Acquire) {
                std::thread::sleep(Duration::from_millis(5));
            }
            Ok(format!(r#"<svg id="{}"></svg>"#, target.as_str()))
        }
    }

    fn state_with(site: Site, loading_timeout: Duration) -> Arc<AppState> {
        Arc::new(AppState::new(
            Arc::new(site),
            loading_timeout,
            false,
            "test".to_owned(),
        ))
    }

    fn plain_state() -> Arc<AppState> {
        state_with(Site::new(SiteOptions::default()), Duration::from_secs(5))
    }

    fn diagram_site(engine: Arc<GateEngine>) -> Site {
        Site::new(SiteOptions::default()).with_diagrams(DiagramSettings {
            runtime: Arc::new(DiagramRuntime::new(engine)),
            config: None,
        })
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_known_path_serves_full_page() {
        let response = get(create_router(plain_state()), "/rag-intro").await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains(r#"<aside class="sidebar">"#));
        assert!(html.contains(r#"<a href="/rag-intro" class="sidebar-nav-link active">"#));
        assert!(html.contains("RAG 简介"));
    }

    #[tokio::test]
    async fn test_unknown_path_serves_not_found() {
        let response = get(create_router(plain_state()), "/no-such-page").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = body_string(response).await;
        assert!(html.contains(guide_site::NOT_FOUND_TITLE));
        assert!(html.contains(r#"<a href="/" class="btn btn-primary">"#));
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let response = get(create_router(plain_state()), "/").await;

        let headers = response.headers();
        assert!(headers.contains_key("content-security-policy"));
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_slow_first_load_serves_loading_view() {
        let engine = Arc::new(GateEngine::new(false));
        let state = state_with(diagram_site(Arc::clone(&engine)), Duration::from_millis(50));

        let response = get(create_router(Arc::clone(&state)), "/getting-started").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains(guide_site::LOADING_TEXT));
        assert!(html.contains(r#"http-equiv="refresh""#));

        engine.open.store(true, Ordering::Release);
        let site = Arc::clone(&state.site);
        tokio::task::spawn_blocking(move || site.page("/getting-started"))
            .await
            .unwrap()
            .unwrap();

        let response = get(create_router(state), "/getting-started").await;
        let html = body_string(response).await;
        assert!(!html.contains(guide_site::LOADING_TEXT));
        assert!(html.contains(r#"<div class="mermaid-chart-wrapper">"#));
    }

    #[tokio::test]
    async fn test_loading_refreshes_share_one_background_load() {
        let engine = Arc::new(GateEngine::new(false));
        let state = state_with(diagram_site(Arc::clone(&engine)), Duration::from_millis(20));

        for _ in 0..3 {
            let response = get(create_router(Arc::clone(&state)), "/getting-started").await;
            let html = body_string(response).await;
            assert!(html.contains(guide_site::LOADING_TEXT));
        }
        assert_eq!(state.pending_loads.lock().unwrap().len(), 1);

        let mut done = handlers::start_load(&state, "/getting-started");
        let pending = state.pending_loads.lock().unwrap()["/getting-started"].clone();
        assert!(done.same_channel(&pending));

        engine.open.store(true, Ordering::Release);
        done.wait_for(|ended| *ended).await.unwrap();
        assert!(state.pending_loads.lock().unwrap().is_empty());
        assert!(state.site.loaded("/getting-started").is_some());

        let html = body_string(get(create_router(state), "/getting-started").await).await;
        assert!(html.contains(r#"<div class="mermaid-chart-wrapper">"#));
    }

    #[tokio::test]
    async fn test_fast_load_serves_page_directly() {
        let engine = Arc::new(GateEngine::new(true));
        let state = state_with(diagram_site(engine), Duration::from_secs(10));

        let html = body_string(get(create_router(state), "/getting-started").await).await;
        assert!(html.contains("<svg id="));
        assert!(!html.contains(guide_site::LOADING_TEXT));
    }

    #[tokio::test]
    async fn test_api_page_json() {
        let response = get(create_router(plain_state()), "/api/pages/rag-intro").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::ETAG));
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["path"], "/rag-intro");
        assert_eq!(json["pageId"], "rag-intro");
        assert_eq!(json["meta"]["title"], "RAG 简介");
        assert!(json["content"].as_str().unwrap().contains("content-section"));
    }

    #[tokio::test]
    async fn test_api_root_page() {
        let response = get(create_router(plain_state()), "/api/pages/").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["path"], "/");
    }

    #[tokio::test]
    async fn test_api_page_not_modified() {
        let app = create_router(plain_state());
        let first = get(app.clone(), "/api/pages/faq").await;
        let etag = first.headers()[header::ETAG].clone();

        let request = Request::builder()
            .uri("/api/pages/faq")
            .header(header::IF_NONE_MATCH, etag)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_api_unknown_page_is_json_404() {
        let response = get(create_router(plain_state()), "/api/pages/nope").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"], "Page not found");
        assert_eq!(json["path"], "/nope");
    }

    #[tokio::test]
    async fn test_api_navigation() {
        let response = get(create_router(plain_state()), "/api/navigation").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["groups"].as_array().unwrap().len(), 7);
        assert!(json["footer"]["learning"].is_array());
    }

    #[tokio::test]
    async fn test_assets() {
        let response = get(create_router(plain_state()), "/assets/style.css").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");

        let response = get(create_router(plain_state()), "/assets/missing.js").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
