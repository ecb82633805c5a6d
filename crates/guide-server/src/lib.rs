//! HTTP server for the LangChain4j guide site.
//!
//! This crate provides an axum server that serves:
//! - Server-rendered HTML pages (sidebar, content, footer) for every route
//! - API endpoints for page content and navigation
//! - The stylesheet and copy-button script
//!
//! # Static Asset Modes
//!
//! - **Development** (default): Serves files from the `guide-assets` crate directory
//! - **Production** (`embed-assets` feature): Embeds assets in the binary
//!
//! # Quick Start
//!
//! ```ignore
//! use guide_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         kroki_url: Some("https://kroki.io".to_owned()),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (guide-server)
//!                        │
//!                        ├─► HTML fallback ──► Site (lazy page load)
//!                        │                        │
//!                        │                        └─► DiagramRuntime ──► Kroki
//!                        │
//!                        ├─► API routes (pages, navigation)
//!                        │
//!                        └─► /assets (embedded or filesystem)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use guide_diagrams::{DiagramRuntime, KrokiEngine};
use guide_site::{DiagramSettings, Site, SiteOptions};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Site branding.
    pub site: SiteOptions,
    /// Kroki URL for diagrams (`None` shows diagrams as code blocks).
    pub kroki_url: Option<String>,
    /// HTTP timeout for Kroki requests.
    pub diagram_timeout: Duration,
    /// Options merged over the diagram defaults on first initialization.
    pub diagram_options: Option<serde_json::Value>,
    /// How long a first page request waits before the loading view is served.
    pub loading_timeout: Duration,
    /// Enable verbose output.
    pub verbose: bool,
    /// Application version (for `ETag` computation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            site: SiteOptions::default(),
            kroki_url: None,
            diagram_timeout: Duration::from_secs(30),
            diagram_options: None,
            loading_timeout: Duration::from_secs(3),
            verbose: false,
            version: String::new(),
        }
    }
}

/// Build the site described by the configuration.
///
/// Diagram rendering is wired to a [`KrokiEngine`] when a Kroki URL is set.
#[must_use]
pub fn create_site(config: &ServerConfig) -> Site {
    let site = Site::new(config.site.clone());
    let Some(kroki_url) = &config.kroki_url else {
        return site;
    };

    let engine = KrokiEngine::new(kroki_url).timeout(config.diagram_timeout);
    site.with_diagrams(DiagramSettings {
        runtime: Arc::new(DiagramRuntime::new(Arc::new(engine))),
        config: config.diagram_options.clone(),
    })
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener cannot bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let site = Arc::new(create_site(&config));
    if !site.diagrams_enabled() {
        tracing::info!("Diagram rendering disabled (no Kroki URL configured)");
    }

    let state = Arc::new(AppState::new(
        site,
        config.loading_timeout,
        config.verbose,
        config.version.clone(),
    ));

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the loaded guide configuration.
///
/// # Arguments
///
/// * `config` - Guide configuration
/// * `version` - Application version
/// * `verbose` - Enable verbose output
#[must_use]
pub fn server_config_from_config(
    config: &guide_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        site: SiteOptions {
            title: config.site.title.clone(),
            subtitle: config.site.subtitle.clone(),
        },
        kroki_url: config.diagrams_resolved.kroki_url.clone(),
        diagram_timeout: config.diagrams_resolved.timeout,
        diagram_options: config.diagrams_resolved.options.clone(),
        loading_timeout: config.loading.timeout(),
        verbose,
        version,
    }
}
