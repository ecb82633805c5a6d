//! Application state.
//!
//! Shared state for all request handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use guide_site::Site;
use tokio::sync::watch;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Lazily rendered site.
    pub(crate) site: Arc<Site>,
    /// How long a first page request waits before the loading view is served.
    pub(crate) loading_timeout: Duration,
    /// Enable verbose output (log pages with diagram fallbacks).
    pub(crate) verbose: bool,
    /// Application version for `ETag` computation.
    pub(crate) version: String,
    /// Page loads started by document requests and not yet finished, keyed
    /// by path. The receiver flips to `true` when the load ends.
    pub(crate) pending_loads: Mutex<HashMap<String, watch::Receiver<bool>>>,
}

impl AppState {
    pub(crate) fn new(
        site: Arc<Site>,
        loading_timeout: Duration,
        verbose: bool,
        version: String,
    ) -> Self {
        Self {
            site,
            loading_timeout,
            verbose,
            version,
            pending_loads: Mutex::new(HashMap::new()),
        }
    }
}
