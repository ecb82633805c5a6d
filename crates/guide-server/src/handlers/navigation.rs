//! Navigation API endpoint.
//!
//! Returns the sidebar groups and footer links.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use guide_site::NavigationData;

use crate::state::AppState;

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(State(state): State<Arc<AppState>>) -> Json<NavigationData> {
    Json(state.site.navigation())
}
