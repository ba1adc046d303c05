//! Navigation API endpoint.
//!
//! Returns the navigation tree for the sidebar: the local content tree
//! with the Notion group appended when the database lists pages.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use shelf_content::NavItem;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/nav.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// Navigation tree items.
    items: Vec<NavItem>,
}

/// Handle GET /api/nav.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NavigationResponse>, ServerError> {
    let items = state.site.navigation()?;
    Ok(Json(NavigationResponse { items }))
}
