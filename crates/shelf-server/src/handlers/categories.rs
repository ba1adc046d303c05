//! Categories API endpoint.
//!
//! Returns the top-level content directories with recursive document
//! counts, for the category badges on the landing page.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use shelf_content::Category;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/categories.
#[derive(Serialize)]
pub(crate) struct CategoriesResponse {
    /// Category listing, sorted by label.
    categories: Vec<Category>,
}

/// Handle GET /api/categories.
///
/// Filesystem failures surface as a 500 JSON error.
pub(crate) async fn get_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ServerError> {
    let categories = state.site.categories()?;
    Ok(Json(CategoriesResponse { categories }))
}
