//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/categories", get(handlers::categories::get_categories))
        .route("/api/nav", get(handlers::navigation::get_navigation))
        .route("/api/notion/list", get(handlers::notion::list_notion))
        .route("/api/notion", get(handlers::notion::get_notion_page))
        .route("/api/docs", get(handlers::docs::get_root_doc))
        .route("/api/docs/", get(handlers::docs::get_root_doc))
        .route("/api/docs/{*path}", get(handlers::docs::get_doc));

    Router::new()
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
