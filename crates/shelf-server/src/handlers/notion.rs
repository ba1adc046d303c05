//! Notion API endpoints.
//!
//! `/api/notion/list` populates the Notion menu; `/api/notion?id=`
//! returns one page as raw blocks plus a pre-rendered HTML body whose
//! heading ids match the returned outline.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use shelf_notion::render::{heading_ids_for, render_blocks};
use shelf_notion::{Block, PageSummary};

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/notion/list.
#[derive(Serialize)]
pub(crate) struct NotionListResponse {
    /// Menu entries (live database or the demo set).
    items: Vec<PageSummary>,
}

/// Handle GET /api/notion/list.
///
/// Never fails: unconfigured credentials or remote errors fall back to
/// the built-in demo set inside the adapter.
pub(crate) async fn list_notion(State(state): State<Arc<AppState>>) -> Json<NotionListResponse> {
    let items = state.site.notion_summaries();
    Json(NotionListResponse { items })
}

/// Query parameters for GET /api/notion.
#[derive(Deserialize)]
pub(crate) struct NotionPageQuery {
    /// Page id; defaults to the first demo page.
    id: Option<String>,
}

/// Response for GET /api/notion.
#[derive(Serialize)]
pub(crate) struct NotionPageResponse {
    /// Page id.
    id: String,
    /// Page title.
    title: String,
    /// Page tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    /// Raw block sequence.
    blocks: Vec<Block>,
    /// Pre-rendered HTML with anchor ids assigned in block order.
    content: String,
    /// Anchor ids, one per heading block, in document order.
    #[serde(rename = "headingIds")]
    heading_ids: Vec<String>,
}

/// Handle GET /api/notion.
pub(crate) async fn get_notion_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NotionPageQuery>,
) -> Result<Json<NotionPageResponse>, ServerError> {
    let id = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or("demo1");

    let page = state
        .site
        .notion_page(id)
        .ok_or_else(|| ServerError::NotFound(format!("Notion page {id}")))?;

    let heading_ids = heading_ids_for(&page.blocks);
    let content = render_blocks(&page.blocks, &heading_ids);

    Ok(Json(NotionPageResponse {
        id: page.id,
        title: page.title,
        tags: page.tags,
        blocks: page.blocks,
        content,
        heading_ids,
    }))
}
