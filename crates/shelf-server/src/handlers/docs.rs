//! Document API endpoints.
//!
//! Resolves slug paths to rendered documents and returns JSON with
//! metadata, tags, the heading outline, and HTML content. Bare roots
//! (no remaining slug) redirect to the first document in depth-first
//! tree order.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::Serialize;
use shelf_render::{Heading, SourceKind};
use shelf_site::{SiteDoc, nav};

use crate::error::ServerError;
use crate::handlers::split_slug;
use crate::state::AppState;

/// Response for GET /api/docs/{path}.
#[derive(Serialize)]
struct DocResponse {
    /// Document metadata.
    meta: DocMeta,
    /// Document tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    /// Full heading outline in document order.
    toc: Vec<Heading>,
    /// Anchor nav entries (depths 2-3 only).
    anchors: Vec<Heading>,
    /// Rendered HTML content.
    content: String,
}

/// Document metadata.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocMeta {
    /// Resolved title.
    title: String,
    /// URL path with leading slash.
    path: String,
    /// Content source kind.
    source: SourceKind,
    /// Source file path (absent for Notion documents).
    #[serde(skip_serializing_if = "Option::is_none")]
    source_file: Option<String>,
    /// Last modification time, ISO 8601 (absent for Notion documents).
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<String>,
}

/// Handle GET /api/docs (no slug): redirect to the first document.
pub(crate) async fn get_root_doc(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    redirect_to_first_leaf(&state)
}

/// Handle GET /api/docs/{*path}.
pub(crate) async fn get_doc(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let segments = split_slug(&path);
    if segments.is_empty() {
        return redirect_to_first_leaf(&state);
    }

    if let Some(doc) = state.site.get_doc(&segments)? {
        return Ok(doc_response(&state, &segments, doc, &headers));
    }

    // A bare category (directory with no index document) redirects to
    // its first document instead of 404ing.
    if segments.len() == 1 && state.site.content_dir().join(&segments[0]).is_dir() {
        if let Some(slug) = state.site.first_doc_slug_in_category(&segments[0])? {
            return Ok(Redirect::temporary(&api_doc_path(&slug)).into_response());
        }
    }

    Err(ServerError::NotFound(format!(
        "document {}",
        segments.join("/")
    )))
}

/// Redirect to the first depth-first document, or 404 on an empty tree.
fn redirect_to_first_leaf(state: &AppState) -> Result<Response, ServerError> {
    match state.site.first_doc_slug()? {
        Some(slug) => Ok(Redirect::temporary(&api_doc_path(&slug)).into_response()),
        None => Err(ServerError::NotFound(
            "no documents in content tree".to_owned(),
        )),
    }
}

/// API path for a document slug, with percent-encoded segments.
fn api_doc_path(slug: &[String]) -> String {
    format!("/api/docs/{}", nav::encode_slug(slug))
}

/// Build the JSON response for a rendered document.
fn doc_response(state: &AppState, segments: &[String], doc: SiteDoc, headers: &HeaderMap) -> Response {
    if state.verbose {
        tracing::info!(path = %segments.join("/"), title = %doc.data.title, "Rendered document");
    }

    let etag = compute_etag(&state.version, &doc.data.html);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    let last_modified: Option<DateTime<Utc>> = doc.modified.map(Into::into);
    let anchors: Vec<Heading> = nav::anchor_outline(&doc.data.headings)
        .into_iter()
        .cloned()
        .collect();

    let body = DocResponse {
        meta: DocMeta {
            title: doc.data.title.clone(),
            path: format!("/{}", segments.join("/")),
            source: doc.data.source,
            source_file: doc.source_path.as_ref().map(|p| p.display().to_string()),
            last_modified: last_modified.map(|t| t.to_rfc3339()),
        },
        tags: doc.data.tags.clone(),
        toc: doc.data.headings.clone(),
        anchors,
        content: doc.data.html,
    };

    let mut response = Json(body).into_response();
    set_header(&mut response, header::ETAG, &etag);
    if let Some(last_modified) = last_modified {
        set_header(
            &mut response,
            header::LAST_MODIFIED,
            &last_modified
                .format("%a, %d %b %Y %H:%M:%S GMT")
                .to_string(),
        );
        set_header(&mut response, header::CACHE_CONTROL, "private, max-age=60");
    }
    response
}

/// Insert a header, skipping values that are not valid header text.
fn set_header(response: &mut Response, name: header::HeaderName, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        response.headers_mut().insert(name, value);
    }
}

/// Compute `ETag` from version and content.
///
/// MD5 truncated to 64 bits (16 hex chars) - sufficient for cache
/// invalidation with negligible collision probability.
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
