//! Application state.
//!
//! Shared state for all request handlers. Everything here is immutable
//! after startup; request data is rebuilt per call.

use shelf_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Site façade (content directory + Notion adapter).
    pub(crate) site: Site,
    /// Enable verbose output (log render warnings).
    pub(crate) verbose: bool,
    /// Application version for ETag generation.
    pub(crate) version: String,
}
