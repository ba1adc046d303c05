//! HTTP server for the Shelf notes site.
//!
//! This crate provides a native Rust HTTP server using axum, serving
//! the JSON API the frontend SPA consumes:
//!
//! - `/api/categories` - top-level content directories with counts
//! - `/api/nav` - full navigation tree (local files + Notion group)
//! - `/api/docs/{*slug}` - rendered documents with heading anchors
//! - `/api/notion/list`, `/api/notion?id=` - Notion menu and pages
//!
//! Every request rebuilds its data from the filesystem and the Notion
//! adapter; the shared state is immutable configuration only, so
//! concurrent requests need no coordination.
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (shelf-server)
//!                        │
//!                        ├─► API routes (handlers)
//!                        │       │
//!                        │       └─► Site (scan + resolve + render)
//!                        │               │
//!                        │               ├─► shelf-content (filesystem)
//!                        │               └─► shelf-notion (remote/mock)
//!                        │
//!                        └─► security header middleware
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use shelf_notion::{NotionClient, NotionConfig};
use shelf_site::Site;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content source directory.
    pub source_dir: PathBuf,
    /// Notion adapter configuration.
    pub notion: NotionConfig,
    /// Enable verbose output.
    pub verbose: bool,
    /// Application version (for ETag generation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            source_dir: PathBuf::from("content"),
            notion: NotionConfig::default(),
            verbose: false,
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the server fails to bind or start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let site = Site::new(
        config.source_dir.clone(),
        NotionClient::new(config.notion.clone()),
    );

    let state = Arc::new(AppState {
        site,
        verbose: config.verbose,
        version: config.version.clone(),
    });

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
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Shelf config.
///
/// # Arguments
///
/// * `config` - Loaded application configuration
/// * `version` - Application version
/// * `verbose` - Enable verbose output
#[must_use]
pub fn server_config_from_config(
    config: &shelf_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.content_resolved.source_dir.clone(),
        notion: NotionConfig {
            token: config.notion_resolved.token.clone(),
            database_id: config.notion_resolved.database_id.clone(),
            api_url: config.notion_resolved.api_url.clone(),
        },
        verbose,
        version,
    }
}
