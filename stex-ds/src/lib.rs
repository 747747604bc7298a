//! stex-ds library - Statement extraction dispatch service
//!
//! Receives a statement file and a bank key over HTTP, resolves the key to
//! a registered extractor, runs it against a request-scoped temp copy of
//! the file, and returns the extracted transaction table.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod dispatch;
pub mod extractors;
pub mod registry;
pub mod staging;

use registry::ExtractorRegistry;
use staging::StagingArea;

/// Maximum accepted upload size (25 MiB)
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Extractor registry, read-only after startup
    pub registry: Arc<ExtractorRegistry>,
    /// Staging area for request-scoped upload copies
    pub staging: Arc<StagingArea>,
}

impl AppState {
    /// Create new application state
    pub fn new(registry: ExtractorRegistry, staging: StagingArea) -> Self {
        Self {
            registry: Arc::new(registry),
            staging: Arc::new(staging),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/extractors", get(api::list_extractors))
        .route("/extract", post(api::extract_statement))
        .route("/build_info", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // Enable CORS for browser callers on other origins
        .layer(CorsLayer::permissive())
        .with_state(state)
}
