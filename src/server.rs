//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::models::AppConfig;
use crate::services::{InMemoryImageStore, MatchService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<InMemoryImageStore>,
    pub service: Arc<MatchService>,
}

impl FromRef<AppState> for Arc<InMemoryImageStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<MatchService> {
    fn from_ref(state: &AppState) -> Self {
        state.service.clone()
    }
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: AppConfig) -> AppState {
    let service = Arc::new(MatchService::new(&config));
    let store = Arc::new(InMemoryImageStore::with_capacity(config.limits.max_images));
    AppState {
        config: Arc::new(config),
        store,
        service,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.limits.max_image_bytes;

    Router::new()
        .route("/api/images", post(api::handle_upload))
        .route("/api/images/:id", get(api::handle_get_image))
        .route("/api/images/:id/match", post(api::handle_match))
        .route("/api/images/:id/region", post(api::handle_region))
        .route("/api/images/:id/annotate", post(api::handle_annotate))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}
