use std::sync::Arc;

use axum::{
    http::Method,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub mod cache;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod launch_api;
pub mod logging;
pub mod mcp;
pub mod stdio;

use cache::ArtifactCache;
use launch_api::LaunchDataProvider;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ArtifactCache>,
    pub launch_provider: Arc<dyn LaunchDataProvider>,
}

impl AppState {
    pub fn new(cache: Arc<ArtifactCache>, launch_provider: Arc<dyn LaunchDataProvider>) -> Self {
        Self {
            cache,
            launch_provider,
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route(
            "/mcp",
            post(http::handlers::mcp_endpoint)
                .delete(http::handlers::delete_mcp)
                .options(http::handlers::preflight),
        )
        .route("/health", get(http::handlers::health))
        .route("/debug", get(http::handlers::debug))
        .fallback(http::handlers::not_found)
        .layer(cors)
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
