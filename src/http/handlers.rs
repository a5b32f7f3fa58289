//! Axum HTTP handlers for the web server
//!
//! Provides the primary Model Context Protocol endpoint and the
//! health/debug side channels.

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::cache::CacheStatus;
use crate::mcp::rpc::json_rpc_error;
use crate::mcp::server::handle_json_rpc_value;
use crate::mcp::session::SessionConfig;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub server: &'static str,
    pub cached: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, cached) = match state.cache.status().await {
        CacheStatus::Uninitialized => ("ok", "uninitialized"),
        CacheStatus::Ready => ("ok", "ready"),
        CacheStatus::Failed => ("degraded", "error"),
    };

    Json(HealthResponse {
        status,
        server: env!("CARGO_PKG_NAME"),
        cached,
    })
}

pub async fn debug() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "mcp": "/mcp",
            "health": "/health",
            "debug": "/debug",
        },
        "tools": ["get_latest_launch", "get_upcoming_launches", "get_company_info"],
        "generated_at_utc": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

pub async fn mcp_endpoint(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let session = SessionConfig::from_query(query.as_deref().unwrap_or(""));
    if session.api_key().is_some() {
        // Keys are observed for diagnostics only, never validated.
        info!(api_key = "[REDACTED]", "client supplied an api key");
    }

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json_rpc_error(None, -32700, "Parse error")),
            )
                .into_response()
        }
    };

    match handle_json_rpc_value(&state, payload).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

pub async fn delete_mcp() -> Json<Value> {
    Json(json!({"status": "acknowledged"}))
}

pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response()
}
