//! # API Module
//!
//! HTTP handlers for the Safe agent server. Every tool endpoint is a
//! read-only `GET` that answers with a [`ToolResponse`]: a sign request for
//! the client wallet plus display metadata.
//!
//! ## Available Endpoints
//!
//! - `GET /` and `GET /.well-known/ai-plugin.json` - agent plugin manifest
//! - `GET /health` - liveness check
//! - `GET /tools/safe/deploy?chainId&safeAddress` - deploy a counterfactual Safe
//! - `GET /tools/safe/add_recovery?chainId&safeAddress&recoveryAddress` - add a recovery owner

pub mod auth;
pub mod health;
pub mod manifest;
pub mod safe;

use std::future::Future;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use crate::{
    blockchain::models::{ToolError, ToolResponse},
    AppState,
};
use auth::{validate_request, Caller};

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Runs one tool call: header validation first, then `compute`, then the
/// uniform success/error mapping.
pub async fn handle_tool<F, Fut>(
    state: &AppState,
    headers: &HeaderMap,
    tool: &str,
    compute: F,
) -> Response
where
    F: FnOnce(Caller) -> Fut,
    Fut: Future<Output = Result<ToolResponse, ToolError>>,
{
    let caller = match validate_request(headers, &state.config) {
        Ok(caller) => caller,
        Err(early) => return early.into_response(),
    };

    match compute(caller).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("{} failed: {}", tool, e);
            e.into_response()
        }
    }
}

/// Builds the full application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(manifest::manifest_handler))
        .route("/.well-known/ai-plugin.json", get(manifest::manifest_handler))
        .route("/health", get(health::health_handler))
        .merge(safe::create_safe_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
