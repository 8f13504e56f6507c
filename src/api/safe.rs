// src/api/safe.rs

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Response,
    routing::get,
    Router,
};
use tracing::info;

use crate::{
    api::{auth::Caller, handle_tool},
    blockchain::models::{ToolError, ToolResponse},
    utils::{address_param, chain_id_param, QueryParams},
    AppState,
};

// --- Handlers ---

/// GET /tools/safe/deploy?chainId&safeAddress
pub async fn deploy_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<QueryParams>,
) -> Response {
    info!("safe/deploy {:?}", params);
    handle_tool(&state, &headers, "safe/deploy", |_| deploy(&state, &params)).await
}

/// GET /tools/safe/add_recovery?chainId&safeAddress&recoveryAddress
pub async fn add_recovery_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<QueryParams>,
) -> Response {
    info!("safe/add_recovery {:?}", params);
    handle_tool(&state, &headers, "safe/add_recovery", |caller| {
        add_recovery(&state, &params, caller)
    })
    .await
}

async fn deploy(state: &AppState, params: &QueryParams) -> Result<ToolResponse, ToolError> {
    let chain_id = chain_id_param(params, "chainId")?;
    let safe = address_param(params, "safeAddress")?;
    state.resolver.resolve_deploy(chain_id, safe).await
}

async fn add_recovery(
    state: &AppState,
    params: &QueryParams,
    caller: Caller,
) -> Result<ToolResponse, ToolError> {
    let chain_id = chain_id_param(params, "chainId")?;
    // Agents that omit safeAddress are acting for the connected account.
    let safe = match (params.contains_key("safeAddress"), caller.evm_address) {
        (false, Some(address)) => address,
        _ => address_param(params, "safeAddress")?,
    };
    let recovery = address_param(params, "recoveryAddress")?;
    state
        .resolver
        .resolve_add_recovery(chain_id, safe, recovery)
        .await
}

/// Create the Safe tools router
pub fn create_safe_router() -> Router<AppState> {
    Router::new()
        .route("/tools/safe/deploy", get(deploy_handler))
        .route("/tools/safe/add_recovery", get(add_recovery_handler))
}
