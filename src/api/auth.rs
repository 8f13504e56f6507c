// src/api/auth.rs

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use ethers::types::Address;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{config::Config, utils::parse_address};

/// Header carrying the calling agent's account metadata as JSON.
pub const METADATA_HEADER: &str = "mb-metadata";

/// Identity of the caller as far as the request metadata tells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    pub account_id: Option<String>,
    pub evm_address: Option<Address>,
}

/// A complete response that ends the request before any tool logic runs.
#[derive(Debug)]
pub struct EarlyResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl EarlyResponse {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "error": message.into() }),
        }
    }
}

impl IntoResponse for EarlyResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    account_id: Option<String>,
    evm_address: Option<String>,
}

/// Checks the caller metadata header.
///
/// With `require_metadata` off, a missing or unreadable header yields an
/// anonymous [`Caller`].
pub fn validate_request(headers: &HeaderMap, config: &Config) -> Result<Caller, EarlyResponse> {
    let raw = match headers.get(METADATA_HEADER) {
        Some(value) => value.to_str().ok(),
        None => None,
    };

    let metadata = match raw.map(serde_json::from_str::<Metadata>) {
        Some(Ok(metadata)) => Some(metadata),
        Some(Err(e)) => {
            if config.require_metadata {
                return Err(EarlyResponse::bad_request(format!(
                    "Invalid {} header: {}",
                    METADATA_HEADER, e
                )));
            }
            warn!("Ignoring unreadable {} header: {}", METADATA_HEADER, e);
            None
        }
        None => None,
    };

    let Some(metadata) = metadata else {
        if config.require_metadata {
            return Err(EarlyResponse::bad_request(format!(
                "Missing {} header",
                METADATA_HEADER
            )));
        }
        return Ok(Caller::default());
    };

    let account_id = metadata.account_id.filter(|id| !id.trim().is_empty());
    if config.require_metadata && account_id.is_none() {
        return Err(EarlyResponse::bad_request(format!(
            "Missing accountId in {} header",
            METADATA_HEADER
        )));
    }

    let evm_address = metadata
        .evm_address
        .and_then(|raw| match parse_address("evmAddress", &raw) {
            Ok(address) => Some(address),
            Err(e) => {
                warn!("{}", e);
                None
            }
        });

    debug!("Caller account={:?} evmAddress={:?}", account_id, evm_address);
    Ok(Caller {
        account_id,
        evm_address,
    })
}
