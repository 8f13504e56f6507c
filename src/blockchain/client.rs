//! Reads the current state of a Safe.
//!
//! Deployment is decided by `eth_getCode` against the chain's JSON-RPC node,
//! either the configured one or the registry's public default.
//! Owner data comes from the Safe Transaction Service when one is known for
//! the chain; otherwise the Safe is reported as deployed without owner data.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use ethers::types::Address;
use ethers::utils::to_checksum;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{
    blockchain::{
        chains,
        models::{SafeInfo, ToolError, WalletState},
    },
    config::Config,
};

/// Client for the two external sources of Safe state.
#[derive(Clone)]
pub struct SafeClient {
    http: Client,
    rpc_urls: HashMap<u64, String>,
    tx_service_urls: HashMap<u64, String>,
}

impl SafeClient {
    pub fn new(
        http: Client,
        rpc_urls: HashMap<u64, String>,
        tx_service_urls: HashMap<u64, String>,
    ) -> Self {
        Self {
            http,
            rpc_urls,
            tx_service_urls,
        }
    }

    /// Builds the shared HTTP client with the configured timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(Self::new(
            http,
            config.chain_rpc_urls.clone(),
            config.tx_service_urls.clone(),
        ))
    }

    /// JSON-RPC endpoint: configured override first, then the registry default.
    pub fn rpc_url(&self, chain_id: u64) -> Option<&str> {
        self.rpc_urls
            .get(&chain_id)
            .map(String::as_str)
            .or_else(|| chains::default_rpc_url_for(chain_id))
    }

    /// Transaction Service base URL: configured override first, then the registry.
    pub fn tx_service_url(&self, chain_id: u64) -> Option<String> {
        self.tx_service_urls
            .get(&chain_id)
            .cloned()
            .or_else(|| chains::safe_tx_service_url_for(chain_id))
    }

    /// Checks whether contract code exists at `address`.
    pub async fn is_deployed(&self, address: &Address, chain_id: u64) -> Result<bool, ToolError> {
        let rpc_url = self
            .rpc_url(chain_id)
            .ok_or(ToolError::MissingRpc(chain_id))?;
        let payload = json!({
            "jsonrpc": "2.0",
            "method": "eth_getCode",
            "params": [to_checksum(address, None), "latest"],
            "id": 1
        });

        let res = self
            .http
            .post(rpc_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ToolError::Rpc(e.to_string()))?;
        let status = res.status();
        if !status.is_success() {
            return Err(ToolError::Rpc(format!(
                "eth_getCode returned {}",
                status_text(status)
            )));
        }
        let body: Value = res.json().await.map_err(|e| ToolError::Rpc(e.to_string()))?;
        if let Some(error) = body.get("error") {
            let message = error["message"].as_str().unwrap_or("unknown error");
            return Err(ToolError::Rpc(message.to_string()));
        }
        let code = body["result"]
            .as_str()
            .ok_or_else(|| ToolError::Rpc(format!("RPC response missing 'result' field: {}", body)))?;

        let deployed = !matches!(code, "" | "0x" | "0x0");
        debug!("eth_getCode {:?} on chain {}: deployed={}", address, chain_id, deployed);
        Ok(deployed)
    }

    /// Fetches owner and configuration data for a deployed Safe.
    ///
    /// Returns `Ok(None)` when no Transaction Service is known for the chain.
    /// Any non-success response is a [`ToolError::RemoteService`].
    pub async fn get_safe_info(
        &self,
        address: &Address,
        chain_id: u64,
    ) -> Result<Option<SafeInfo>, ToolError> {
        match self.query_tx_service(address, chain_id).await? {
            None => Ok(None),
            Some(res) if res.status().is_success() => decode_safe_info(res).await.map(Some),
            Some(res) => Err(fetch_failed(res.status())),
        }
    }

    /// Like [`get_safe_info`](Self::get_safe_info) but a Safe the service has
    /// never seen (404) is reported as `Ok(None)` instead of an error.
    pub async fn lookup_safe_info(
        &self,
        address: &Address,
        chain_id: u64,
    ) -> Result<Option<SafeInfo>, ToolError> {
        match self.query_tx_service(address, chain_id).await? {
            None => Ok(None),
            Some(res) if res.status() == StatusCode::NOT_FOUND => Ok(None),
            Some(res) if res.status().is_success() => decode_safe_info(res).await.map(Some),
            Some(res) => Err(fetch_failed(res.status())),
        }
    }

    /// Deployment status, enriched with owner data when available.
    pub async fn get_wallet_state(
        &self,
        address: &Address,
        chain_id: u64,
    ) -> Result<WalletState, ToolError> {
        if !self.is_deployed(address, chain_id).await? {
            return Ok(WalletState::Undeployed);
        }
        let info = self.get_safe_info(address, chain_id).await?;
        Ok(WalletState::Deployed(info))
    }

    async fn query_tx_service(
        &self,
        address: &Address,
        chain_id: u64,
    ) -> Result<Option<reqwest::Response>, ToolError> {
        let Some(base_url) = self.tx_service_url(chain_id) else {
            warn!(
                "No Safe Transaction Service for chainId={}, skipping owner lookup",
                chain_id
            );
            return Ok(None);
        };
        let url = format!(
            "{}/api/v1/safes/{}/",
            base_url.trim_end_matches('/'),
            to_checksum(address, None)
        );
        debug!("Fetching Safe info from {}", url);

        let res = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ToolError::RemoteService(format!("Failed to fetch Safe wallet info: {}", e)))?;
        Ok(Some(res))
    }
}

async fn decode_safe_info(res: reqwest::Response) -> Result<SafeInfo, ToolError> {
    res.json::<SafeInfo>()
        .await
        .map_err(|e| ToolError::RemoteService(format!("Malformed Safe wallet info: {}", e)))
}

fn fetch_failed(status: StatusCode) -> ToolError {
    ToolError::RemoteService(format!(
        "Failed to fetch Safe wallet info: {}",
        status_text(status)
    ))
}

fn status_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Status")
}
