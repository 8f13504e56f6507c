// src/config.rs

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::warn;

const DEFAULT_PLUGIN_URL: &str = "https://near-safe-agent.vercel.app";

/// How add-recovery treats a Safe that has no contract code yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UndeployedOwnerPolicy {
    /// A counterfactual Safe has no owners worth checking; encode directly.
    #[default]
    AssumeNoOwners,
    /// Ask the indexing service anyway. Missing data still lets encoding proceed.
    QueryIndexer,
}

impl FromStr for UndeployedOwnerPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "assume-no-owners" => Ok(Self::AssumeNoOwners),
            "query-indexer" => Ok(Self::QueryIndexer),
            other => Err(anyhow!(
                "unknown policy '{}', expected assume-no-owners or query-indexer",
                other
            )),
        }
    }
}

impl fmt::Display for UndeployedOwnerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssumeNoOwners => f.write_str("assume-no-owners"),
            Self::QueryIndexer => f.write_str("query-indexer"),
        }
    }
}

// A struct to hold all configuration, loaded once at startup from the .env file.
#[derive(Clone, Debug)]
pub struct Config {
    // Server settings
    pub port: u16,
    pub bind_address: IpAddr,

    /// JSON-RPC endpoint per chain id, overriding the registry's public default
    pub chain_rpc_urls: HashMap<u64, String>,
    /// Safe Transaction Service base URL per chain id, overriding the registry
    pub tx_service_urls: HashMap<u64, String>,
    pub http_timeout_secs: u64,

    // Agent manifest
    pub plugin_url: String,
    pub account_id: Option<String>,

    // Request handling
    pub require_metadata: bool,
    pub undeployed_owner_policy: UndeployedOwnerPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: IpAddr::from([127, 0, 0, 1]),
            chain_rpc_urls: HashMap::new(),
            tx_service_urls: HashMap::new(),
            http_timeout_secs: 10,
            plugin_url: DEFAULT_PLUGIN_URL.to_string(),
            account_id: None,
            require_metadata: false,
            undeployed_owner_policy: UndeployedOwnerPolicy::default(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct BitteKey {
    account_id: Option<String>,
}

#[derive(Deserialize, Default)]
struct BitteConfig {
    url: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();

        let chain_rpc_urls = json_env("CHAIN_RPC_URLS")
            .context("CHAIN_RPC_URLS must be a JSON map of chain_id -> RPC URL")?
            .unwrap_or_default();
        let tx_service_urls = json_env("TX_SERVICE_URLS")
            .context("TX_SERVICE_URLS must be a JSON map of chain_id -> service URL")?
            .unwrap_or_default();

        let bitte_key: BitteKey = json_env("BITTE_KEY")
            .context("Invalid BITTE_KEY JSON format")?
            .unwrap_or_default();
        if bitte_key.account_id.is_none() {
            warn!("no account: BITTE_KEY carries no accountId");
        }
        let bitte_config: BitteConfig = json_env("BITTE_CONFIG")
            .context("Invalid BITTE_CONFIG JSON format")?
            .unwrap_or_default();
        let plugin_url = env::var("PLUGIN_URL")
            .ok()
            .or(bitte_config.url)
            .unwrap_or_else(|| DEFAULT_PLUGIN_URL.to_string());

        Ok(Config {
            // Server settings
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "127.0.0.1".to_string())
                .parse()
                .context("BIND_ADDRESS must be a valid IP address")?,

            chain_rpc_urls,
            tx_service_urls,
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("HTTP_TIMEOUT_SECS must be a valid number")?,

            plugin_url: plugin_url.trim_end_matches('/').to_string(),
            account_id: bitte_key.account_id,

            require_metadata: env::var("REQUIRE_METADATA")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            undeployed_owner_policy: env::var("UNDEPLOYED_OWNER_POLICY")
                .ok()
                .map(|v| v.parse())
                .transpose()
                .context("Invalid UNDEPLOYED_OWNER_POLICY")?
                .unwrap_or_default(),
        })
    }
}

// Reads an optional JSON-encoded variable.
fn json_env<T: serde::de::DeserializeOwned>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
        _ => Ok(None),
    }
}
