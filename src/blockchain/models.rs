// src/blockchain/models.rs
use ethers::types::{Address, Bytes};
use ethers::utils::to_checksum;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

// --- Error types for tool operations ---

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Missing or invalid required parameter '{field}': {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("Unsupported chainId={0}")]
    UnsupportedChain(u64),
    #[error("No RPC endpoint configured for chainId={0}")]
    MissingRpc(u64),
    #[error("{0}")]
    RemoteService(String),
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl ToolError {
    pub fn missing(field: &'static str) -> Self {
        ToolError::Validation {
            field,
            reason: "missing".to_string(),
        }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ToolError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

// --- Signing Models ---

/// Signing methods a client wallet understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignMethod {
    #[serde(rename = "eth_sign")]
    EthSign,
    #[serde(rename = "personal_sign")]
    PersonalSign,
    #[serde(rename = "eth_sendTransaction")]
    EthSendTransaction,
    #[serde(rename = "eth_signTypedData")]
    EthSignTypedData,
    #[serde(rename = "eth_signTypedData_v4")]
    EthSignTypedDataV4,
}

/// One atomic on-chain call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTransaction {
    /// Target address, serialized in EIP-55 checksum form
    #[serde(serialize_with = "serialize_checksummed")]
    pub to: Address,
    /// Amount in the smallest unit, as a decimal or `0x` hex string
    pub value: String,
    /// Call payload; always `0x`-prefixed, even-length hex
    pub data: Bytes,
}

/// Method dependent parameters of a [`SignRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignParams {
    Transactions(Vec<MetaTransaction>),
    Message(Vec<String>),
}

/// Chain-agnostic description of what an external signer should sign or execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    pub method: SignMethod,
    pub chain_id: u64,
    pub params: SignParams,
}

impl SignRequest {
    /// Wraps a batch of meta transactions into an `eth_sendTransaction` request.
    pub fn send_transaction(chain_id: u64, transactions: Vec<MetaTransaction>) -> Self {
        Self {
            method: SignMethod::EthSendTransaction,
            chain_id,
            params: SignParams::Transactions(transactions),
        }
    }

    pub fn transactions(&self) -> &[MetaTransaction] {
        match &self.params {
            SignParams::Transactions(txs) => txs,
            SignParams::Message(_) => &[],
        }
    }
}

// --- Safe State Models ---

/// Snapshot of a Safe as reported by the Safe Transaction Service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeInfo {
    pub address: Address,
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub nonce: u64,
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub threshold: u64,
    pub owners: Vec<Address>,
    #[serde(default)]
    pub master_copy: Option<Address>,
    #[serde(default)]
    pub modules: Vec<Address>,
    #[serde(default)]
    pub fallback_handler: Option<Address>,
    #[serde(default)]
    pub guard: Option<Address>,
    #[serde(default)]
    pub version: Option<String>,
}

impl SafeInfo {
    pub fn is_owner(&self, address: &Address) -> bool {
        self.owners.iter().any(|owner| owner == address)
    }
}

/// Deployment status of a Safe on one chain, fetched fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletState {
    Undeployed,
    /// Contract code exists. `None` when no indexing service could describe it.
    Deployed(Option<SafeInfo>),
}

impl WalletState {
    pub fn is_deployed(&self) -> bool {
        matches!(self, WalletState::Deployed(_))
    }

    pub fn info(&self) -> Option<&SafeInfo> {
        match self {
            WalletState::Deployed(info) => info.as_ref(),
            WalletState::Undeployed => None,
        }
    }
}

// --- Tool Response ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToolStatus {
    #[serde(rename = "no-op")]
    NoOp,
}

/// Body returned by every tool endpoint. A `None` transaction means the
/// intent is already satisfied on-chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse {
    pub transaction: Option<SignRequest>,
    pub meta: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ToolStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResponse {
    pub fn sign(transaction: SignRequest, meta: Map<String, Value>) -> Self {
        Self {
            transaction: Some(transaction),
            meta,
            status: None,
            error: None,
        }
    }

    pub fn satisfied(meta: Map<String, Value>) -> Self {
        Self {
            transaction: None,
            meta,
            status: None,
            error: None,
        }
    }

    pub fn no_op(meta: Map<String, Value>, reason: String) -> Self {
        Self {
            transaction: None,
            meta,
            status: Some(ToolStatus::NoOp),
            error: Some(reason),
        }
    }
}

// --- serde helpers ---

fn serialize_checksummed<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_checksum(address, None))
}

// The transaction service has returned counters both as numbers and as strings.
fn u64_from_number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
