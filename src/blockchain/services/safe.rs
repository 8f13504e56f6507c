//! Turns Safe intents into sign requests, skipping intents that are already
//! satisfied on-chain.

use ethers::types::Address;
use ethers::utils::to_checksum;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::{
    blockchain::{
        chains::{safe_settings_url, safe_url},
        client::SafeClient,
        models::{SafeInfo, SignRequest, ToolError, ToolResponse, WalletState},
        services::transactions::{add_owner_transaction, null_call},
    },
    config::UndeployedOwnerPolicy,
};

#[derive(Clone)]
pub struct SafeResolver {
    client: SafeClient,
    policy: UndeployedOwnerPolicy,
}

impl SafeResolver {
    pub fn new(client: SafeClient, policy: UndeployedOwnerPolicy) -> Self {
        Self { client, policy }
    }

    /// Null transaction whose execution deploys a counterfactual Safe, or
    /// nothing when the Safe already has code.
    pub async fn resolve_deploy(&self, chain_id: u64, safe: Address) -> Result<ToolResponse, ToolError> {
        let url = safe_url(&safe, chain_id);

        if self.client.is_deployed(&safe, chain_id).await? {
            info!("Safe {:?} already deployed on chain {}", safe, chain_id);
            return Ok(ToolResponse::satisfied(meta([
                (
                    "message",
                    json!(format!("Safe Already Deployed. See here: {}", url)),
                ),
                ("safeUrl", json!(url)),
            ])));
        }

        let transaction = SignRequest::send_transaction(chain_id, vec![null_call()]);
        Ok(ToolResponse::sign(transaction, meta([("safeUrl", json!(url))])))
    }

    /// `addOwnerWithThreshold(recovery, 1)` on the Safe, unless `recovery` is
    /// already a known owner.
    ///
    /// Missing owner data never blocks encoding: an unreachable or unknown
    /// indexing service means the transaction is built anyway.
    pub async fn resolve_add_recovery(
        &self,
        chain_id: u64,
        safe: Address,
        recovery: Address,
    ) -> Result<ToolResponse, ToolError> {
        let url = safe_settings_url(&safe, chain_id);

        let owners = self.owner_data(&safe, chain_id).await?;
        if owners.as_ref().is_some_and(|info| info.is_owner(&recovery)) {
            info!("{:?} is already an owner of {:?}", recovery, safe);
            let reason = format!(
                "{} is already an owner of {}",
                to_checksum(&recovery, None),
                to_checksum(&safe, None)
            );
            return Ok(ToolResponse::no_op(
                meta([
                    ("message", json!(format!("{}. See here: {}", reason, url))),
                    ("safeUrl", json!(url)),
                ]),
                reason,
            ));
        }

        let transaction = SignRequest::send_transaction(
            chain_id,
            vec![add_owner_transaction(safe, recovery)],
        );
        Ok(ToolResponse::sign(transaction, meta([("safeUrl", json!(url))])))
    }

    async fn owner_data(&self, safe: &Address, chain_id: u64) -> Result<Option<SafeInfo>, ToolError> {
        match self.client.get_wallet_state(safe, chain_id).await? {
            WalletState::Deployed(info) => Ok(info),
            WalletState::Undeployed => match self.policy {
                UndeployedOwnerPolicy::AssumeNoOwners => Ok(None),
                UndeployedOwnerPolicy::QueryIndexer => {
                    self.client.lookup_safe_info(safe, chain_id).await
                }
            },
        }
    }
}

fn meta<const N: usize>(entries: [(&str, Value); N]) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
