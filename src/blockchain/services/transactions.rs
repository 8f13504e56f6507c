//! Network-free encoding of Safe transactions.

use ethers::types::{Address, Bytes};
use ethers_core::abi::{encode, Token};
use ethers_core::types::U256;
use ethers_core::utils::id;

use crate::blockchain::models::{MetaTransaction, ToolError};

/// Safe owner-manager entry point used for recovery addresses.
pub const ADD_OWNER_WITH_THRESHOLD: &str = "addOwnerWithThreshold(address,uint256)";

/// Threshold kept when a recovery owner is added.
pub const RECOVERY_THRESHOLD: u64 = 1;

/// 4-byte selector of `addOwnerWithThreshold(address,uint256)`: `0x0d582f13`.
pub fn add_owner_selector() -> [u8; 4] {
    id(ADD_OWNER_WITH_THRESHOLD)
}

/// Call data adding `new_owner` to a Safe while keeping the threshold at 1.
pub fn add_owner_data(new_owner: Address) -> Bytes {
    let mut data = add_owner_selector().to_vec();
    data.extend(encode(&[
        Token::Address(new_owner),
        Token::Uint(U256::from(RECOVERY_THRESHOLD)),
    ]));
    Bytes::from(data)
}

/// String-input variant of [`add_owner_data`]; rejects malformed addresses
/// before any encoding happens.
pub fn encode_add_owner(new_owner: &str) -> Result<Bytes, ToolError> {
    let owner = crate::utils::parse_address("newOwner", new_owner)
        .map_err(|e| ToolError::Encoding(e.to_string()))?;
    Ok(add_owner_data(owner))
}

/// Zero-effect call. Executed through a counterfactual Safe it triggers the
/// Safe's deployment.
pub fn null_call() -> MetaTransaction {
    MetaTransaction {
        to: Address::zero(),
        value: "0x00".to_string(),
        data: Bytes::default(),
    }
}

/// Meta transaction calling `addOwnerWithThreshold` on the Safe itself.
pub fn add_owner_transaction(safe: Address, new_owner: Address) -> MetaTransaction {
    MetaTransaction {
        to: safe,
        value: "0".to_string(),
        data: add_owner_data(new_owner),
    }
}
