//! Tests for Safe transaction encoding

use std::str::FromStr;

use ethers::types::{Address, Bytes};
use serde_json::json;

use safe_agent_server::blockchain::{
    models::{MetaTransaction, SignMethod, SignRequest, ToolError},
    services::transactions::{
        add_owner_data, add_owner_selector, add_owner_transaction, encode_add_owner, null_call,
    },
};

const SAFE: &str = "0x1111111111111111111111111111111111111111";
const RECOVERY: &str = "0xffffffffffffffffffffffffffffffffffffffff";

#[test]
fn test_add_owner_selector() {
    assert_eq!(add_owner_selector(), [0x0d, 0x58, 0x2f, 0x13]);
}

#[test]
fn test_add_owner_golden_value() {
    let data = encode_add_owner(RECOVERY).unwrap();
    let expected = format!(
        "0x0d582f13{}{}{}",
        "0".repeat(24),
        "f".repeat(40),
        format!("{}1", "0".repeat(63))
    );
    assert_eq!(serde_json::to_value(&data).unwrap(), json!(expected));
    assert_eq!(data.len(), 4 + 32 + 32);
}

#[test]
fn test_add_owner_layout() {
    let owner = Address::from_str("0x8d99F8b2710e6A3B94d9bf465A98E5273069aCBd").unwrap();
    let data = add_owner_data(owner);

    assert_eq!(&data[..4], &add_owner_selector());
    assert!(data[4..16].iter().all(|b| *b == 0));
    assert_eq!(&data[16..36], owner.as_bytes());
    assert!(data[36..67].iter().all(|b| *b == 0));
    assert_eq!(data[67], 1);
}

#[test]
fn test_add_owner_is_deterministic_and_case_insensitive() {
    let lower = encode_add_owner("0x8d99f8b2710e6a3b94d9bf465a98e5273069acbd").unwrap();
    let mixed = encode_add_owner("0x8d99F8b2710e6A3B94d9bf465A98E5273069aCBd").unwrap();
    assert_eq!(lower, mixed);
    assert_eq!(lower, encode_add_owner("0x8d99f8b2710e6a3b94d9bf465a98e5273069acbd").unwrap());
}

#[test]
fn test_add_owner_rejects_malformed_address() {
    for bad in ["", "0x1234", "ffffffffffffffffffffffffffffffffffffffff", "0xzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"] {
        assert!(
            matches!(encode_add_owner(bad), Err(ToolError::Encoding(_))),
            "expected encoding error for {:?}",
            bad
        );
    }
}

#[test]
fn test_null_call() {
    let tx = null_call();
    assert_eq!(tx.to, Address::zero());
    assert_eq!(tx.value, "0x00");
    assert_eq!(tx.data, Bytes::default());
    assert_eq!(
        serde_json::to_value(&tx).unwrap(),
        json!({
            "to": "0x0000000000000000000000000000000000000000",
            "value": "0x00",
            "data": "0x"
        })
    );
}

#[test]
fn test_add_owner_transaction_targets_safe() {
    let safe = Address::from_str(SAFE).unwrap();
    let recovery = Address::from_str(RECOVERY).unwrap();
    let tx = add_owner_transaction(safe, recovery);

    assert_eq!(tx.to, safe);
    assert_eq!(tx.value, "0");
    assert_eq!(tx.data, encode_add_owner(RECOVERY).unwrap());
}

#[test]
fn test_sign_request_shape() {
    let request = SignRequest::send_transaction(100, vec![null_call()]);
    assert_eq!(request.method, SignMethod::EthSendTransaction);
    assert_eq!(request.transactions(), &[null_call()]);

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["method"], "eth_sendTransaction");
    assert_eq!(value["chainId"], 100);
    assert_eq!(value["params"][0]["data"], "0x");

    let parsed: SignRequest = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, request);
}

#[test]
fn test_meta_transaction_serializes_checksummed_target() {
    let tx = MetaTransaction {
        to: Address::from_str("0x54f08c27e75bea0cdddb8aa9d69fd61551b19bba").unwrap(),
        value: "0".to_string(),
        data: Bytes::from(vec![0xd0, 0xe3, 0x0d, 0xb0]),
    };
    let value = serde_json::to_value(&tx).unwrap();
    assert_eq!(value["to"], "0x54F08c27e75BeA0cdDdb8aA9D69FD61551B19BbA");
    assert_eq!(value["data"], "0xd0e30db0");
}
