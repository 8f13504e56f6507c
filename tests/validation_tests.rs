//! Tests for query parameter parsing and header validation

use axum::http::{HeaderMap, HeaderValue, StatusCode};
use ethers::types::Address;
use std::str::FromStr;

use safe_agent_server::{
    api::auth::{validate_request, METADATA_HEADER},
    blockchain::models::ToolError,
    config::{Config, UndeployedOwnerPolicy},
    utils::{address_param, chain_id_param, parse_address, QueryParams},
};

fn params(pairs: &[(&str, &str)]) -> QueryParams {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_chain_id_param() {
    assert_eq!(chain_id_param(&params(&[("chainId", "11155111")]), "chainId").unwrap(), 11155111);

    for bad in [vec![], vec![("chainId", "")], vec![("chainId", "abc")], vec![("chainId", "0")], vec![("chainId", "-1")]] {
        let err = chain_id_param(&params(&bad), "chainId").unwrap_err();
        assert!(matches!(err, ToolError::Validation { field: "chainId", .. }));
        assert!(err.to_string().contains("chainId"));
    }
}

#[test]
fn test_address_param() {
    let parsed = address_param(
        &params(&[("safeAddress", "0x54f08c27e75bea0cdddb8aa9d69fd61551b19bba")]),
        "safeAddress",
    )
    .unwrap();
    assert_eq!(
        parsed,
        Address::from_str("0x54F08c27e75BeA0cdDdb8aA9D69FD61551B19BbA").unwrap()
    );

    let missing = address_param(&params(&[]), "safeAddress").unwrap_err();
    assert_eq!(
        missing.to_string(),
        "Missing or invalid required parameter 'safeAddress': missing"
    );
}

#[test]
fn test_parse_address_rejects_malformed() {
    for bad in [
        "54f08c27e75bea0cdddb8aa9d69fd61551b19bba",
        "0x54f08c27e75bea0cdddb8aa9d69fd61551b19b",
        "0x54f08c27e75bea0cdddb8aa9d69fd61551b19bbaff",
        "0xg4f08c27e75bea0cdddb8aa9d69fd61551b19bba",
    ] {
        assert!(parse_address("recoveryAddress", bad).is_err(), "{}", bad);
    }
}

#[test]
fn test_policy_from_str() {
    assert_eq!(
        "query-indexer".parse::<UndeployedOwnerPolicy>().unwrap(),
        UndeployedOwnerPolicy::QueryIndexer
    );
    assert_eq!(
        "Assume-No-Owners".parse::<UndeployedOwnerPolicy>().unwrap(),
        UndeployedOwnerPolicy::AssumeNoOwners
    );
    assert!("sometimes".parse::<UndeployedOwnerPolicy>().is_err());
}

#[test]
fn test_metadata_optional_by_default() {
    let caller = validate_request(&HeaderMap::new(), &Config::default()).unwrap();
    assert_eq!(caller.account_id, None);
    assert_eq!(caller.evm_address, None);
}

#[test]
fn test_metadata_required() {
    let config = Config {
        require_metadata: true,
        ..Config::default()
    };

    let early = validate_request(&HeaderMap::new(), &config).unwrap_err();
    assert_eq!(early.status, StatusCode::BAD_REQUEST);
    assert!(early.body["error"].as_str().unwrap().contains(METADATA_HEADER));

    let mut headers = HeaderMap::new();
    headers.insert(METADATA_HEADER, HeaderValue::from_static("{\"evmAddress\":\"0x1111111111111111111111111111111111111111\"}"));
    let early = validate_request(&headers, &config).unwrap_err();
    assert!(early.body["error"].as_str().unwrap().contains("accountId"));

    headers.insert(
        METADATA_HEADER,
        HeaderValue::from_static("{\"accountId\":\"alice.near\",\"evmAddress\":\"0x1111111111111111111111111111111111111111\"}"),
    );
    let caller = validate_request(&headers, &config).unwrap();
    assert_eq!(caller.account_id.as_deref(), Some("alice.near"));
    assert_eq!(
        caller.evm_address,
        Some(Address::from_str("0x1111111111111111111111111111111111111111").unwrap())
    );
}

#[test]
fn test_unreadable_metadata_ignored_when_optional() {
    let mut headers = HeaderMap::new();
    headers.insert(METADATA_HEADER, HeaderValue::from_static("not json"));
    assert!(validate_request(&headers, &Config::default()).is_ok());

    let config = Config {
        require_metadata: true,
        ..Config::default()
    };
    assert!(validate_request(&headers, &config).is_err());
}
