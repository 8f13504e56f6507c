//! Typed parsing of untyped query parameters.

use std::collections::HashMap;

use ethers::types::Address;

use crate::blockchain::models::ToolError;

/// Query string as received by a tool endpoint.
pub type QueryParams = HashMap<String, String>;

/// Helper function to extract a required, non-empty parameter
pub fn required_param<'a>(params: &'a QueryParams, field: &'static str) -> Result<&'a str, ToolError> {
    params
        .get(field)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ToolError::missing(field))
}

/// Parses a positive decimal chain id.
pub fn parse_chain_id(field: &'static str, raw: &str) -> Result<u64, ToolError> {
    let chain_id = raw
        .parse::<u64>()
        .map_err(|_| ToolError::invalid(field, format!("'{}' is not a valid number", raw)))?;
    if chain_id == 0 {
        return Err(ToolError::invalid(field, "must be positive"));
    }
    Ok(chain_id)
}

/// Parses a `0x`-prefixed, 40 hex digit address in any letter case.
pub fn parse_address(field: &'static str, raw: &str) -> Result<Address, ToolError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| ToolError::invalid(field, format!("'{}' must start with 0x", raw)))?;
    if digits.len() != 40 {
        return Err(ToolError::invalid(
            field,
            format!("'{}' must be 20 bytes (40 hex characters)", raw),
        ));
    }
    let bytes = hex::decode(digits)
        .map_err(|e| ToolError::invalid(field, format!("'{}' is not hex: {}", raw, e)))?;
    Ok(Address::from_slice(&bytes))
}

pub fn chain_id_param(params: &QueryParams, field: &'static str) -> Result<u64, ToolError> {
    parse_chain_id(field, required_param(params, field)?)
}

pub fn address_param(params: &QueryParams, field: &'static str) -> Result<Address, ToolError> {
    parse_address(field, required_param(params, field)?)
}
