//! Static registry of the chains this server knows about.
//!
//! Short names follow the EIP-3770 chain list used by the Safe{Wallet}
//! interface. Transaction Service networks are only known for a curated
//! subset; every other chain degrades to "no owner data".

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use ethers::types::Address;
use ethers::utils::to_checksum;
use lazy_static::lazy_static;
use tracing::warn;
use url::Url;

use crate::blockchain::models::ToolError;

/// Base URL of the Safe{Wallet} web interface.
pub const SAFE_APP_URL: &str = "https://app.safe.global";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainInfo {
    pub chain_id: u64,
    pub short_name: &'static str,
    /// Network segment of `safe-transaction-<network>.safe.global`
    pub tx_service_network: Option<&'static str>,
    /// Public JSON-RPC endpoint used when none is configured
    pub default_rpc_url: Option<&'static str>,
}

const SHORT_NAMES: &[(u64, &str)] = &[
    (1, "eth"),
    (5, "gor"),
    (10, "oeth"),
    (25, "cro"),
    (56, "bnb"),
    (100, "gno"),
    (130, "unichain"),
    (137, "matic"),
    (146, "sonic"),
    (250, "ftm"),
    (288, "boba"),
    (324, "zksync"),
    (480, "wc"),
    (1101, "zkevm"),
    (1284, "mbeam"),
    (1285, "mriver"),
    (5000, "mantle"),
    (8453, "base"),
    (17000, "holesky"),
    (34443, "mode"),
    (42161, "arb1"),
    (42170, "arb-nova"),
    (42220, "celo"),
    (43113, "fuji"),
    (43114, "avax"),
    (59144, "linea"),
    (81457, "blast"),
    (84532, "basesep"),
    (421614, "arb-sep"),
    (534352, "scr"),
    (7777777, "zora"),
    (11155111, "sep"),
    (11155420, "opsep"),
    (1313161554, "aurora"),
];

const TX_SERVICE_NETWORKS: &[(u64, &str)] = &[
    (1, "mainnet"),
    (10, "optimism"),
    (56, "binance"),
    (100, "gnosis-chain"),
    (137, "polygon"),
    (8453, "base"),
    (42161, "arbitrum"),
    (11155111, "sepolia"),
];

// Goerli (5) is shut down and has no public endpoint.
const DEFAULT_RPC_URLS: &[(u64, &str)] = &[
    (1, "https://eth.merkle.io"),
    (10, "https://mainnet.optimism.io"),
    (25, "https://evm.cronos.org"),
    (56, "https://56.rpc.thirdweb.com"),
    (100, "https://rpc.gnosischain.com"),
    (130, "https://mainnet.unichain.org"),
    (137, "https://polygon-rpc.com"),
    (146, "https://rpc.soniclabs.com"),
    (250, "https://rpc.ankr.com/fantom"),
    (288, "https://mainnet.boba.network"),
    (324, "https://mainnet.era.zksync.io"),
    (480, "https://worldchain-mainnet.g.alchemy.com/public"),
    (1101, "https://zkevm-rpc.com"),
    (1284, "https://rpc.api.moonbeam.network"),
    (1285, "https://rpc.api.moonriver.moonbeam.network"),
    (5000, "https://rpc.mantle.xyz"),
    (8453, "https://mainnet.base.org"),
    (17000, "https://ethereum-holesky-rpc.publicnode.com"),
    (34443, "https://mainnet.mode.network"),
    (42161, "https://arb1.arbitrum.io/rpc"),
    (42170, "https://nova.arbitrum.io/rpc"),
    (42220, "https://forno.celo.org"),
    (43113, "https://api.avax-test.network/ext/bc/C/rpc"),
    (43114, "https://api.avax.network/ext/bc/C/rpc"),
    (59144, "https://rpc.linea.build"),
    (81457, "https://rpc.blast.io"),
    (84532, "https://sepolia.base.org"),
    (421614, "https://sepolia-rollup.arbitrum.io/rpc"),
    (534352, "https://rpc.scroll.io"),
    (7777777, "https://rpc.zora.energy"),
    (11155111, "https://sepolia.drpc.org"),
    (11155420, "https://sepolia.optimism.io"),
    (1313161554, "https://mainnet.aurora.dev"),
];

/// EIP-155 chains on which the Safe v1.3.0 singleton is deployed.
const SUPPORTED_CHAIN_IDS: &[u64] = &[
    1, 10, 16, 18, 19, 25, 28, 43, 44, 46, 56, 57, 61, 63, 69, 81, 82, 83, 100, 106, 108, 109,
    111, 130, 137, 146, 148, 155, 179, 195, 196, 204, 250, 252, 255, 288, 314, 336, 338, 360, 420,
    480, 570, 588, 595, 599, 648, 686, 690, 787, 919, 1001, 1088, 1101, 1111, 1112, 1135, 1230,
    1231, 1294, 1337, 1442, 1513, 1516, 1559, 1663, 1923, 1924, 2192, 2221, 2222, 2358, 2810, 2818,
    4157, 4653, 4689, 5000, 5001, 5003, 5700, 6102, 6398, 7000, 7001, 7332, 7560, 7700, 8192, 8194,
    8217, 8453, 8822, 9000, 9001, 9728, 10000, 10001, 10081, 10242, 10243, 11011, 13371, 13473,
    14800, 17000, 17069, 17172, 23294, 23295, 25327, 33139, 34443, 41455, 42161, 42220, 42793,
    43111, 43113, 43114, 43288, 48899, 48900, 54211, 56288, 57000, 57073, 59140, 59144, 60808,
    71401, 71402, 80085, 81457, 84531, 84532, 103454, 128123, 167000, 167009, 314159, 490000,
    534351, 534352, 534353, 656476, 713715, 763373, 808813, 6038361, 7225878, 7777777, 11155111,
    11155420, 94204209, 111557560, 123420111, 245022926, 245022934, 666666666, 999999999,
    1313161554, 1666600000, 1666700000, 88153591557,
];

lazy_static! {
    static ref CHAINS: HashMap<u64, ChainInfo> = {
        let mut chains: HashMap<u64, ChainInfo> = SHORT_NAMES
            .iter()
            .map(|&(chain_id, short_name)| {
                (
                    chain_id,
                    ChainInfo {
                        chain_id,
                        short_name,
                        tx_service_network: None,
                        default_rpc_url: None,
                    },
                )
            })
            .collect();
        for &(chain_id, network) in TX_SERVICE_NETWORKS {
            if let Some(info) = chains.get_mut(&chain_id) {
                info.tx_service_network = Some(network);
            }
        }
        for &(chain_id, rpc_url) in DEFAULT_RPC_URLS {
            if let Some(info) = chains.get_mut(&chain_id) {
                info.default_rpc_url = Some(rpc_url);
            }
        }
        chains
    };
}

pub fn chain_info(chain_id: u64) -> Option<&'static ChainInfo> {
    CHAINS.get(&chain_id)
}

/// EIP-3770 short name of a chain, e.g. `eth` for chain 1.
pub fn short_name_for(chain_id: u64) -> Option<&'static str> {
    chain_info(chain_id).map(|info| info.short_name)
}

/// Base URL of the Safe Transaction Service for `chain_id`, if one is known.
pub fn safe_tx_service_url_for(chain_id: u64) -> Option<String> {
    chain_info(chain_id)
        .and_then(|info| info.tx_service_network)
        .map(|network| format!("https://safe-transaction-{}.safe.global", network))
}

/// Public JSON-RPC endpoint for `chain_id`, if one is known.
pub fn default_rpc_url_for(chain_id: u64) -> Option<&'static str> {
    chain_info(chain_id).and_then(|info| info.default_rpc_url)
}

/// Chain ids advertised to the agent orchestration layer.
pub fn supported_chain_ids() -> &'static [u64] {
    SUPPORTED_CHAIN_IDS
}

/// An address qualified by its network prefix: `<prefix>:<address>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip3770Address {
    pub prefix: String,
    pub address: Address,
}

impl fmt::Display for Eip3770Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, to_checksum(&self.address, None))
    }
}

impl FromStr for Eip3770Address {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, address) = s
            .split_once(':')
            .ok_or_else(|| ToolError::invalid("safe", "expected <shortName>:<address>"))?;
        if prefix.is_empty() {
            return Err(ToolError::invalid("safe", "empty network prefix"));
        }
        let address = crate::utils::parse_address("safe", address)?;
        Ok(Self {
            prefix: prefix.to_string(),
            address,
        })
    }
}

/// Formats `address` as `<shortName>:<address>`. Fails when the chain has no
/// registered short name.
pub fn eip3770_address(address: &Address, chain_id: u64) -> Result<String, ToolError> {
    let short_name = short_name_for(chain_id).ok_or(ToolError::UnsupportedChain(chain_id))?;
    Ok(Eip3770Address {
        prefix: short_name.to_string(),
        address: *address,
    }
    .to_string())
}

// Falls back to the bare chain id so URL construction never fails.
fn qualified_address(address: &Address, chain_id: u64) -> Eip3770Address {
    let prefix = match short_name_for(chain_id) {
        Some(short_name) => short_name.to_string(),
        None => {
            warn!("No EIP-3770 short name for chainId={}, using chain id", chain_id);
            chain_id.to_string()
        }
    };
    Eip3770Address {
        prefix,
        address: *address,
    }
}

/// Safe{Wallet} home page for the Safe.
pub fn safe_url(address: &Address, chain_id: u64) -> String {
    format!("{}/home?safe={}", SAFE_APP_URL, qualified_address(address, chain_id))
}

/// Safe{Wallet} owner settings page for the Safe.
pub fn safe_settings_url(address: &Address, chain_id: u64) -> String {
    format!(
        "{}/settings/setup?safe={}",
        SAFE_APP_URL,
        qualified_address(address, chain_id)
    )
}

/// Extracts the `safe=<prefix>:<address>` query value from a Safe{Wallet} URL.
pub fn parse_safe_url(safe_url: &str) -> Option<Eip3770Address> {
    let url = Url::parse(safe_url).ok()?;
    let (_, value) = url.query_pairs().find(|(key, _)| key == "safe")?;
    value.parse().ok()
}
