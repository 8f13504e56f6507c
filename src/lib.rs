#![recursion_limit = "256"]
// src/lib.rs

// Re-export commonly used types
pub use ethers::types::Address;

pub mod api;
pub mod blockchain;
pub mod config;
pub mod utils;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: config::Config,
    /// Resolves Safe intents against live chain state
    pub resolver: blockchain::SafeResolver,
}

impl AppState {
    pub fn from_config(config: config::Config) -> anyhow::Result<Self> {
        let client = blockchain::SafeClient::from_config(&config)?;
        let resolver = blockchain::SafeResolver::new(client, config.undeployed_owner_policy);
        Ok(Self { config, resolver })
    }
}
