// src/blockchain/mod.rs

pub mod chains;
pub mod client;
pub use client::SafeClient;

pub mod models;
pub mod services;
pub use services::safe::SafeResolver;

// Re-export commonly used types
pub use ethers::{types::Address, utils::to_checksum};
