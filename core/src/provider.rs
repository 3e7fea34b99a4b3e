//! Wallet provider seam.
//!
//! The dashboard never talks to a chain directly; everything goes through
//! [`WalletProvider`], the trait standing in for whatever signs and submits
//! transactions on the user's behalf. The production implementation is
//! [`crate::network::RpcClient`]; tests substitute an in-memory mock.

use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Descriptive network info, refreshed on every dashboard refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub id: u64,
    pub name: String,
}

impl ChainInfo {
    pub fn from_id(id: u64) -> Self {
        Self {
            id,
            name: chain_name(id).to_string(),
        }
    }
}

impl std::fmt::Display for ChainInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Human-readable name for well-known chain ids.
pub fn chain_name(id: u64) -> &'static str {
    match id {
        1 => "mainnet",
        10 => "optimism",
        100 => "gnosis",
        137 => "polygon",
        8453 => "base",
        42161 => "arbitrum",
        11155111 => "sepolia",
        31337 => "local",
        _ => "unknown",
    }
}

/// A transaction to be signed and submitted by the wallet.
/// `data: None` is a plain value transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Option<Bytes>,
}

/// Result of a confirmed transaction. `success == false` means the
/// transaction was mined but reverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub hash: String,
    pub success: bool,
}

/// External wallet change detected between two refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletEvent {
    AccountsChanged,
    ChainChanged,
}

#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Fetch the connected chain's id and name.
    async fn chain(&self) -> Result<ChainInfo>;

    /// Enumerate authorized accounts without prompting.
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// Ask the wallet to authorize accounts (the connect prompt).
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Ask the wallet to re-prompt its permission flow. Best effort; whether
    /// this actually disconnects anything depends on the wallet.
    async fn request_permissions(&self) -> Result<()>;

    /// Native balance of an address, in wei.
    async fn balance(&self, address: Address) -> Result<U256>;

    /// Read-only contract call.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;

    /// Submit a transaction and wait for its receipt. There is no timeout
    /// and no cancellation; a hung node blocks the caller.
    async fn send_and_confirm(&self, request: TxRequest) -> Result<TxOutcome>;
}
