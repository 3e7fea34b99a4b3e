//! Dedicated message sender resolution and relay contract calldata.
//!
//! Each signer owns one relay proxy ("dedicated message sender") whose
//! address is reported by the proxy factory, deployed or not. Withdrawals go
//! through the proxy's `executeCall` forwarding entrypoint.

use std::sync::Arc;

use alloy::primitives::{address, Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;

use crate::error::{RelayError, Result};
use crate::provider::WalletProvider;

sol! {
    /// Factory view resolving a signer's dedicated message sender.
    function getProxyOf(address account) view returns (address proxy, bool isDeployed);

    /// Forwarding entrypoint on the deployed relay proxy.
    function executeCall(address target, bytes data, uint256 value) payable;
}

/// Proxy factory, deployed at the same address on every supported chain.
pub const DEFAULT_FACTORY: Address = address!("c815db16d4be6ddf2685c201937905abf338f5d7");

/// The relay account as shown on the dashboard. Overwritten wholesale on
/// each refresh; never partially updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayAccount {
    pub address: Address,
    pub is_deployed: bool,
    /// Native balance in wei.
    pub balance: U256,
}

/// Seam for the external service that maps a signer to its relay account.
#[async_trait]
pub trait RelayResolver: Send + Sync {
    async fn dedicated_msg_sender(&self, signer: Address) -> Result<(Address, bool)>;
}

/// Resolves the relay account with a single `getProxyOf` eth_call.
pub struct FactoryResolver {
    provider: Arc<dyn WalletProvider>,
    factory: Address,
}

impl FactoryResolver {
    pub fn new(provider: Arc<dyn WalletProvider>, factory: Option<Address>) -> Self {
        Self {
            provider,
            factory: factory.unwrap_or(DEFAULT_FACTORY),
        }
    }

    pub fn factory(&self) -> Address {
        self.factory
    }
}

#[async_trait]
impl RelayResolver for FactoryResolver {
    async fn dedicated_msg_sender(&self, signer: Address) -> Result<(Address, bool)> {
        let data = getProxyOfCall { account: signer }.abi_encode();
        let raw = self.provider.call(self.factory, data.into()).await?;
        let ret = getProxyOfCall::abi_decode_returns(&raw)
            .map_err(|e| RelayError::Network(format!("Bad getProxyOf response: {e}")))?;
        Ok((ret.proxy, ret.isDeployed))
    }
}

/// ABI-encoded calldata for `executeCall(target, data, value)`.
#[must_use]
pub fn execute_call_data(target: Address, data: Bytes, value: U256) -> Bytes {
    executeCallCall {
        target,
        data,
        value,
    }
    .abi_encode()
    .into()
}
