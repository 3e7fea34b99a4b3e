//! Thin wrapper around an alloy HTTP provider for wallet-node operations.
//!
//! The desktop analog of a browser-injected provider: an RPC endpoint whose
//! node manages the accounts and signs `eth_sendTransaction` itself (a local
//! dev node, or a wallet daemon exposing the same surface).

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;
use tracing::debug;

use crate::error::{classify_provider_error, RelayError, Result};
use crate::provider::{ChainInfo, TxOutcome, TxRequest, WalletProvider};

pub struct RpcClient {
    provider: DynProvider,
    url: String,
}

impl RpcClient {
    pub fn connect(url: &str) -> Result<Self> {
        let parsed: Url = url
            .parse()
            .map_err(|e| RelayError::InvalidState(format!("Invalid RPC URL '{url}': {e}")))?;
        let provider = ProviderBuilder::new().connect_http(parsed).erased();
        Ok(Self {
            provider,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn net_err(e: impl std::fmt::Display) -> RelayError {
    RelayError::Network(e.to_string())
}

#[async_trait]
impl WalletProvider for RpcClient {
    async fn chain(&self) -> Result<ChainInfo> {
        let id = self.provider.get_chain_id().await.map_err(net_err)?;
        Ok(ChainInfo::from_id(id))
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        self.provider.get_accounts().await.map_err(net_err)
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        // Wallet nodes gate account exposure behind this method; plain dev
        // nodes only answer eth_accounts, so fall back to that.
        match self
            .provider
            .raw_request::<_, Vec<Address>>("eth_requestAccounts".into(), ())
            .await
        {
            Ok(accounts) => Ok(accounts),
            Err(e) => {
                debug!("eth_requestAccounts unsupported ({e}), falling back to eth_accounts");
                self.accounts().await
            }
        }
    }

    async fn request_permissions(&self) -> Result<()> {
        // Best effort: not every node implements the permissions API, and a
        // failure here must not break the disconnect flow.
        let params = serde_json::json!([{ "eth_accounts": {} }]);
        if let Err(e) = self
            .provider
            .raw_request::<_, serde_json::Value>("wallet_requestPermissions".into(), params)
            .await
        {
            debug!("wallet_requestPermissions unsupported: {e}");
        }
        Ok(())
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        self.provider.get_balance(address).await.map_err(net_err)
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let req = TransactionRequest::default().with_to(to).with_input(data);
        self.provider
            .call(req)
            .await
            .map_err(|e| classify_provider_error(&e.to_string()))
    }

    async fn send_and_confirm(&self, request: TxRequest) -> Result<TxOutcome> {
        let mut req = TransactionRequest::default()
            .with_from(request.from)
            .with_to(request.to)
            .with_value(request.value);
        if let Some(data) = request.data {
            req = req.with_input(data);
        }

        let pending = self
            .provider
            .send_transaction(req)
            .await
            .map_err(|e| classify_provider_error(&e.to_string()))?;
        let hash = *pending.tx_hash();
        debug!(%hash, "transaction submitted, awaiting receipt");

        let receipt = pending.get_receipt().await.map_err(net_err)?;
        Ok(TxOutcome {
            hash: receipt.transaction_hash.to_string(),
            success: receipt.status(),
        })
    }
}
