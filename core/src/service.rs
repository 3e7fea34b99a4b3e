//! The connection context passed to every handler: one provider, one
//! resolver, no globals. All dashboard operations go through here.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, U256};
use tracing::debug;

use crate::display::wei_to_eth_8;
use crate::error::{RelayError, Result};
use crate::provider::{ChainInfo, TxOutcome, TxRequest, WalletEvent, WalletProvider};
use crate::relay::{execute_call_data, RelayAccount, RelayResolver};

/// One consistent view of the wallet + relay pair, produced by [`RelayService::refresh`].
/// `account: None` means the wallet is reachable but exposes no accounts.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub chain: ChainInfo,
    pub fingerprint: Fingerprint,
    pub account: Option<AccountView>,
}

#[derive(Debug, Clone)]
pub struct AccountView {
    pub signer: Address,
    /// Signer's native balance in wei.
    pub signer_balance: U256,
    pub relay: RelayAccount,
}

/// Chain + account fingerprint used to detect external wallet changes
/// between refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fingerprint {
    pub chain_id: u64,
    pub accounts: Vec<Address>,
}

pub struct RelayService {
    provider: Arc<dyn WalletProvider>,
    resolver: Arc<dyn RelayResolver>,
}

impl RelayService {
    pub fn new(provider: Arc<dyn WalletProvider>, resolver: Arc<dyn RelayResolver>) -> Self {
        Self { provider, resolver }
    }

    pub fn provider(&self) -> &Arc<dyn WalletProvider> {
        &self.provider
    }

    /// Re-derive the full dashboard state: chain, accounts, signer balance,
    /// relay account, relay balance — in that order. Only the empty-accounts
    /// case is an explicit outcome; everything else propagates as an error.
    pub async fn refresh(&self) -> Result<Snapshot> {
        let chain = self.provider.chain().await?;
        let accounts = self.provider.accounts().await?;
        let fingerprint = Fingerprint {
            chain_id: chain.id,
            accounts: accounts.clone(),
        };

        let Some(signer) = accounts.first().copied() else {
            debug!(chain = chain.id, "refresh: no accounts authorized");
            return Ok(Snapshot {
                chain,
                fingerprint,
                account: None,
            });
        };

        let signer_balance = self.provider.balance(signer).await?;
        let (address, is_deployed) = self.resolver.dedicated_msg_sender(signer).await?;
        let balance = self.provider.balance(address).await?;
        debug!(%signer, relay = %address, is_deployed, "refresh complete");

        Ok(Snapshot {
            chain,
            fingerprint,
            account: Some(AccountView {
                signer,
                signer_balance,
                relay: RelayAccount {
                    address,
                    is_deployed,
                    balance,
                },
            }),
        })
    }

    /// Surface the wallet's connect prompt.
    pub async fn connect(&self) -> Result<Vec<Address>> {
        self.provider.request_accounts().await
    }

    /// Ask the wallet to re-prompt permissions. Whether this truly
    /// disconnects is up to the wallet.
    pub async fn disconnect(&self) -> Result<()> {
        self.provider.request_permissions().await
    }

    /// Current relay balance, fetched at the instant the max toggle flips.
    pub async fn relay_balance(&self, relay: Address) -> Result<U256> {
        self.provider.balance(relay).await
    }

    /// Fund the relay with a plain value transfer from the signer.
    ///
    /// Zero amounts are rejected before any provider call; over-balance
    /// amounts are rejected against a freshly fetched signer balance, with
    /// the maximum reported to 8 decimal places.
    pub async fn deposit(&self, signer: Address, relay: Address, amount: U256) -> Result<TxOutcome> {
        if amount.is_zero() {
            return Err(RelayError::InvalidAmount("Amount must be >0".into()));
        }
        let max = self.provider.balance(signer).await?;
        if amount > max {
            return Err(RelayError::InsufficientBalance(format!(
                "Max Balance = {}",
                wei_to_eth_8(max)
            )));
        }

        let outcome = self
            .provider
            .send_and_confirm(TxRequest {
                from: signer,
                to: relay,
                value: amount,
                data: None,
            })
            .await?;
        if !outcome.success {
            return Err(RelayError::Reverted(outcome.hash));
        }
        debug!(hash = %outcome.hash, "deposit confirmed");
        Ok(outcome)
    }

    /// Pull funds back out of the relay via `executeCall(signer, 0x, amount)`.
    /// Validated against the relay's current balance; the transaction itself
    /// carries no value.
    pub async fn withdraw(
        &self,
        signer: Address,
        relay: Address,
        amount: U256,
    ) -> Result<TxOutcome> {
        if amount.is_zero() {
            return Err(RelayError::InvalidAmount("Amount must be >0".into()));
        }
        let max = self.provider.balance(relay).await?;
        if amount > max {
            return Err(RelayError::InsufficientBalance(format!(
                "Max Balance = {}",
                wei_to_eth_8(max)
            )));
        }

        let data = execute_call_data(signer, Bytes::new(), amount);
        let outcome = self
            .provider
            .send_and_confirm(TxRequest {
                from: signer,
                to: relay,
                value: U256::ZERO,
                data: Some(data),
            })
            .await?;
        if !outcome.success {
            return Err(RelayError::Reverted(outcome.hash));
        }
        debug!(hash = %outcome.hash, "withdraw confirmed");
        Ok(outcome)
    }

    /// Compare the wallet's current chain and account list against a
    /// previous fingerprint. A chain switch wins over an account change.
    pub async fn detect_change(&self, last: &Fingerprint) -> Result<Option<WalletEvent>> {
        let chain = self.provider.chain().await?;
        if chain.id != last.chain_id {
            return Ok(Some(WalletEvent::ChainChanged));
        }
        let accounts = self.provider.accounts().await?;
        if accounts != last.accounts {
            return Ok(Some(WalletEvent::AccountsChanged));
        }
        Ok(None)
    }
}
