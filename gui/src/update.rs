use std::sync::Arc;

use iced::Task;
use tracing::{debug, warn};

use relayfund_core::display::{parse_eth_amount, wei_to_eth_full};
use relayfund_core::{FactoryResolver, RelayService, RpcClient, WalletProvider};

use crate::messages::Message;
use crate::state::{ConnectStatus, SessionInfo};
use crate::App;

impl App {
    // -- Update --

    pub(crate) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // -- Session bootstrap --
            Message::SessionReady(result) => {
                self.loading = self.loading.saturating_sub(1);
                match result {
                    Ok(info) => {
                        self.session = Some(info);
                        self.status = ConnectStatus::pending("Connecting");
                        return self.refresh();
                    }
                    Err(e) => {
                        warn!("wallet node unreachable: {e}");
                        self.status = ConnectStatus::missing("Wallet not found");
                    }
                }
                Task::none()
            }

            // -- Connection --
            Message::Connect => {
                let Some(info) = &self.session else {
                    return Task::none();
                };
                let service = info.service.clone();
                self.loading += 1;
                self.error_message = None;

                Task::perform(
                    async move {
                        let accounts = service.connect().await?;
                        Ok(accounts.len())
                    },
                    |r: Result<usize, relayfund_core::RelayError>| {
                        Message::Connected(r.map_err(|e| e.to_string()))
                    },
                )
            }

            Message::Connected(result) => {
                self.loading = self.loading.saturating_sub(1);
                match result {
                    // Re-derive all state from the wallet, whatever it granted
                    Ok(_) => return self.refresh(),
                    Err(e) => self.error_message = Some(e),
                }
                Task::none()
            }

            Message::Disconnect => {
                let Some(info) = &self.session else {
                    return Task::none();
                };
                self.status = ConnectStatus::failed("Waiting for Disconnection");
                let service = info.service.clone();

                Task::perform(
                    async move { service.disconnect().await },
                    |r: Result<(), relayfund_core::RelayError>| {
                        Message::Disconnected(r.map_err(|e| e.to_string()))
                    },
                )
            }

            Message::Disconnected(result) => {
                // Best effort: the wallet decides whether anything was revoked
                if let Err(e) = result {
                    warn!("permission re-prompt failed: {e}");
                }
                Task::none()
            }

            // -- Dashboard --
            Message::Refresh => self.refresh(),

            Message::Refreshed(result) => {
                self.loading = self.loading.saturating_sub(1);
                match result {
                    Ok(snapshot) => {
                        self.fingerprint = snapshot.fingerprint;
                        self.chain = Some(snapshot.chain);
                        match snapshot.account {
                            Some(view) => {
                                self.signer_address = Some(view.signer);
                                self.signer_balance = Some(view.signer_balance);
                                self.relay = Some(view.relay);
                                self.status = ConnectStatus::success("Connected");
                            }
                            None => {
                                self.signer_address = None;
                                self.signer_balance = None;
                                self.relay = None;
                                self.status = ConnectStatus::failed("Connection Failed");
                            }
                        }
                    }
                    Err(e) => self.error_message = Some(e),
                }
                Task::none()
            }

            Message::CopyAddress(addr) => {
                if let Some(cb) = &mut self.clipboard {
                    match cb.set_text(&addr) {
                        Ok(_) => self.status_message = Some("Address copied".into()),
                        Err(e) => self.error_message = Some(format!("Copy failed: {e}")),
                    }
                } else {
                    self.error_message = Some("Clipboard not available".into());
                }
                Task::none()
            }

            // -- Form inputs --
            Message::DepositAmountChanged(v) => {
                self.deposit_amount = v;
                Task::none()
            }

            Message::WithdrawAmountChanged(v) => {
                self.withdraw_amount = v;
                Task::none()
            }

            Message::ToggleMax => {
                if self.max {
                    self.withdraw_amount = "0".into();
                    self.max = false;
                    return Task::none();
                }
                let (Some(info), Some(relay)) = (&self.session, &self.relay) else {
                    return Task::none();
                };
                let service = info.service.clone();
                let relay_address = relay.address;
                self.loading += 1;

                Task::perform(
                    async move { service.relay_balance(relay_address).await },
                    |r: Result<relayfund_core::U256, relayfund_core::RelayError>| {
                        Message::MaxBalanceLoaded(r.map_err(|e| e.to_string()))
                    },
                )
            }

            Message::MaxBalanceLoaded(result) => {
                self.loading = self.loading.saturating_sub(1);
                match result {
                    Ok(balance) => {
                        // Balance at this instant; not re-fetched until submit
                        self.withdraw_amount = wei_to_eth_full(balance);
                        self.max = true;
                    }
                    Err(e) => self.error_message = Some(e),
                }
                Task::none()
            }

            // -- Deposit --
            Message::ConfirmDeposit => {
                let amount = match parse_eth_amount(&self.deposit_amount) {
                    Ok(a) => a,
                    Err(e) => {
                        self.error_message = Some(e);
                        return Task::none();
                    }
                };
                let Some((service, signer, relay)) = self.action_context() else {
                    return Task::none();
                };
                self.loading += 1;
                self.error_message = None;
                self.success_message = None;

                Task::perform(
                    async move {
                        let outcome = service.deposit(signer, relay, amount).await?;
                        Ok(outcome.hash)
                    },
                    |r: Result<String, relayfund_core::RelayError>| {
                        Message::DepositCompleted(r.map_err(|e| e.to_string()))
                    },
                )
            }

            Message::DepositCompleted(result) => {
                self.loading = self.loading.saturating_sub(1);
                match result {
                    Ok(hash) => {
                        self.success_message = Some(format!("Deposited. Tx: {hash}"));
                        self.deposit_amount.clear();
                        return self.refresh();
                    }
                    Err(e) => self.error_message = Some(e),
                }
                Task::none()
            }

            // -- Withdraw --
            Message::ConfirmWithdraw => {
                let amount = match parse_eth_amount(&self.withdraw_amount) {
                    Ok(a) => a,
                    Err(e) => {
                        self.error_message = Some(e);
                        return Task::none();
                    }
                };
                let Some((service, signer, relay)) = self.action_context() else {
                    return Task::none();
                };
                self.loading += 1;
                self.error_message = None;
                self.success_message = None;

                Task::perform(
                    async move {
                        let outcome = service.withdraw(signer, relay, amount).await?;
                        Ok(outcome.hash)
                    },
                    |r: Result<String, relayfund_core::RelayError>| {
                        Message::WithdrawCompleted(r.map_err(|e| e.to_string()))
                    },
                )
            }

            Message::WithdrawCompleted(result) => {
                self.loading = self.loading.saturating_sub(1);
                match result {
                    Ok(hash) => {
                        self.success_message = Some(format!("Withdrawn. Tx: {hash}"));
                        self.withdraw_amount.clear();
                        self.max = false;
                        return self.refresh();
                    }
                    Err(e) => self.error_message = Some(e),
                }
                Task::none()
            }

            // -- External wallet change polling --
            Message::PollWallet => {
                if self.loading > 0 {
                    return Task::none();
                }
                let Some(info) = &self.session else {
                    return Task::none();
                };
                let service = info.service.clone();
                let fingerprint = self.fingerprint.clone();

                Task::perform(
                    async move { service.detect_change(&fingerprint).await },
                    |r| Message::WalletChanged(r.map_err(|e| e.to_string())),
                )
            }

            Message::WalletChanged(result) => {
                match result {
                    Ok(Some(event)) => {
                        debug!(?event, "wallet changed, re-deriving state");
                        self.status = ConnectStatus::pending("Loading");
                        return self.refresh();
                    }
                    Ok(None) => {}
                    // Transient poll failures stay out of the error line
                    Err(e) => warn!("wallet poll failed: {e}"),
                }
                Task::none()
            }
        }
    }

    // -- Helpers --

    /// Connect to the wallet node and probe it once; `Missing` if unreachable.
    pub(crate) fn bootstrap(&mut self) -> Task<Message> {
        let rpc_url = self.config.rpc_url.clone();
        let factory = self.config.factory;
        self.loading += 1;

        Task::perform(
            async move {
                let client = RpcClient::connect(&rpc_url)?;
                let provider: Arc<dyn WalletProvider> = Arc::new(client);
                // Reachability probe; failure means "no wallet", not "failed"
                provider.chain().await?;
                let resolver = Arc::new(FactoryResolver::new(provider.clone(), factory));
                Ok(SessionInfo {
                    service: Arc::new(RelayService::new(provider, resolver)),
                    rpc_url,
                })
            },
            |r: Result<SessionInfo, relayfund_core::RelayError>| {
                Message::SessionReady(r.map_err(|e| e.to_string()))
            },
        )
    }

    /// Schedule one full refresh of the dashboard state.
    pub(crate) fn refresh(&mut self) -> Task<Message> {
        let Some(info) = &self.session else {
            return Task::none();
        };
        let service = info.service.clone();
        self.loading += 1;

        Task::perform(async move { service.refresh().await }, |r| {
            Message::Refreshed(r.map_err(|e| e.to_string()))
        })
    }

    /// Everything an action handler needs, or `None` until a refresh
    /// succeeded: the service plus signer and relay addresses.
    fn action_context(
        &self,
    ) -> Option<(
        Arc<RelayService>,
        relayfund_core::Address,
        relayfund_core::Address,
    )> {
        let service = self.session.as_ref()?.service.clone();
        let signer = self.signer_address?;
        let relay = self.relay.as_ref()?.address;
        Some((service, signer, relay))
    }
}
