//! Service-level tests against an in-memory wallet provider.
//!
//! The mock records every provider call so tests can assert not just the
//! outcome but that validation failures happen before anything hits the
//! network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use relayfund_core::error::Result;
use relayfund_core::{
    execute_call_data, Address, Bytes, ChainInfo, Fingerprint, RelayError, RelayResolver,
    RelayService, TxOutcome, TxRequest, U256, WalletEvent, WalletProvider,
};

const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

fn eth(whole: u128, frac: u128) -> U256 {
    U256::from(whole) * U256::from(WEI_PER_ETH) + U256::from(frac)
}

const SIGNER: u8 = 0x11;
const RELAY: u8 = 0x22;

#[derive(Default)]
struct MockState {
    chain_id: u64,
    accounts: Vec<Address>,
    balances: HashMap<Address, U256>,
    calls: Vec<String>,
    sent: Vec<TxRequest>,
    revert_next_send: bool,
}

struct MockProvider {
    state: Mutex<MockState>,
}

impl MockProvider {
    fn new(chain_id: u64, accounts: Vec<Address>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MockState {
                chain_id,
                accounts,
                ..Default::default()
            }),
        })
    }

    fn set_balance(&self, address: Address, balance: U256) {
        self.state.lock().unwrap().balances.insert(address, balance);
    }

    fn set_accounts(&self, accounts: Vec<Address>) {
        self.state.lock().unwrap().accounts = accounts;
    }

    fn set_chain_id(&self, id: u64) {
        self.state.lock().unwrap().chain_id = id;
    }

    fn revert_next_send(&self) {
        self.state.lock().unwrap().revert_next_send = true;
    }

    fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn sent(&self) -> Vec<TxRequest> {
        self.state.lock().unwrap().sent.clone()
    }

    fn record(&self, call: &str) {
        self.state.lock().unwrap().calls.push(call.to_string());
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn chain(&self) -> Result<ChainInfo> {
        self.record("chain");
        Ok(ChainInfo::from_id(self.state.lock().unwrap().chain_id))
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        self.record("accounts");
        Ok(self.state.lock().unwrap().accounts.clone())
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.record("request_accounts");
        Ok(self.state.lock().unwrap().accounts.clone())
    }

    async fn request_permissions(&self) -> Result<()> {
        self.record("request_permissions");
        Ok(())
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        self.record("balance");
        Ok(self
            .state
            .lock()
            .unwrap()
            .balances
            .get(&address)
            .copied()
            .unwrap_or(U256::ZERO))
    }

    async fn call(&self, _to: Address, _data: Bytes) -> Result<Bytes> {
        self.record("call");
        Err(RelayError::Network("call not scripted".into()))
    }

    async fn send_and_confirm(&self, request: TxRequest) -> Result<TxOutcome> {
        self.record("send");
        let mut state = self.state.lock().unwrap();
        let success = !std::mem::take(&mut state.revert_next_send);
        if success && request.data.is_none() {
            // Plain value transfer: move the balance so a follow-up refresh
            // observes the new state.
            let from = state.balances.entry(request.from).or_default();
            *from = from.saturating_sub(request.value);
            let to = state.balances.entry(request.to).or_default();
            *to = to.saturating_add(request.value);
        }
        state.sent.push(request);
        Ok(TxOutcome {
            hash: format!("0xtx{:02}", state.sent.len()),
            success,
        })
    }
}

/// Fixed resolver standing in for the proxy factory.
struct FixedResolver {
    proxy: Address,
    deployed: bool,
}

#[async_trait]
impl RelayResolver for FixedResolver {
    async fn dedicated_msg_sender(&self, _signer: Address) -> Result<(Address, bool)> {
        Ok((self.proxy, self.deployed))
    }
}

fn service(provider: Arc<MockProvider>, deployed: bool) -> RelayService {
    let resolver = Arc::new(FixedResolver {
        proxy: addr(RELAY),
        deployed,
    });
    RelayService::new(provider, resolver)
}

// -- Refresh --

#[tokio::test]
async fn refresh_with_no_accounts_reports_chain_only() {
    let provider = MockProvider::new(11155111, vec![]);
    let svc = service(provider.clone(), true);

    let snap = svc.refresh().await.unwrap();
    assert_eq!(snap.chain.id, 11155111);
    assert_eq!(snap.chain.name, "sepolia");
    assert!(snap.account.is_none());
    assert_eq!(snap.fingerprint.accounts, Vec::<Address>::new());
    // No balance or resolver traffic once the account list comes back empty
    assert_eq!(provider.calls(), vec!["chain", "accounts"]);
}

#[tokio::test]
async fn refresh_with_account_loads_signer_and_relay() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    provider.set_balance(addr(SIGNER), eth(2, 0));
    provider.set_balance(addr(RELAY), eth(0, 500_000_000_000_000_000));
    let svc = service(provider.clone(), true);

    let snap = svc.refresh().await.unwrap();
    let view = snap.account.expect("account should be present");
    assert_eq!(view.signer, addr(SIGNER));
    assert_eq!(view.signer_balance, eth(2, 0));
    assert_eq!(view.relay.address, addr(RELAY));
    assert!(view.relay.is_deployed);
    assert_eq!(view.relay.balance, eth(0, 500_000_000_000_000_000));
}

#[tokio::test]
async fn refresh_reports_undeployed_relay() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    let svc = service(provider, false);

    let snap = svc.refresh().await.unwrap();
    let view = snap.account.unwrap();
    assert!(!view.relay.is_deployed);
    assert_eq!(view.relay.address, addr(RELAY));
}

// -- Deposit validation --

#[tokio::test]
async fn deposit_zero_rejected_before_any_provider_call() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    let svc = service(provider.clone(), true);

    let err = svc
        .deposit(addr(SIGNER), addr(RELAY), U256::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::InvalidAmount(_)));
    assert_eq!(err.to_string(), "Amount must be >0");
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn deposit_over_balance_reports_max_to_8_decimals() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    provider.set_balance(addr(SIGNER), eth(0, 500_000_000_000_000_000));
    let svc = service(provider.clone(), true);

    let err = svc
        .deposit(addr(SIGNER), addr(RELAY), eth(1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::InsufficientBalance(_)));
    assert_eq!(err.to_string(), "Max Balance = 0.50000000");
    // The balance check ran, but nothing was submitted
    assert_eq!(provider.calls(), vec!["balance"]);
    assert!(provider.sent().is_empty());
}

#[tokio::test]
async fn deposit_submits_plain_value_transfer() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    provider.set_balance(addr(SIGNER), eth(2, 0));
    let svc = service(provider.clone(), true);

    let outcome = svc
        .deposit(addr(SIGNER), addr(RELAY), eth(1, 0))
        .await
        .unwrap();
    assert!(outcome.success);

    let sent = provider.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, addr(SIGNER));
    assert_eq!(sent[0].to, addr(RELAY));
    assert_eq!(sent[0].value, eth(1, 0));
    assert!(sent[0].data.is_none());

    // Follow-up refresh observes the moved balance
    let snap = svc.refresh().await.unwrap();
    let view = snap.account.unwrap();
    assert_eq!(view.signer_balance, eth(1, 0));
    assert_eq!(view.relay.balance, eth(1, 0));
}

#[tokio::test]
async fn deposit_exact_balance_is_allowed() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    provider.set_balance(addr(SIGNER), eth(1, 0));
    let svc = service(provider, true);

    let outcome = svc
        .deposit(addr(SIGNER), addr(RELAY), eth(1, 0))
        .await
        .unwrap();
    assert!(outcome.success);
}

#[tokio::test]
async fn deposit_revert_surfaces_typed_error() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    provider.set_balance(addr(SIGNER), eth(2, 0));
    provider.revert_next_send();
    let svc = service(provider, true);

    let err = svc
        .deposit(addr(SIGNER), addr(RELAY), eth(1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::Reverted(_)));
}

// -- Withdraw validation --

#[tokio::test]
async fn withdraw_zero_rejected_before_any_provider_call() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    let svc = service(provider.clone(), true);

    let err = svc
        .withdraw(addr(SIGNER), addr(RELAY), U256::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::InvalidAmount(_)));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn withdraw_validates_against_relay_balance() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    provider.set_balance(addr(SIGNER), eth(9, 0));
    provider.set_balance(addr(RELAY), eth(0, 250_000_000_000_000_000));
    let svc = service(provider.clone(), true);

    let err = svc
        .withdraw(addr(SIGNER), addr(RELAY), eth(1, 0))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Max Balance = 0.25000000");
    assert!(provider.sent().is_empty());
}

#[tokio::test]
async fn withdraw_submits_execute_call_with_zero_value() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    provider.set_balance(addr(RELAY), eth(3, 0));
    let svc = service(provider.clone(), true);

    let amount = eth(1, 500_000_000_000_000_000);
    svc.withdraw(addr(SIGNER), addr(RELAY), amount)
        .await
        .unwrap();

    let sent = provider.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, addr(RELAY));
    assert_eq!(sent[0].value, U256::ZERO);
    let expected = execute_call_data(addr(SIGNER), Bytes::new(), amount);
    assert_eq!(sent[0].data.as_ref().unwrap(), &expected);
}

// -- Change detection --

#[tokio::test]
async fn detect_change_is_quiet_when_nothing_moved() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    let svc = service(provider, true);

    let fp = Fingerprint {
        chain_id: 1,
        accounts: vec![addr(SIGNER)],
    };
    assert_eq!(svc.detect_change(&fp).await.unwrap(), None);
}

#[tokio::test]
async fn detect_change_sees_account_switch() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    let svc = service(provider.clone(), true);

    let fp = svc.refresh().await.unwrap().fingerprint;
    provider.set_accounts(vec![addr(0x33)]);
    assert_eq!(
        svc.detect_change(&fp).await.unwrap(),
        Some(WalletEvent::AccountsChanged)
    );
}

#[tokio::test]
async fn detect_change_sees_revoked_accounts() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    let svc = service(provider.clone(), true);

    let fp = svc.refresh().await.unwrap().fingerprint;
    provider.set_accounts(vec![]);
    assert_eq!(
        svc.detect_change(&fp).await.unwrap(),
        Some(WalletEvent::AccountsChanged)
    );
}

#[tokio::test]
async fn chain_switch_wins_over_account_change() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    let svc = service(provider.clone(), true);

    let fp = svc.refresh().await.unwrap().fingerprint;
    provider.set_chain_id(137);
    provider.set_accounts(vec![]);
    assert_eq!(
        svc.detect_change(&fp).await.unwrap(),
        Some(WalletEvent::ChainChanged)
    );
}

// -- Connect / disconnect passthroughs --

#[tokio::test]
async fn connect_surfaces_the_wallet_prompt() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    let svc = service(provider.clone(), true);

    let accounts = svc.connect().await.unwrap();
    assert_eq!(accounts, vec![addr(SIGNER)]);
    assert_eq!(provider.calls(), vec!["request_accounts"]);
}

#[tokio::test]
async fn disconnect_re_prompts_permissions() {
    let provider = MockProvider::new(1, vec![addr(SIGNER)]);
    let svc = service(provider.clone(), true);

    svc.disconnect().await.unwrap();
    assert_eq!(provider.calls(), vec!["request_permissions"]);
}
