pub mod display;
pub mod error;
pub mod network;
pub mod provider;
pub mod relay;
pub mod service;

pub use error::{classify_provider_error, RelayError};
pub use network::RpcClient;
pub use provider::{chain_name, ChainInfo, TxOutcome, TxRequest, WalletEvent, WalletProvider};
pub use relay::{
    execute_call_data, FactoryResolver, RelayAccount, RelayResolver, DEFAULT_FACTORY,
};
pub use service::{AccountView, Fingerprint, RelayService, Snapshot};

pub use alloy::primitives::{Address, Bytes, U256};
