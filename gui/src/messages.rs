use crate::state::SessionInfo;
use relayfund_core::{Snapshot, U256, WalletEvent};

// -- Messages --

#[derive(Clone)]
pub(crate) enum Message {
    // Session bootstrap
    SessionReady(Result<SessionInfo, String>),

    // Connection
    Connect,
    Connected(Result<usize, String>),
    Disconnect,
    Disconnected(Result<(), String>),

    // Dashboard
    Refresh,
    Refreshed(Result<Snapshot, String>),
    CopyAddress(String),

    // Deposit / withdraw
    DepositAmountChanged(String),
    WithdrawAmountChanged(String),
    ToggleMax,
    MaxBalanceLoaded(Result<U256, String>),
    ConfirmDeposit,
    DepositCompleted(Result<String, String>),
    ConfirmWithdraw,
    WithdrawCompleted(Result<String, String>),

    // External wallet change polling
    PollWallet,
    WalletChanged(Result<Option<WalletEvent>, String>),
}
