//! Domain error type for relay funding operations.

use thiserror::Error;

/// Typed error enum for dashboard operations, allowing callers to match on
/// specific failure modes instead of inspecting opaque `anyhow::Error` messages.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Non-positive or malformed amount input.
    #[error("{0}")]
    InvalidAmount(String),

    /// Amount exceeds the spendable balance. The message carries the
    /// maximum, formatted to 8 decimal places.
    #[error("{0}")]
    InsufficientBalance(String),

    /// The wallet exposes no authorized accounts.
    #[error("No accounts authorized")]
    NoAccounts,

    /// The wallet (or its user) refused to sign the transaction.
    #[error("Rejected in wallet: {0}")]
    Rejected(String),

    /// The transaction executed on chain and reverted.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// RPC transport or node failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid configuration or session state.
    #[error("{0}")]
    InvalidState(String),

    /// Unexpected error from internal subsystems.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `std::result::Result<T, RelayError>`.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Sort a raw provider error message into the transaction failure taxonomy:
/// user rejection, on-chain revert, or transport failure.
pub fn classify_provider_error(message: &str) -> RelayError {
    let lower = message.to_lowercase();
    if lower.contains("rejected") || lower.contains("denied") || lower.contains("cancelled") {
        RelayError::Rejected(message.to_string())
    } else if lower.contains("revert") {
        RelayError::Reverted(message.to_string())
    } else {
        RelayError::Network(message.to_string())
    }
}
