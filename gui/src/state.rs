use relayfund_core::RelayService;
use std::fmt;
use std::sync::Arc;

// -- Connection status machine --

/// Which UI branch renders. Re-entered on every wallet change for the
/// lifetime of the process; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConnectState {
    /// No wallet node reachable at the configured endpoint.
    Missing,
    /// Initial/default state while a refresh is in flight.
    Pending,
    /// An account is connected and the dashboard is loaded.
    Success,
    /// Wallet reachable but no account authorized, or disconnect requested.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConnectStatus {
    pub(crate) state: ConnectState,
    pub(crate) message: String,
}

impl ConnectStatus {
    pub(crate) fn pending(message: impl Into<String>) -> Self {
        Self {
            state: ConnectState::Pending,
            message: message.into(),
        }
    }

    pub(crate) fn missing(message: impl Into<String>) -> Self {
        Self {
            state: ConnectState::Missing,
            message: message.into(),
        }
    }

    pub(crate) fn success(message: impl Into<String>) -> Self {
        Self {
            state: ConnectState::Success,
            message: message.into(),
        }
    }

    pub(crate) fn failed(message: impl Into<String>) -> Self {
        Self {
            state: ConnectState::Failed,
            message: message.into(),
        }
    }
}

// -- Cloneable session handle established at bootstrap --

/// The live connection context: one service handle shared by every handler.
#[derive(Clone)]
pub(crate) struct SessionInfo {
    pub(crate) service: Arc<RelayService>,
    pub(crate) rpc_url: String,
}

impl fmt::Debug for SessionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionInfo")
            .field("rpc_url", &self.rpc_url)
            .finish_non_exhaustive()
    }
}
