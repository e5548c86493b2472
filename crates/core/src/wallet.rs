//! Wallet connection state as seen by the rest of the app.

use serde::{Deserialize, Serialize};

/// Connection state reported by the wallet adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    /// Whether a wallet is connected
    pub connected: bool,

    /// Base58 address of the connected wallet
    pub address: Option<String>,
}

impl WalletSession {
    /// A connected session.
    pub fn connected(address: impl Into<String>) -> Self {
        Self {
            connected: true,
            address: Some(address.into()),
        }
    }

    /// Key used to look up the learner's profile; only available while
    /// connected.
    pub fn profile_key(&self) -> Option<&str> {
        if self.connected {
            self.address.as_deref()
        } else {
            None
        }
    }
}
