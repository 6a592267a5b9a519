use serde::{Deserialize, Serialize};

// Basic types for wallet operations
pub type AccountIndex = u32;

/// Result type for wallet core operations
pub type WalletResult<T> = Result<T, crate::shared::error::WalletError>;

/// Sealed master secret of a new user plus the public addresses derived
/// from it. Holds nothing that needs the master key to stay secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSet {
    pub sealed_secret: crate::core::crypto::encryption::SealedSecret,
    pub account_index: AccountIndex,
    pub addresses: Vec<crate::domain::entities::WalletAddress>,
}

impl WalletSet {
    pub fn address_for(&self, currency: crate::domain::entities::Currency) -> Option<&str> {
        self.addresses
            .iter()
            .find(|entry| entry.currency == currency)
            .map(|entry| entry.address.as_str())
    }
}
