//! Wallet entity and related value objects
//!
//! A [`DerivedWallet`] lives for a single operation and carries its private
//! key in zeroizing memory. Only its [`WalletAddress`] projection may be
//! serialized and handed to persistence.

use super::network::{Currency, Network};
use crate::shared::constants::{INTERNAL_LEDGER_ADDRESS, NO_PRIVATE_KEY};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// Selects which sub-key of a master secret to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    pub network: Network,
    pub account_index: u32,
}

impl DerivationPath {
    pub fn new(network: Network, account_index: u32) -> Self {
        Self {
            network,
            account_index,
        }
    }

    /// BIP-44 path string for this network and index.
    ///
    /// Ed25519 paths harden every segment since SLIP-0010 has no public
    /// child derivation.
    pub fn to_path_string(&self) -> String {
        let coin = self.network.coin_type();
        match self.network {
            Network::Solana => format!("m/44'/{}'/{}'/0'", coin, self.account_index),
            _ => format!("m/44'/{}'/0'/0/{}", coin, self.account_index),
        }
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path_string())
    }
}

/// Address and key for one currency, produced on demand and never stored.
///
/// Does not implement Serialize to prevent the key from leaving the core.
pub struct DerivedWallet {
    pub currency: Currency,
    pub network: Option<Network>,
    pub address: String,
    pub private_key: Zeroizing<String>,
}

impl DerivedWallet {
    pub fn new(currency: Currency, network: Network, address: String, private_key: Zeroizing<String>) -> Self {
        Self {
            currency,
            network: Some(network),
            address,
            private_key,
        }
    }

    /// Placeholder entry for an internal ledger currency; holds no key
    pub fn internal_ledger(currency: Currency) -> Self {
        Self {
            currency,
            network: None,
            address: INTERNAL_LEDGER_ADDRESS.to_string(),
            private_key: Zeroizing::new(NO_PRIVATE_KEY.to_string()),
        }
    }

    /// Same address and key under another currency label
    pub fn relabel(&self, currency: Currency) -> Self {
        Self {
            currency,
            network: self.network,
            address: self.address.clone(),
            private_key: self.private_key.clone(),
        }
    }

    pub fn has_private_key(&self) -> bool {
        self.network.is_some()
    }

    /// Key-free projection safe to persist or return to API callers
    pub fn to_wallet_address(&self) -> WalletAddress {
        WalletAddress {
            currency: self.currency,
            address: self.address.clone(),
        }
    }
}

impl fmt::Debug for DerivedWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedWallet")
            .field("currency", &self.currency)
            .field("network", &self.network)
            .field("address", &self.address)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Public part of a derived wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAddress {
    pub currency: Currency,
    pub address: String,
}

impl From<&DerivedWallet> for WalletAddress {
    fn from(wallet: &DerivedWallet) -> Self {
        wallet.to_wallet_address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_path_strings() {
        assert_eq!(DerivationPath::new(Network::Bitcoin, 0).to_path_string(), "m/44'/0'/0'/0/0");
        assert_eq!(DerivationPath::new(Network::Ethereum, 3).to_path_string(), "m/44'/60'/0'/0/3");
        assert_eq!(DerivationPath::new(Network::Tron, 7).to_path_string(), "m/44'/195'/0'/0/7");
        assert_eq!(DerivationPath::new(Network::Solana, 2).to_path_string(), "m/44'/501'/2'/0'");
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let wallet = DerivedWallet::new(
            Currency::Eth,
            Network::Ethereum,
            "0xabc".to_string(),
            Zeroizing::new("0xsecret".to_string()),
        );
        let debug = format!("{:?}", wallet);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("0xsecret"));
    }

    #[test]
    fn test_internal_ledger_placeholder() {
        let wallet = DerivedWallet::internal_ledger(Currency::Usd);
        assert_eq!(wallet.address, INTERNAL_LEDGER_ADDRESS);
        assert_eq!(wallet.private_key.as_str(), NO_PRIVATE_KEY);
        assert!(!wallet.has_private_key());
    }

    #[test]
    fn test_relabel_keeps_key_material() {
        let wallet = DerivedWallet::new(
            Currency::Eth,
            Network::Ethereum,
            "0xabc".to_string(),
            Zeroizing::new("0x01".to_string()),
        );
        let token = wallet.relabel(Currency::UsdtErc20);
        assert_eq!(token.currency, Currency::UsdtErc20);
        assert_eq!(token.address, wallet.address);
        assert_eq!(*token.private_key, *wallet.private_key);
    }
}
