//! Network and currency entities for the wallet core

use crate::shared::constants::{
    BITCOIN_COIN_TYPE, ETHEREUM_COIN_TYPE, SOLANA_COIN_TYPE, TRON_COIN_TYPE,
};
use crate::shared::error::WalletError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Elliptic curve a network's keys live on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveType {
    Secp256k1,
    Ed25519,
}

/// Blockchain networks the engine derives keys for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Bitcoin,
    Ethereum,
    Solana,
    Tron,
}

impl Network {
    /// Networks derived for every new wallet set, in output order
    pub const STANDARD: [Network; 4] = [
        Network::Bitcoin,
        Network::Ethereum,
        Network::Solana,
        Network::Tron,
    ];

    pub fn coin_type(&self) -> u32 {
        match self {
            Network::Bitcoin => BITCOIN_COIN_TYPE,
            Network::Ethereum => ETHEREUM_COIN_TYPE,
            Network::Solana => SOLANA_COIN_TYPE,
            Network::Tron => TRON_COIN_TYPE,
        }
    }

    pub fn curve(&self) -> CurveType {
        match self {
            Network::Solana => CurveType::Ed25519,
            _ => CurveType::Secp256k1,
        }
    }

    /// Currency label used for the network's native wallet
    pub fn native_currency(&self) -> Currency {
        match self {
            Network::Bitcoin => Currency::Btc,
            Network::Ethereum => Currency::Eth,
            Network::Solana => Currency::Sol,
            Network::Tron => Currency::Trx,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Bitcoin => "bitcoin",
            Network::Ethereum => "ethereum",
            Network::Solana => "solana",
            Network::Tron => "tron",
        };
        f.write_str(name)
    }
}

/// Currency labels known to the exchange ledger.
///
/// Token labels share the curve, path and address encoding of their host
/// chain. `Usd` is an internal ledger currency with no chain behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "BTC")]
    Btc,
    #[serde(rename = "ETH")]
    Eth,
    #[serde(rename = "SOL")]
    Sol,
    #[serde(rename = "TRX")]
    Trx,
    #[serde(rename = "USDT_ERC20")]
    UsdtErc20,
    #[serde(rename = "USDT_TRC20")]
    UsdtTrc20,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub const ALL: [Currency; 7] = [
        Currency::Btc,
        Currency::Eth,
        Currency::Sol,
        Currency::Trx,
        Currency::UsdtErc20,
        Currency::UsdtTrc20,
        Currency::Usd,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Btc => "BTC",
            Currency::Eth => "ETH",
            Currency::Sol => "SOL",
            Currency::Trx => "TRX",
            Currency::UsdtErc20 => "USDT_ERC20",
            Currency::UsdtTrc20 => "USDT_TRC20",
            Currency::Usd => "USD",
        }
    }

    /// Chain carrying this currency, `None` for internal ledger currencies
    pub fn network(&self) -> Option<Network> {
        match self {
            Currency::Btc => Some(Network::Bitcoin),
            Currency::Eth | Currency::UsdtErc20 => Some(Network::Ethereum),
            Currency::Sol => Some(Network::Solana),
            Currency::Trx | Currency::UsdtTrc20 => Some(Network::Tron),
            Currency::Usd => None,
        }
    }

    pub fn is_fiat(&self) -> bool {
        self.network().is_none()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == normalized)
            .ok_or_else(|| WalletError::unsupported_network(s))
    }
}
