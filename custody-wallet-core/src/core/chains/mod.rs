//! Per-chain key derivation and address encoding
//!
//! Every supported network implements [`ChainKeyDeriver`]. Token currencies
//! reuse the deriver of their host network.

pub mod bitcoin;
pub mod ethereum;
pub mod solana;
pub mod tron;

pub use bitcoin::BitcoinDeriver;
pub use ethereum::EthereumDeriver;
pub use solana::SolanaDeriver;
pub use tron::TronDeriver;

use crate::core::crypto::keys::hd_derivation::{derive_ed25519, derive_secp256k1, SecretBytes};
use crate::domain::entities::{CurveType, DerivationPath, Network};
use crate::shared::error::WalletError;
use crate::shared::WalletResult;
use lazy_static::lazy_static;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use zeroize::Zeroizing;

lazy_static! {
    static ref SECP256K1: Secp256k1<secp256k1::All> = Secp256k1::new();
}

/// Address and encoded private key for one derivation path
pub struct ChainKeys {
    pub address: String,
    pub private_key: Zeroizing<String>,
}

pub trait ChainKeyDeriver: Send + Sync {
    fn network(&self) -> Network;

    /// Address for the 32-byte secret
    fn address(&self, secret: &SecretBytes) -> WalletResult<String>;

    /// Chain-native text form of the secret
    fn encode_private_key(&self, secret: &SecretBytes) -> WalletResult<Zeroizing<String>>;

    fn derivation_path(&self, account_index: u32) -> DerivationPath {
        DerivationPath::new(self.network(), account_index)
    }

    fn derive_secret(&self, seed: &[u8], account_index: u32) -> WalletResult<SecretBytes> {
        let path = self.derivation_path(account_index).to_path_string();
        match self.network().curve() {
            CurveType::Secp256k1 => derive_secp256k1(seed, &path),
            CurveType::Ed25519 => derive_ed25519(seed, &path),
        }
    }

    fn derive(&self, seed: &[u8], account_index: u32) -> WalletResult<ChainKeys> {
        let secret = self.derive_secret(seed, account_index)?;
        Ok(ChainKeys {
            address: self.address(&secret)?,
            private_key: self.encode_private_key(&secret)?,
        })
    }
}

/// Deriver for a network
pub fn deriver_for(network: Network) -> &'static dyn ChainKeyDeriver {
    match network {
        Network::Bitcoin => &BitcoinDeriver,
        Network::Ethereum => &EthereumDeriver,
        Network::Solana => &SolanaDeriver,
        Network::Tron => &TronDeriver,
    }
}

pub(crate) fn secp256k1_public_key(secret: &SecretBytes) -> WalletResult<PublicKey> {
    let secret_key = SecretKey::from_byte_array(
        secret
            .as_slice()
            .try_into()
            .map_err(|_| WalletError::crypto("Invalid private key length"))?,
    )?;
    Ok(PublicKey::from_secret_key(&SECP256K1, &secret_key))
}

/// Keccak-256 of the uncompressed public key without its 0x04 tag, last 20 bytes
pub(crate) fn keccak_address_body(secret: &SecretBytes) -> WalletResult<[u8; 20]> {
    let public_key = secp256k1_public_key(secret)?.serialize_uncompressed();
    let hash = crate::shared::utils::keccak256(&public_key[1..]);
    let mut body = [0u8; 20];
    body.copy_from_slice(&hash[12..]);
    Ok(body)
}
