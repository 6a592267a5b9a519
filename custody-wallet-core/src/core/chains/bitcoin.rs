use super::{secp256k1_public_key, ChainKeyDeriver};
use crate::core::crypto::keys::hd_derivation::SecretBytes;
use crate::domain::entities::Network;
use crate::shared::constants::{BITCOIN_P2PKH_VERSION, BITCOIN_WIF_COMPRESSED_FLAG, BITCOIN_WIF_VERSION};
use crate::shared::utils::{base58check_encode, hash160};
use crate::shared::WalletResult;
use zeroize::Zeroizing;

/// Legacy P2PKH addresses and compressed mainnet WIF keys
pub struct BitcoinDeriver;

impl ChainKeyDeriver for BitcoinDeriver {
    fn network(&self) -> Network {
        Network::Bitcoin
    }

    fn address(&self, secret: &SecretBytes) -> WalletResult<String> {
        let public_key = secp256k1_public_key(secret)?.serialize();
        let mut payload = [0u8; 21];
        payload[0] = BITCOIN_P2PKH_VERSION;
        payload[1..].copy_from_slice(&hash160(&public_key));
        Ok(base58check_encode(&payload))
    }

    fn encode_private_key(&self, secret: &SecretBytes) -> WalletResult<Zeroizing<String>> {
        let mut payload = Zeroizing::new([0u8; 34]);
        payload[0] = BITCOIN_WIF_VERSION;
        payload[1..33].copy_from_slice(&secret[..]);
        payload[33] = BITCOIN_WIF_COMPRESSED_FLAG;
        Ok(Zeroizing::new(base58check_encode(&payload[..])))
    }
}
