use super::{keccak_address_body, ChainKeyDeriver};
use crate::core::crypto::keys::hd_derivation::SecretBytes;
use crate::domain::entities::Network;
use crate::shared::constants::TRON_ADDRESS_PREFIX;
use crate::shared::utils::base58check_encode;
use crate::shared::WalletResult;
use zeroize::Zeroizing;

/// Tron shares Ethereum's address body under a 0x41 version byte
pub struct TronDeriver;

impl TronDeriver {
    /// Base58check form of a 21-byte `0x41 || body` address
    pub fn encode_address(body: &[u8; 20]) -> String {
        let mut payload = [0u8; 21];
        payload[0] = TRON_ADDRESS_PREFIX;
        payload[1..].copy_from_slice(body);
        base58check_encode(&payload)
    }
}

impl ChainKeyDeriver for TronDeriver {
    fn network(&self) -> Network {
        Network::Tron
    }

    fn address(&self, secret: &SecretBytes) -> WalletResult<String> {
        Ok(Self::encode_address(&keccak_address_body(secret)?))
    }

    // Tron tooling imports keys as bare hex
    fn encode_private_key(&self, secret: &SecretBytes) -> WalletResult<Zeroizing<String>> {
        Ok(Zeroizing::new(hex::encode(&secret[..])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SEED: &str = "408b285c123836004f4b8842c89324c1f01382450c0d439af345ba7fc49acf705489c6fc77dbd4e3dc1dd8cc6bc9f043db8ada1e243c4a0eafb290d399480840";

    #[test]
    fn test_known_wallets() {
        let seed = hex::decode(TEST_SEED).expect("hex seed");

        let first = TronDeriver.derive(&seed, 0).expect("derive");
        assert_eq!(first.address, "TEfhiqsW1SdN44DeHrAWVmbyr8ZbvChrtS");
        assert_eq!(
            first.private_key.as_str(),
            "8ede55b42e315eb58ad4d98cbb3be223ae197708e015d8b635a47696f920c1a3"
        );

        let second = TronDeriver.derive(&seed, 1).expect("derive");
        assert_eq!(second.address, "TBNqMYHXhL8hH3Ruj2VtXimvpEtNTzWi28");
    }

    #[test]
    fn test_address_shape() {
        let address = TronDeriver::encode_address(&[0u8; 20]);
        assert!(address.starts_with('T'));
        assert_eq!(address.len(), 34);
    }
}
