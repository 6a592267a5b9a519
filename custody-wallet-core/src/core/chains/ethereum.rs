use super::{keccak_address_body, ChainKeyDeriver};
use crate::core::crypto::keys::hd_derivation::SecretBytes;
use crate::domain::entities::Network;
use crate::shared::utils::{bytes_to_hex, keccak256};
use crate::shared::WalletResult;
use zeroize::Zeroizing;

/// EIP-55 addresses and 0x-prefixed hex keys
pub struct EthereumDeriver;

impl EthereumDeriver {
    /// EIP-55 mixed-case form of a 40-character hex body (no `0x`).
    ///
    /// A hex letter is uppercased when the matching nibble of
    /// keccak256(lowercase body) is 8 or more.
    pub fn to_checksum_address(body: &str) -> String {
        let lower = body.to_ascii_lowercase();
        let hash = keccak256(lower.as_bytes());

        let checksummed: String = lower
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
                if c.is_ascii_alphabetic() && nibble >= 8 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect();

        format!("0x{}", checksummed)
    }
}

impl ChainKeyDeriver for EthereumDeriver {
    fn network(&self) -> Network {
        Network::Ethereum
    }

    fn address(&self, secret: &SecretBytes) -> WalletResult<String> {
        let body = keccak_address_body(secret)?;
        Ok(Self::to_checksum_address(&hex::encode(body)))
    }

    fn encode_private_key(&self, secret: &SecretBytes) -> WalletResult<Zeroizing<String>> {
        Ok(Zeroizing::new(bytes_to_hex(&secret[..])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::crypto::keys::hd_derivation::derive_secp256k1;

    const TEST_SEED: &str = "408b285c123836004f4b8842c89324c1f01382450c0d439af345ba7fc49acf705489c6fc77dbd4e3dc1dd8cc6bc9f043db8ada1e243c4a0eafb290d399480840";

    #[test]
    fn test_known_wallets() {
        let seed = hex::decode(TEST_SEED).expect("hex seed");

        let first = EthereumDeriver.derive(&seed, 0).expect("derive");
        assert_eq!(first.address, "0xF278cF59F82eDcf871d630F28EcC8056f25C1cdb");
        assert_eq!(
            first.private_key.as_str(),
            "0x1053fae1b3ac64f178bcc21026fd06a3f4544ec2f35338b001f02d1d8efa3d5f"
        );

        let second = EthereumDeriver.derive(&seed, 1).expect("derive");
        assert_eq!(second.address, "0xf785bD075874b8423D3583728a981399f31e95aA");
        assert_eq!(
            second.private_key.as_str(),
            "0x0855b75d03a8830e390b5483d81694c9c7121d971e092145cf8b9c6fa3a5b373"
        );
    }

    #[test]
    fn test_bip44_reference_vector() {
        // "abandon" x11 + "about", first account of the standard path
        let mnemonic = bip39::Mnemonic::parse_in_normalized(
            bip39::Language::English,
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        )
        .expect("valid mnemonic");
        let seed = mnemonic.to_seed_normalized("");
        let secret = derive_secp256k1(&seed, "m/44'/60'/0'/0/0").expect("derive");
        assert_eq!(
            EthereumDeriver.address(&secret).expect("address"),
            "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
        );
    }

    #[test]
    fn test_eip55_reference() {
        assert_eq!(
            EthereumDeriver::to_checksum_address("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }
}
