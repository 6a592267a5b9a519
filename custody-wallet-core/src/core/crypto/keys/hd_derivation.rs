//! Hierarchical key derivation over both supported curves
//!
//! secp256k1 follows BIP32 through the `bip32` crate. ed25519 follows
//! SLIP-0010, which only defines hardened children.

use crate::shared::constants::PRIVATE_KEY_SIZE;
use crate::shared::error::WalletError;
use crate::shared::WalletResult;
use bip32::{DerivationPath as Bip32Path, XPrv};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::str::FromStr;
use zeroize::{Zeroize, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

const SLIP10_ED25519_SEED_KEY: &[u8] = b"ed25519 seed";
const HARDENED_OFFSET: u32 = 0x8000_0000;

/// 32-byte secret scalar, wiped on drop
pub type SecretBytes = Zeroizing<[u8; PRIVATE_KEY_SIZE]>;

/// BIP32 private key at `path` below the master key of `seed`
pub fn derive_secp256k1(seed: &[u8], path: &str) -> WalletResult<SecretBytes> {
    let xprv = XPrv::new(seed)
        .map_err(|e| WalletError::crypto(format!("Failed to create XPrv: {}", e)))?;

    let derivation_path = Bip32Path::from_str(path)
        .map_err(|e| WalletError::crypto(format!("Invalid derivation path {}: {}", path, e)))?;

    let mut child_xprv = xprv;
    for child_number in derivation_path.into_iter() {
        child_xprv = child_xprv
            .derive_child(child_number)
            .map_err(|e| WalletError::crypto(format!("Failed to derive child XPrv: {}", e)))?;
    }

    let mut secret = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
    secret.copy_from_slice(&child_xprv.private_key().to_bytes());
    Ok(secret)
}

/// SLIP-0010 ed25519 private key at `path`; every segment must be hardened
pub fn derive_ed25519(seed: &[u8], path: &str) -> WalletResult<SecretBytes> {
    let indices = parse_hardened_path(path)?;

    let (mut key, mut chain_code) = slip10_split(SLIP10_ED25519_SEED_KEY, &[seed])?;

    for index in indices {
        let hardened = (index | HARDENED_OFFSET).to_be_bytes();
        let (child_key, child_chain) = slip10_split(&chain_code, &[&[0x00u8][..], &key[..], &hardened[..]])?;
        key.zeroize();
        chain_code.zeroize();
        key = child_key;
        chain_code = child_chain;
    }

    chain_code.zeroize();
    Ok(Zeroizing::new(key))
}

// I = HMAC-SHA512(key, data); IL is the child key, IR the chain code
fn slip10_split(hmac_key: &[u8], data: &[&[u8]]) -> WalletResult<([u8; 32], [u8; 32])> {
    let mut mac = HmacSha512::new_from_slice(hmac_key)
        .map_err(|e| WalletError::crypto(format!("HMAC init failed: {}", e)))?;
    for part in data {
        mac.update(part);
    }

    let mut output = Zeroizing::new([0u8; 64]);
    output.copy_from_slice(&mac.finalize().into_bytes());

    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&output[..32]);
    chain_code.copy_from_slice(&output[32..]);
    Ok((key, chain_code))
}

fn parse_hardened_path(path: &str) -> WalletResult<Vec<u32>> {
    let segments = path
        .trim()
        .strip_prefix("m/")
        .ok_or_else(|| WalletError::crypto(format!("Path must start with 'm/': {}", path)))?;

    segments
        .split('/')
        .map(|segment| {
            let number = segment
                .strip_suffix('\'')
                .or_else(|| segment.strip_suffix('h'))
                .ok_or_else(|| {
                    WalletError::crypto(format!(
                        "Ed25519 derivation requires hardened segments, got '{}'",
                        segment
                    ))
                })?;
            let index: u32 = number
                .parse()
                .map_err(|_| WalletError::crypto(format!("Invalid path index '{}'", number)))?;
            if index >= HARDENED_OFFSET {
                return Err(WalletError::crypto(format!("Path index {} out of range", index)));
            }
            Ok(index)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP39 seed of "abandon" x23 + "art"
    const TEST_SEED: &str = "408b285c123836004f4b8842c89324c1f01382450c0d439af345ba7fc49acf705489c6fc77dbd4e3dc1dd8cc6bc9f043db8ada1e243c4a0eafb290d399480840";

    fn seed() -> Vec<u8> {
        hex::decode(TEST_SEED).expect("hex seed")
    }

    #[test]
    fn test_secp256k1_known_key() {
        let key = derive_secp256k1(&seed(), "m/44'/60'/0'/0/0").expect("derive");
        assert_eq!(
            hex::encode(&*key),
            "1053fae1b3ac64f178bcc21026fd06a3f4544ec2f35338b001f02d1d8efa3d5f"
        );
    }

    #[test]
    fn test_secp256k1_rejects_bad_path() {
        assert!(derive_secp256k1(&seed(), "44'/60'").is_err());
        assert!(derive_secp256k1(&seed(), "m/abc").is_err());
    }

    #[test]
    fn test_slip10_master_vector() {
        // SLIP-0010 test vector 1, chain m
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").expect("hex");
        let (key, chain_code) = slip10_split(SLIP10_ED25519_SEED_KEY, &[seed.as_slice()]).expect("hmac");
        assert_eq!(
            hex::encode(key),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(chain_code),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
    }

    #[test]
    fn test_slip10_child_vector() {
        // SLIP-0010 test vector 1, chain m/0H
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").expect("hex");
        let key = derive_ed25519(&seed, "m/0'").expect("derive");
        assert_eq!(
            hex::encode(&*key),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
    }

    #[test]
    fn test_ed25519_requires_hardened_segments() {
        let err = derive_ed25519(&seed(), "m/44'/501'/0'/0").unwrap_err();
        assert!(err.to_string().contains("hardened"));
        assert!(derive_ed25519(&seed(), "44'/501'").is_err());
    }

    #[test]
    fn test_ed25519_indices_differ() {
        let a = derive_ed25519(&seed(), "m/44'/501'/0'/0'").expect("derive");
        let b = derive_ed25519(&seed(), "m/44'/501'/1'/0'").expect("derive");
        assert_ne!(&*a, &*b);
    }
}
