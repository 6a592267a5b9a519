//! Utility functions for the wallet core
//!
//! This module contains common hashing, encoding and amount helpers used
//! throughout the wallet core.

use crate::shared::constants::{TRON_DECODED_ADDRESS_SIZE, TRON_HEX_ADDRESS_LENGTH};
use crate::shared::error::WalletError;
use crate::shared::WalletResult;

const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Calculate SHA256 hash
pub fn sha256_hash(data: &[u8]) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Calculate RIPEMD160(SHA256(data)), the Bitcoin HASH160
pub fn hash160(data: &[u8]) -> [u8; 20] {
    use ripemd::{Digest, Ripemd160};
    let mut hasher = Ripemd160::new();
    hasher.update(sha256_hash(data));
    hasher.finalize().into()
}

/// Keccak256 hash function
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    use sha3::{Digest, Keccak256};
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Base58 with a 4-byte double-SHA256 checksum appended
pub fn base58check_encode(payload: &[u8]) -> String {
    bs58::encode(payload).with_check().into_string()
}

/// Convert bytes to a 0x-prefixed hex string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Convert a base58 address to the chain-native hex form.
///
/// Multiply-accumulates the digits into a big-endian buffer, left-pads it to
/// the 25-byte decoded width and keeps the first 42 hex characters (version
/// byte and 20-byte body), dropping the checksum. Inputs with characters
/// outside the alphabet, or whose value does not fit in 25 bytes, are rejected.
pub fn base58_to_hex(address: &str) -> WalletResult<String> {
    if address.is_empty() {
        return Err(WalletError::validation("Address cannot be empty"));
    }

    let mut bytes: Vec<u8> = Vec::with_capacity(TRON_DECODED_ADDRESS_SIZE);
    for c in address.bytes() {
        let digit = BASE58_ALPHABET
            .iter()
            .position(|&a| a == c)
            .ok_or_else(|| {
                WalletError::validation(format!("Invalid base58 character '{}'", c as char))
            })?;

        let mut carry = digit as u32;
        for byte in bytes.iter_mut().rev() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.insert(0, (carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    if bytes.len() > TRON_DECODED_ADDRESS_SIZE {
        return Err(WalletError::validation(format!(
            "Decoded address is {} bytes, expected at most {}",
            bytes.len(),
            TRON_DECODED_ADDRESS_SIZE
        )));
    }

    let mut padded = vec![0u8; TRON_DECODED_ADDRESS_SIZE - bytes.len()];
    padded.extend_from_slice(&bytes);

    let mut encoded = hex::encode(padded);
    encoded.truncate(TRON_HEX_ADDRESS_LENGTH);
    Ok(encoded)
}

/// Scale a decimal amount string to integer smallest units.
///
/// Digits beyond `decimals` are truncated.
pub fn parse_units(amount: &str, decimals: u32) -> WalletResult<u128> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(WalletError::validation("Amount cannot be empty"));
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(WalletError::validation("Invalid amount format"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(WalletError::validation("Invalid amount format"));
    }

    let scale = 10u128
        .checked_pow(decimals)
        .ok_or_else(|| WalletError::validation("Too many decimals"))?;

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .map_err(|_| WalletError::validation("Amount is too large"))?
    };

    let mut fraction_digits: String = fraction.chars().take(decimals as usize).collect();
    while fraction_digits.len() < decimals as usize {
        fraction_digits.push('0');
    }
    let fraction_units = if fraction_digits.is_empty() {
        0
    } else {
        fraction_digits
            .parse::<u128>()
            .map_err(|_| WalletError::validation("Invalid amount format"))?
    };

    whole_units
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fraction_units))
        .ok_or_else(|| WalletError::validation("Amount is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hash() {
        let digest = sha256_hash(b"abc");
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_base58_to_hex_usdt_contract() {
        let hex = base58_to_hex("TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t").expect("valid address");
        assert_eq!(hex, "41a614f803b6fd780986a42c78ec9c7f77e6ded13c");
        assert_eq!(hex.len(), TRON_HEX_ADDRESS_LENGTH);
    }

    #[test]
    fn test_base58_to_hex_matches_bs58() {
        let address = "TLa2f6VPqDgRE67v1736s7bJ8Ray5wYjU7";
        let decoded = bs58::decode(address).into_vec().expect("base58");
        let expected = hex::encode(&decoded[..21]);
        assert_eq!(base58_to_hex(address).expect("valid address"), expected);
    }

    #[test]
    fn test_base58_to_hex_rejects_bad_input() {
        assert!(base58_to_hex("").is_err());
        assert!(base58_to_hex("T0OIl").is_err());
        // 40 base58 digits cannot fit in 25 bytes
        assert!(base58_to_hex(&"z".repeat(40)).is_err());
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("1", 6).expect("amount"), 1_000_000);
        assert_eq!(parse_units("12.5", 6).expect("amount"), 12_500_000);
        assert_eq!(parse_units("0.000001", 6).expect("amount"), 1);
        assert_eq!(parse_units(".5", 6).expect("amount"), 500_000);
        // extra precision is truncated
        assert_eq!(parse_units("1.23456789", 6).expect("amount"), 1_234_567);
    }

    #[test]
    fn test_parse_units_rejects_invalid() {
        assert!(parse_units("", 6).is_err());
        assert!(parse_units(".", 6).is_err());
        assert!(parse_units("-1", 6).is_err());
        assert!(parse_units("1.2.3", 6).is_err());
        assert!(parse_units("abc", 6).is_err());
    }
}
