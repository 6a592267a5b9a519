//! Constants for the wallet core
//!
//! This module contains all constants used throughout the wallet core.

// Security constants
pub const PRIVATE_KEY_SIZE: usize = 32;
pub const SEED_SIZE: usize = 64;
pub const MASTER_KEY_SIZE: usize = 32;
pub const MASTER_KEY_HEX_LENGTH: usize = 64;
pub const NONCE_SIZE: usize = 12;
pub const TAG_SIZE: usize = 16;
pub const MNEMONIC_ENTROPY_SIZE: usize = 32;
pub const MNEMONIC_WORD_COUNT: usize = 24;
// 24 words of at most 8 letters plus separators
pub const MNEMONIC_MAX_PHRASE_LENGTH: usize = MNEMONIC_WORD_COUNT * 9;

// BIP-44 coin types
pub const BITCOIN_COIN_TYPE: u32 = 0;
pub const ETHEREUM_COIN_TYPE: u32 = 60;
pub const TRON_COIN_TYPE: u32 = 195;
pub const SOLANA_COIN_TYPE: u32 = 501;

// Address encoding
pub const BITCOIN_P2PKH_VERSION: u8 = 0x00;
pub const BITCOIN_WIF_VERSION: u8 = 0x80;
pub const BITCOIN_WIF_COMPRESSED_FLAG: u8 = 0x01;
pub const TRON_ADDRESS_PREFIX: u8 = 0x41;
pub const TRON_ADDRESS_LENGTH: usize = 34;
pub const TRON_HEX_ADDRESS_LENGTH: usize = 42;
pub const TRON_DECODED_ADDRESS_SIZE: usize = 25;
pub const ETHEREUM_ADDRESS_LENGTH: usize = 42;
pub const SOLANA_MIN_ADDRESS_LENGTH: usize = 32;
pub const SOLANA_MAX_ADDRESS_LENGTH: usize = 44;

// Internal ledger placeholder
pub const INTERNAL_LEDGER_ADDRESS: &str = "INTERNAL_LEDGER";
pub const NO_PRIVATE_KEY: &str = "NO_PRIVATE_KEY";

// Fee estimation defaults
pub const SUN_PER_TRX: u128 = 1_000_000;
pub const TRC20_DECIMALS: u32 = 6;
pub const TRC20_TRANSFER_SELECTOR: &str = "transfer(address,uint256)";
pub const DEFAULT_ENERGY_USED: u64 = 65_000;
pub const DEFAULT_ENERGY_PRICE_SUN: u64 = 420;
pub const DEFAULT_FEE_SAFETY_MULTIPLIER: f64 = 1.2;
pub const DEFAULT_FALLBACK_FEE_TRX: u64 = 30;
pub const BASIS_POINTS: u128 = 10_000;

// Retry defaults
pub const DEFAULT_RETRY_COUNT: u32 = 3;
pub const DEFAULT_RETRY_INITIAL_DELAY_MS: u64 = 1000;
pub const DEFAULT_RETRY_BACKOFF_FACTOR: f64 = 2.0;

// Network defaults
pub const DEFAULT_TRON_NODE_URL: &str = "https://api.trongrid.io";
pub const DEFAULT_USDT_TRC20_CONTRACT: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 10_000;
pub const TRON_API_KEY_HEADER: &str = "TRON-PRO-API-KEY";

// Configuration
pub const CONFIG_ENV_PREFIX: &str = "WALLET_CORE";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Build information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_constants() {
        assert_eq!(PRIVATE_KEY_SIZE, 32);
        assert_eq!(MASTER_KEY_HEX_LENGTH, MASTER_KEY_SIZE * 2);
        assert_eq!(NONCE_SIZE, 12);
        assert_eq!(TAG_SIZE, 16);
        assert_eq!(MNEMONIC_ENTROPY_SIZE * 8, 256);
    }

    #[test]
    fn test_tron_address_constants() {
        // version byte + 20-byte body, hex encoded
        assert_eq!(TRON_HEX_ADDRESS_LENGTH, 2 * 21);
        // body plus 4-byte checksum
        assert_eq!(TRON_DECODED_ADDRESS_SIZE, 21 + 4);
    }
}
