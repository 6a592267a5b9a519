//! Error handling for the wallet core
//!
//! This module defines the error types used throughout the wallet core.
//! Address validation failures are not errors: they are reported through
//! [`crate::core::validation::AddressValidationResult`].

use thiserror::Error;

/// Wallet error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported network: {0}")]
    UnsupportedNetwork(String),

    /// Tampered ciphertext, wrong key or malformed iv/tag. Never retried.
    #[error("Decryption failed: authentication error")]
    DecryptionFailed,

    #[error("Network error: {0}")]
    Network(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WalletError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a cryptographic error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an unsupported network error naming the requested network
    pub fn unsupported_network(network: impl Into<String>) -> Self {
        Self::UnsupportedNetwork(network.into())
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a user not found error
    pub fn user_not_found(user_id: impl Into<String>) -> Self {
        Self::UserNotFound(user_id.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Authentication failures must reach the caller and are never retried
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DecryptionFailed | Self::UnsupportedNetwork(_) | Self::Config(_)
        )
    }
}

impl From<hex::FromHexError> for WalletError {
    fn from(err: hex::FromHexError) -> Self {
        Self::validation(format!("Hex decoding error: {}", err))
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        Self::network(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for WalletError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network(format!("Request timed out: {}", err))
        } else {
            Self::network(format!("HTTP error: {}", err))
        }
    }
}

impl From<config::ConfigError> for WalletError {
    fn from(err: config::ConfigError) -> Self {
        Self::config(err.to_string())
    }
}

impl From<secp256k1::Error> for WalletError {
    fn from(err: secp256k1::Error) -> Self {
        Self::crypto(format!("Secp256k1 error: {}", err))
    }
}

// AEAD errors carry no detail; every failure is an authentication failure
impl From<aes_gcm::Error> for WalletError {
    fn from(_: aes_gcm::Error) -> Self {
        Self::DecryptionFailed
    }
}
