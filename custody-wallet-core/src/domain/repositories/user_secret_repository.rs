//! User secret repository
//!
//! The persistence collaborator owns the user record; this core only reads
//! the three sealed columns and the derivation index.

use crate::core::crypto::encryption::SealedSecret;
use crate::shared::error::WalletError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sealed-secret columns of a user record, hex encoded as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSecretRecord {
    pub encrypted_mnemonic: String,
    pub mnemonic_iv: String,
    pub mnemonic_auth_tag: String,
    pub wallet_derivation_index: u32,
}

impl UserSecretRecord {
    /// Build the columns for a freshly sealed secret
    pub fn from_sealed(sealed: &SealedSecret, wallet_derivation_index: u32) -> Self {
        let (encrypted_mnemonic, mnemonic_iv, mnemonic_auth_tag) = sealed.to_hex_parts();
        Self {
            encrypted_mnemonic,
            mnemonic_iv,
            mnemonic_auth_tag,
            wallet_derivation_index,
        }
    }

    /// Malformed hex in any column is treated as tampering
    pub fn sealed_secret(&self) -> Result<SealedSecret, WalletError> {
        SealedSecret::from_hex_parts(
            &self.encrypted_mnemonic,
            &self.mnemonic_iv,
            &self.mnemonic_auth_tag,
        )
    }
}

/// Read access to users' sealed master secrets
#[async_trait]
pub trait UserSecretRepository: Send + Sync {
    /// Fetch the sealed secret columns for a user, `None` if the user is unknown
    async fn find_user_secret(&self, user_id: &str) -> Result<Option<UserSecretRecord>, WalletError>;
}
