use crate::shared::constants::{NONCE_SIZE, TAG_SIZE};
use crate::shared::error::WalletError;
use serde::{Deserialize, Serialize};

/// Sealed secret: the only persisted form of a master secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedSecret {
    pub ciphertext: Vec<u8>,
    pub iv: Vec<u8>,
    pub auth_tag: Vec<u8>,
}

impl SealedSecret {
    /// True when iv and tag have the AES-GCM sizes
    pub fn has_valid_lengths(&self) -> bool {
        self.iv.len() == NONCE_SIZE && self.auth_tag.len() == TAG_SIZE
    }

    /// Hex columns `(ciphertext, iv, auth_tag)` as stored by persistence
    pub fn to_hex_parts(&self) -> (String, String, String) {
        (
            hex::encode(&self.ciphertext),
            hex::encode(&self.iv),
            hex::encode(&self.auth_tag),
        )
    }

    pub fn from_hex_parts(ciphertext: &str, iv: &str, auth_tag: &str) -> Result<Self, WalletError> {
        let decode = |s: &str| hex::decode(s).map_err(|_| WalletError::DecryptionFailed);
        Ok(Self {
            ciphertext: decode(ciphertext)?,
            iv: decode(iv)?,
            auth_tag: decode(auth_tag)?,
        })
    }
}
