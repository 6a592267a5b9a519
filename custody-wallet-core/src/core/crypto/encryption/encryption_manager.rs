use super::SealedSecret;
use crate::shared::constants::{MASTER_KEY_HEX_LENGTH, MASTER_KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use crate::shared::error::WalletError;
use crate::shared::WalletResult;
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use rand_core::{OsRng, RngCore};
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroizing;

/// Process-wide 256-bit master key, read-only after startup
pub struct MasterKey(Zeroizing<[u8; MASTER_KEY_SIZE]>);

impl MasterKey {
    pub fn from_bytes(bytes: [u8; MASTER_KEY_SIZE]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Parse the configured 64-hex-character key
    pub fn from_hex(encoded: &str) -> WalletResult<Self> {
        let encoded = encoded.trim();
        if encoded.len() != MASTER_KEY_HEX_LENGTH {
            return Err(WalletError::config(format!(
                "Master encryption key must be {} hex characters",
                MASTER_KEY_HEX_LENGTH
            )));
        }

        let mut bytes = Zeroizing::new([0u8; MASTER_KEY_SIZE]);
        hex::decode_to_slice(encoded, &mut *bytes)
            .map_err(|_| WalletError::config("Master encryption key is not valid hex"))?;
        Ok(Self(bytes))
    }

    /// Generate a random key, e.g. for provisioning a new deployment
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0u8; MASTER_KEY_SIZE]);
        OsRng.fill_bytes(&mut *bytes);
        Self(bytes)
    }

    fn as_bytes(&self) -> &[u8; MASTER_KEY_SIZE] {
        &self.0
    }
}

// Never print key material
impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey([REDACTED])")
    }
}

/// AES-256-GCM sealing of secrets under the master key.
///
/// Cloning shares the key; it is never mutated, so concurrent use needs no
/// locking.
#[derive(Clone)]
pub struct EncryptionService {
    key: Arc<MasterKey>,
}

impl EncryptionService {
    pub fn new(key: MasterKey) -> Self {
        Self { key: Arc::new(key) }
    }

    pub fn from_shared(key: Arc<MasterKey>) -> Self {
        Self { key }
    }

    /// Encrypt with a fresh random nonce
    pub fn seal(&self, plaintext: &[u8]) -> WalletResult<SealedSecret> {
        if plaintext.is_empty() {
            return Err(WalletError::validation("Refusing to seal an empty secret"));
        }

        let nonce_bytes = self.generate_nonce();
        let nonce = Nonce::from_slice(&nonce_bytes);

        let mut sealed = self
            .cipher()
            .encrypt(nonce, plaintext)
            .map_err(|e| WalletError::crypto(format!("AES-GCM encryption failed: {}", e)))?;

        // aes-gcm appends the tag to the ciphertext
        let auth_tag = sealed.split_off(sealed.len() - TAG_SIZE);

        Ok(SealedSecret {
            ciphertext: sealed,
            iv: nonce_bytes.to_vec(),
            auth_tag,
        })
    }

    /// Decrypt and authenticate; fails closed with `DecryptionFailed`
    pub fn open(&self, sealed: &SealedSecret) -> WalletResult<Zeroizing<Vec<u8>>> {
        if !sealed.has_valid_lengths() {
            log::warn!(
                "Rejecting sealed secret with iv of {} bytes and tag of {} bytes",
                sealed.iv.len(),
                sealed.auth_tag.len()
            );
            return Err(WalletError::DecryptionFailed);
        }

        let nonce = Nonce::from_slice(&sealed.iv);
        let mut ciphertext_with_tag = Vec::with_capacity(sealed.ciphertext.len() + TAG_SIZE);
        ciphertext_with_tag.extend_from_slice(&sealed.ciphertext);
        ciphertext_with_tag.extend_from_slice(&sealed.auth_tag);

        let plaintext = self
            .cipher()
            .decrypt(nonce, ciphertext_with_tag.as_slice())
            .map_err(|_| {
                log::warn!("Sealed secret failed authentication");
                WalletError::DecryptionFailed
            })?;

        Ok(Zeroizing::new(plaintext))
    }

    /// Open from the three hex columns kept by persistence
    pub fn open_hex(&self, ciphertext: &str, iv: &str, auth_tag: &str) -> WalletResult<Zeroizing<Vec<u8>>> {
        let sealed = SealedSecret::from_hex_parts(ciphertext, iv, auth_tag)?;
        self.open(&sealed)
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.key.as_bytes()))
    }

    fn generate_nonce(&self) -> [u8; NONCE_SIZE] {
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce);
        nonce
    }
}

impl fmt::Debug for EncryptionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionService")
            .field("key", &self.key)
            .finish()
    }
}
