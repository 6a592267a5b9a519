use crate::shared::constants::{
    MNEMONIC_ENTROPY_SIZE, MNEMONIC_MAX_PHRASE_LENGTH, MNEMONIC_WORD_COUNT, SEED_SIZE,
};
use crate::shared::error::WalletError;
use crate::shared::WalletResult;
use bip39::{Language, Mnemonic};
use rand_core::{OsRng, RngCore};
use std::fmt;
use zeroize::Zeroizing;

/// BIP39 master secret of one user.
///
/// The phrase is zeroized on drop and never printed.
pub struct MasterSecret {
    phrase: Zeroizing<String>,
}

impl MasterSecret {
    /// Fresh 24-word mnemonic from 256 bits of OS entropy
    pub fn generate() -> WalletResult<Self> {
        let mut entropy = Zeroizing::new([0u8; MNEMONIC_ENTROPY_SIZE]);
        OsRng.fill_bytes(&mut *entropy);

        let mnemonic = Zeroizing::new(
            Mnemonic::from_entropy(&*entropy)
                .map_err(|e| WalletError::crypto(format!("Failed to generate mnemonic: {}", e)))?,
        );

        Ok(Self {
            phrase: join_words(&mnemonic),
        })
    }

    /// Validate a stored phrase: English wordlist, checksum, 24 words
    pub fn parse(phrase: &str) -> WalletResult<Self> {
        let mnemonic = Zeroizing::new(
            Mnemonic::parse_in_normalized(Language::English, phrase.trim())
                .map_err(|e| WalletError::validation(format!("Invalid BIP39 mnemonic: {}", e)))?,
        );

        if mnemonic.word_count() != MNEMONIC_WORD_COUNT {
            return Err(WalletError::validation(format!(
                "Mnemonic must have {} words, got {}",
                MNEMONIC_WORD_COUNT,
                mnemonic.word_count()
            )));
        }

        Ok(Self {
            phrase: join_words(&mnemonic),
        })
    }

    /// Parse the plaintext produced by opening a sealed secret
    pub fn from_utf8(bytes: &[u8]) -> WalletResult<Self> {
        let phrase = std::str::from_utf8(bytes)
            .map_err(|_| WalletError::validation("Master secret is not valid UTF-8"))?;
        Self::parse(phrase)
    }

    pub fn as_str(&self) -> &str {
        &self.phrase
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.phrase.as_bytes()
    }

    /// BIP39 seed with an empty passphrase
    pub fn to_seed(&self) -> WalletResult<Zeroizing<[u8; SEED_SIZE]>> {
        let mnemonic = Zeroizing::new(
            Mnemonic::parse_in_normalized(Language::English, &self.phrase)
                .map_err(|e| WalletError::crypto(format!("Invalid BIP39 mnemonic: {}", e)))?,
        );
        Ok(Zeroizing::new(mnemonic.to_seed_normalized("")))
    }
}

// Written into a buffer sized for the longest phrase so it never reallocates
// and leaves partial copies behind.
fn join_words(mnemonic: &Mnemonic) -> Zeroizing<String> {
    let mut phrase = Zeroizing::new(String::with_capacity(MNEMONIC_MAX_PHRASE_LENGTH));
    for (i, word) in mnemonic.words().enumerate() {
        if i > 0 {
            phrase.push(' ');
        }
        phrase.push_str(word);
    }
    phrase
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterSecret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

    #[test]
    fn test_generate_24_words() {
        let secret = MasterSecret::generate().expect("Failed to generate mnemonic");
        assert_eq!(secret.as_str().split_whitespace().count(), MNEMONIC_WORD_COUNT);
        assert!(MasterSecret::parse(secret.as_str()).is_ok());
    }

    #[test]
    fn test_generated_secrets_differ() {
        let a = MasterSecret::generate().expect("mnemonic");
        let b = MasterSecret::generate().expect("mnemonic");
        assert_ne!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_known_seed() {
        let secret = MasterSecret::parse(TEST_MNEMONIC).expect("valid mnemonic");
        let seed = secret.to_seed().expect("seed");
        assert_eq!(
            hex::encode(&*seed),
            "408b285c123836004f4b8842c89324c1f01382450c0d439af345ba7fc49acf705489c6fc77dbd4e3dc1dd8cc6bc9f043db8ada1e243c4a0eafb290d399480840"
        );
    }

    #[test]
    fn test_parse_rejects_invalid_phrases() {
        // bad checksum
        let bad_checksum = TEST_MNEMONIC.replace(" art", " abandon");
        assert!(matches!(MasterSecret::parse(&bad_checksum), Err(WalletError::Validation(_))));

        // valid 12-word phrase, wrong length for this engine
        let twelve = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        assert!(matches!(MasterSecret::parse(twelve), Err(WalletError::Validation(_))));

        assert!(MasterSecret::parse("not a mnemonic").is_err());
        assert!(MasterSecret::from_utf8(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_mnemonic_is_wiped_on_drop() {
        fn assert_zeroize<T: zeroize::Zeroize>() {}
        assert_zeroize::<Mnemonic>();

        let secret = MasterSecret::parse(&format!("  {}  ", TEST_MNEMONIC)).expect("valid mnemonic");
        assert_eq!(secret.as_str(), TEST_MNEMONIC);
        assert!(secret.phrase.capacity() <= MNEMONIC_MAX_PHRASE_LENGTH);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = MasterSecret::parse(TEST_MNEMONIC).expect("valid mnemonic");
        assert!(!format!("{:?}", secret).contains("abandon"));
    }
}
