use super::ChainKeyDeriver;
use crate::core::crypto::keys::hd_derivation::SecretBytes;
use crate::domain::entities::Network;
use crate::shared::WalletResult;
use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

/// SLIP-0010 ed25519 keys; address is the base58 public key
pub struct SolanaDeriver;

impl ChainKeyDeriver for SolanaDeriver {
    fn network(&self) -> Network {
        Network::Solana
    }

    fn address(&self, secret: &SecretBytes) -> WalletResult<String> {
        let signing_key = SigningKey::from_bytes(secret);
        Ok(bs58::encode(signing_key.verifying_key().as_bytes()).into_string())
    }

    // 64-byte keypair (secret || public), the layout wallets import
    fn encode_private_key(&self, secret: &SecretBytes) -> WalletResult<Zeroizing<String>> {
        let signing_key = SigningKey::from_bytes(secret);
        let keypair = Zeroizing::new(signing_key.to_keypair_bytes());
        Ok(Zeroizing::new(bs58::encode(&keypair[..]).into_string()))
    }
}
