//! Custody Wallet Core
//!
//! Key custody for a multi-chain exchange wallet.
//! Handles all cryptographic operations and sensitive data management in Rust.
//!
//! ## Architecture
//!
//! - **Core**: encryption, HD derivation, per-chain encodings, address
//!   validation, fee estimation and retry
//! - **Domain**: currencies, networks, derived wallets and the persistence trait
//! - **Infrastructure**: configuration and logging
//! - **Shared**: common types, constants, errors and utilities
//!
//! ## Security Features
//!
//! - Master secrets are sealed with AES-256-GCM before they leave the core
//! - Decrypted mnemonics and private keys are zeroized on drop
//! - Secrets are redacted from every `Debug` implementation
//!
//! ## Usage
//!
//! ```ignore
//! use custody_wallet_core::{init_wallet_core, Currency};
//!
//! let core = init_wallet_core(repository)?;
//!
//! // New user: only the sealed secret and the public addresses come back
//! let set = core.create_wallet_set(0)?;
//!
//! // Sweep: re-derive one key transiently from the stored record
//! let key = core.regenerate_private_key("user-42", Currency::UsdtTrc20).await?;
//! ```

use std::sync::Arc;
use zeroize::Zeroizing;

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod shared;

use crate::core::crypto::encryption::{EncryptionService, SealedSecret};
use crate::core::crypto::keys::{KeyDerivationEngine, MasterSecret};
use crate::core::fees::{FeeEstimator, HttpTronNodeClient, PriceCache, TronNodeClient};
use crate::core::validation::{AddressValidationResult, AddressValidator};
use crate::domain::repositories::UserSecretRepository;
use crate::shared::types::{AccountIndex, WalletSet};

// Re-export specific components
pub use crate::core::fees::{EstimationError, FeeSettings, GasEstimate};
pub use crate::core::retry::{with_retry, RetryOptions};
pub use crate::domain::entities::{Currency, DerivationPath, DerivedWallet, Network, WalletAddress};
pub use crate::domain::repositories::UserSecretRecord;
pub use crate::infrastructure::{init_logging, WalletCoreConfig};
pub use crate::shared::error::WalletError;
pub use crate::shared::types::WalletResult;

// Version information
pub use crate::shared::constants::{NAME, VERSION};

/// Load configuration from the environment, start logging and wire a
/// [`WalletCore`] against the configured Tron node
pub fn init_wallet_core(repository: Arc<dyn UserSecretRepository>) -> WalletResult<WalletCore> {
    let config = WalletCoreConfig::from_env()?;
    init_logging(&config.log_level);

    let client = HttpTronNodeClient::new(
        &config.tron_node_url,
        config.tron_api_key.as_deref(),
        config.rpc_timeout(),
    )?;

    log::info!("{} {} starting, Tron node {}", NAME, VERSION, config.tron_node_url);
    WalletCore::new(&config, repository, Arc::new(client))
}

/// Main wallet core struct that provides access to all functionality
pub struct WalletCore {
    engine: KeyDerivationEngine,
    fees: FeeEstimator,
    repository: Arc<dyn UserSecretRepository>,
}

impl WalletCore {
    pub fn new(
        config: &WalletCoreConfig,
        repository: Arc<dyn UserSecretRepository>,
        client: Arc<dyn TronNodeClient>,
    ) -> WalletResult<Self> {
        config.validate()?;
        let encryption = EncryptionService::new(config.master_key()?);

        Ok(Self {
            engine: KeyDerivationEngine::new(encryption),
            fees: FeeEstimator::new(client, config.fee_settings()),
            repository,
        })
    }

    pub fn generate_mnemonic(&self) -> WalletResult<MasterSecret> {
        self.engine.generate_mnemonic()
    }

    pub fn derive_wallet(
        &self,
        secret: &MasterSecret,
        currency: Currency,
        account_index: AccountIndex,
    ) -> WalletResult<DerivedWallet> {
        self.engine.derive_wallet(secret, currency, account_index)
    }

    pub fn derive_all_standard_wallets(
        &self,
        secret: &MasterSecret,
        account_index: AccountIndex,
    ) -> WalletResult<Vec<DerivedWallet>> {
        self.engine.derive_all_standard_wallets(secret, account_index)
    }

    pub fn create_wallet_set(&self, account_index: AccountIndex) -> WalletResult<WalletSet> {
        self.engine.create_wallet_set(account_index)
    }

    /// Re-derive one private key for a user from their stored sealed secret.
    ///
    /// Fails with [`WalletError::UserNotFound`] when the repository has no record.
    pub async fn regenerate_private_key(
        &self,
        user_id: &str,
        currency: Currency,
    ) -> WalletResult<Zeroizing<String>> {
        let record = self
            .repository
            .find_user_secret(user_id)
            .await?
            .ok_or_else(|| WalletError::user_not_found(user_id))?;

        let sealed = record.sealed_secret()?;
        self.engine
            .regenerate_private_key(&sealed, currency, record.wallet_derivation_index)
            .inspect_err(|e| {
                if e.is_fatal() {
                    log::error!("Key regeneration failed for user {}: {}", user_id, e);
                } else {
                    log::warn!("Key regeneration failed for user {}: {}", user_id, e);
                }
            })
    }

    pub fn seal(&self, plaintext: &[u8]) -> WalletResult<SealedSecret> {
        self.engine.encryption().seal(plaintext)
    }

    pub fn open(&self, sealed: &SealedSecret) -> WalletResult<Zeroizing<Vec<u8>>> {
        self.engine.encryption().open(sealed)
    }

    /// Open the three hex columns as stored by the persistence layer
    pub fn open_hex(&self, ciphertext: &str, iv: &str, auth_tag: &str) -> WalletResult<Zeroizing<Vec<u8>>> {
        self.engine.encryption().open_hex(ciphertext, iv, auth_tag)
    }

    pub fn validate_address(&self, address: &str, currency: &str) -> AddressValidationResult {
        AddressValidator::validate(address, currency)
    }

    /// Sweep fee in TRX, the configured fallback when the node cannot answer
    pub async fn estimate_fee(&self, from: &str, to: &str, amount: &str) -> u64 {
        self.fees.estimate_fee(from, to, amount).await
    }

    pub async fn estimate_fee_with_price(
        &self,
        from: &str,
        to: &str,
        amount: &str,
        cache: &PriceCache,
        max_age: chrono::Duration,
    ) -> u64 {
        self.fees
            .estimate_fee_with_price(from, to, amount, cache, max_age)
            .await
    }

    pub async fn refresh_energy_price(&self) -> WalletResult<PriceCache> {
        self.fees.refresh_energy_price().await
    }

    pub fn fee_settings(&self) -> &FeeSettings {
        self.fees.settings()
    }
}
