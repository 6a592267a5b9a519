//! Key derivation engine
//!
//! Turns a user's master secret into per-currency wallets. Nothing derived
//! here outlives the call that asked for it.

use super::MasterSecret;
use crate::core::chains::{deriver_for, ChainKeyDeriver};
use crate::core::crypto::encryption::{EncryptionService, SealedSecret};
use crate::domain::entities::{Currency, DerivedWallet, Network, WalletAddress};
use crate::shared::error::WalletError;
use crate::shared::types::{AccountIndex, WalletSet};
use crate::shared::WalletResult;
use std::str::FromStr;
use std::thread;
use zeroize::Zeroizing;

/// Derives wallets from master secrets and regenerates keys from sealed ones
#[derive(Debug, Clone)]
pub struct KeyDerivationEngine {
    encryption: EncryptionService,
}

impl KeyDerivationEngine {
    pub fn new(encryption: EncryptionService) -> Self {
        Self { encryption }
    }

    /// Generate a fresh 24-word master secret
    pub fn generate_mnemonic(&self) -> WalletResult<MasterSecret> {
        let secret = MasterSecret::generate()?;
        log::info!("Generated new master secret");
        Ok(secret)
    }

    /// Derive the wallet for one currency at `account_index`
    pub fn derive_wallet(
        &self,
        secret: &MasterSecret,
        currency: Currency,
        account_index: AccountIndex,
    ) -> WalletResult<DerivedWallet> {
        let network = currency
            .network()
            .ok_or_else(|| WalletError::unsupported_network(currency.code()))?;

        let seed = secret.to_seed()?;
        let wallet = derive_on_network(&seed[..], network, account_index)?.relabel(currency);
        log::debug!("Derived {} wallet at index {}", currency, account_index);
        Ok(wallet)
    }

    /// Same as [`derive_wallet`](Self::derive_wallet) for a currency given by
    /// its code, e.g. `"USDT_TRC20"`
    pub fn derive_wallet_by_name(
        &self,
        secret: &MasterSecret,
        currency: &str,
        account_index: AccountIndex,
    ) -> WalletResult<DerivedWallet> {
        let currency = Currency::from_str(currency)?;
        self.derive_wallet(secret, currency, account_index)
    }

    /// Derive BTC, ETH, SOL and TRX in parallel, then append the USDT_ERC20
    /// alias of the ETH wallet and the USD ledger placeholder.
    ///
    /// Output order is fixed regardless of which derivation finishes first.
    pub fn derive_all_standard_wallets(
        &self,
        secret: &MasterSecret,
        account_index: AccountIndex,
    ) -> WalletResult<Vec<DerivedWallet>> {
        let seed = secret.to_seed()?;
        let seed: &[u8] = &seed[..];

        let results: Vec<WalletResult<DerivedWallet>> = thread::scope(|scope| {
            let handles: Vec<_> = Network::STANDARD
                .into_iter()
                .map(|network| scope.spawn(move || derive_on_network(seed, network, account_index)))
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(WalletError::internal("Derivation thread panicked")))
                })
                .collect()
        });

        let mut wallets = results.into_iter().collect::<WalletResult<Vec<_>>>()?;

        let erc20 = wallets
            .iter()
            .find(|wallet| wallet.currency == Currency::Eth)
            .map(|eth| eth.relabel(Currency::UsdtErc20))
            .ok_or_else(|| WalletError::internal("Ethereum wallet missing from standard set"))?;
        wallets.push(erc20);
        wallets.push(DerivedWallet::internal_ledger(Currency::Usd));

        log::info!("Derived {} standard wallets at index {}", wallets.len(), account_index);
        Ok(wallets)
    }

    /// Generate, derive and seal in one step for a new user.
    ///
    /// The plaintext mnemonic never leaves this call.
    pub fn create_wallet_set(&self, account_index: AccountIndex) -> WalletResult<WalletSet> {
        let secret = self.generate_mnemonic()?;
        let addresses: Vec<WalletAddress> = self
            .derive_all_standard_wallets(&secret, account_index)?
            .iter()
            .map(WalletAddress::from)
            .collect();
        let sealed_secret = self.encryption.seal(secret.as_bytes())?;

        Ok(WalletSet {
            sealed_secret,
            account_index,
            addresses,
        })
    }

    /// Open a sealed secret and re-derive a single private key.
    ///
    /// The opened mnemonic and the derived wallet are dropped (and wiped)
    /// before this returns.
    pub fn regenerate_private_key(
        &self,
        sealed: &SealedSecret,
        currency: Currency,
        account_index: AccountIndex,
    ) -> WalletResult<Zeroizing<String>> {
        let plaintext = self.encryption.open(sealed)?;
        let secret = MasterSecret::from_utf8(&plaintext)?;
        let wallet = self.derive_wallet(&secret, currency, account_index)?;
        log::info!("Regenerated {} private key at index {}", currency, account_index);
        Ok(wallet.private_key.clone())
    }

    pub fn encryption(&self) -> &EncryptionService {
        &self.encryption
    }
}

fn derive_on_network(seed: &[u8], network: Network, account_index: AccountIndex) -> WalletResult<DerivedWallet> {
    let keys = deriver_for(network).derive(seed, account_index)?;
    Ok(DerivedWallet::new(
        network.native_currency(),
        network,
        keys.address,
        keys.private_key,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::crypto::encryption::MasterKey;
    use proptest::prelude::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

    fn engine() -> KeyDerivationEngine {
        KeyDerivationEngine::new(EncryptionService::new(MasterKey::generate()))
    }

    fn secret() -> MasterSecret {
        MasterSecret::parse(TEST_MNEMONIC).expect("valid mnemonic")
    }

    #[test]
    fn test_standard_wallets_order_and_shape() {
        let wallets = engine()
            .derive_all_standard_wallets(&secret(), 0)
            .expect("Failed to derive wallets");

        let currencies: Vec<Currency> = wallets.iter().map(|w| w.currency).collect();
        assert_eq!(
            currencies,
            vec![
                Currency::Btc,
                Currency::Eth,
                Currency::Sol,
                Currency::Trx,
                Currency::UsdtErc20,
                Currency::Usd
            ]
        );

        assert_eq!(wallets[0].address, "1KBdbBJRVYffWHWWZ1moECfdVBSEnDpLHi");
        assert_eq!(wallets[1].address, "0xF278cF59F82eDcf871d630F28EcC8056f25C1cdb");
        assert_eq!(wallets[2].address, "3Cy3YNTFywCmxoxt8n7UH6hg6dLo5uACowX3CFceaSnx");
        assert_eq!(wallets[3].address, "TEfhiqsW1SdN44DeHrAWVmbyr8ZbvChrtS");
        assert_eq!(wallets[4].address, wallets[1].address);
        assert_eq!(*wallets[4].private_key, *wallets[1].private_key);
        assert_eq!(wallets[5].address, "INTERNAL_LEDGER");
        assert_eq!(wallets[5].private_key.as_str(), "NO_PRIVATE_KEY");
    }

    #[test]
    fn test_token_currencies_follow_host_chain() {
        let engine = engine();
        let secret = secret();

        let trc20 = engine.derive_wallet(&secret, Currency::UsdtTrc20, 1).expect("derive");
        let trx = engine.derive_wallet(&secret, Currency::Trx, 1).expect("derive");
        assert_eq!(trc20.currency, Currency::UsdtTrc20);
        assert_eq!(trc20.address, trx.address);
        assert_eq!(trc20.address, "TBNqMYHXhL8hH3Ruj2VtXimvpEtNTzWi28");
    }

    #[test]
    fn test_unsupported_currency() {
        let engine = engine();
        let secret = secret();

        assert_eq!(
            engine.derive_wallet(&secret, Currency::Usd, 0).unwrap_err(),
            WalletError::UnsupportedNetwork("USD".to_string())
        );
        assert_eq!(
            engine.derive_wallet_by_name(&secret, "XRP", 0).unwrap_err(),
            WalletError::UnsupportedNetwork("XRP".to_string())
        );
        assert!(engine.derive_wallet_by_name(&secret, "sol", 0).is_ok());
    }

    #[test]
    fn test_create_wallet_set_then_regenerate() {
        let engine = engine();
        let set = engine.create_wallet_set(2).expect("Failed to create wallet set");
        assert_eq!(set.addresses.len(), 6);

        let key = engine
            .regenerate_private_key(&set.sealed_secret, Currency::Eth, 2)
            .expect("Failed to regenerate key");
        assert!(key.starts_with("0x"));
        assert_eq!(key.len(), 66);
    }

    #[test]
    fn test_regenerate_matches_direct_derivation() {
        let engine = engine();
        let sealed = engine.encryption().seal(TEST_MNEMONIC.as_bytes()).expect("seal");

        let key = engine
            .regenerate_private_key(&sealed, Currency::Trx, 0)
            .expect("regenerate");
        assert_eq!(
            key.as_str(),
            "8ede55b42e315eb58ad4d98cbb3be223ae197708e015d8b635a47696f920c1a3"
        );
    }

    #[test]
    fn test_regenerate_with_tampered_secret() {
        let engine = engine();
        let mut sealed = engine.encryption().seal(TEST_MNEMONIC.as_bytes()).expect("seal");
        sealed.ciphertext[0] ^= 0x01;

        assert_eq!(
            engine.regenerate_private_key(&sealed, Currency::Btc, 0).unwrap_err(),
            WalletError::DecryptionFailed
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_derivation_is_deterministic(index in 0u32..1000, currency_idx in 0usize..6) {
            let currency = Currency::ALL[currency_idx];
            let engine = engine();
            let secret = secret();
            let a = engine.derive_wallet(&secret, currency, index).expect("derive");
            let b = engine.derive_wallet(&secret, currency, index).expect("derive");
            prop_assert_eq!(&a.address, &b.address);
            prop_assert_eq!(a.private_key.as_str(), b.private_key.as_str());
        }

        #[test]
        fn prop_distinct_indices_give_distinct_keys(index in 0u32..1000, network_idx in 0usize..4) {
            let currency = Network::STANDARD[network_idx].native_currency();
            let engine = engine();
            let secret = secret();
            let a = engine.derive_wallet(&secret, currency, index).expect("derive");
            let b = engine.derive_wallet(&secret, currency, index + 1).expect("derive");
            prop_assert_ne!(&a.address, &b.address);
            prop_assert_ne!(a.private_key.as_str(), b.private_key.as_str());
        }
    }
}
