//! Runtime configuration
//!
//! Loaded once at startup from `WALLET_CORE_*` environment variables, with a
//! `.env` file honoured when present.

use crate::core::crypto::encryption::MasterKey;
use crate::core::fees::FeeSettings;
use crate::core::retry::RetryOptions;
use crate::shared::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_ENERGY_PRICE_SUN, DEFAULT_FALLBACK_FEE_TRX,
    DEFAULT_FEE_SAFETY_MULTIPLIER, DEFAULT_LOG_LEVEL, DEFAULT_RETRY_BACKOFF_FACTOR,
    DEFAULT_RETRY_COUNT, DEFAULT_RETRY_INITIAL_DELAY_MS, DEFAULT_RPC_TIMEOUT_MS,
    DEFAULT_TRON_NODE_URL, DEFAULT_USDT_TRC20_CONTRACT, MASTER_KEY_HEX_LENGTH,
};
use crate::shared::error::WalletError;
use crate::shared::WalletResult;
use config::{Config, Environment};
use dotenv::dotenv;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

#[derive(Clone, Deserialize)]
pub struct WalletCoreConfig {
    /// 64 hex characters, never logged
    pub master_encryption_key: String,
    #[serde(default = "default_fallback_fee_trx")]
    pub fallback_fee_trx: u64,
    #[serde(default = "default_energy_price_sun")]
    pub energy_price_sun: u64,
    #[serde(default = "default_fee_safety_multiplier")]
    pub fee_safety_multiplier: f64,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_initial_delay_ms")]
    pub retry_initial_delay_ms: u64,
    #[serde(default = "default_retry_backoff_factor")]
    pub retry_backoff_factor: f64,
    #[serde(default = "default_tron_node_url")]
    pub tron_node_url: String,
    #[serde(default)]
    pub tron_api_key: Option<String>,
    #[serde(default = "default_usdt_trc20_contract")]
    pub usdt_trc20_contract: String,
    #[serde(default = "default_rpc_timeout_ms")]
    pub rpc_timeout_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_fallback_fee_trx() -> u64 {
    DEFAULT_FALLBACK_FEE_TRX
}

fn default_energy_price_sun() -> u64 {
    DEFAULT_ENERGY_PRICE_SUN
}

fn default_fee_safety_multiplier() -> f64 {
    DEFAULT_FEE_SAFETY_MULTIPLIER
}

fn default_retry_count() -> u32 {
    DEFAULT_RETRY_COUNT
}

fn default_retry_initial_delay_ms() -> u64 {
    DEFAULT_RETRY_INITIAL_DELAY_MS
}

fn default_retry_backoff_factor() -> f64 {
    DEFAULT_RETRY_BACKOFF_FACTOR
}

fn default_tron_node_url() -> String {
    DEFAULT_TRON_NODE_URL.to_string()
}

fn default_usdt_trc20_contract() -> String {
    DEFAULT_USDT_TRC20_CONTRACT.to_string()
}

fn default_rpc_timeout_ms() -> u64 {
    DEFAULT_RPC_TIMEOUT_MS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl WalletCoreConfig {
    /// Load from the environment (prefix `WALLET_CORE_`) and validate
    pub fn from_env() -> WalletResult<Self> {
        dotenv().ok();

        // Values stay strings here: a numeric-looking hex key must not be
        // coerced into a float before deserialization.
        let config = Config::builder()
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()?;

        Self::from_config(config)
    }

    /// Deserialize and validate an already assembled [`Config`]
    pub fn from_config(config: Config) -> WalletResult<Self> {
        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> WalletResult<()> {
        if self.master_encryption_key.len() != MASTER_KEY_HEX_LENGTH
            || !self.master_encryption_key.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(WalletError::config(format!(
                "master_encryption_key must be {} hex characters",
                MASTER_KEY_HEX_LENGTH
            )));
        }

        if !self.fee_safety_multiplier.is_finite() || self.fee_safety_multiplier <= 0.0 {
            return Err(WalletError::config("fee_safety_multiplier must be a positive number"));
        }

        if !self.retry_backoff_factor.is_finite() || self.retry_backoff_factor < 1.0 {
            return Err(WalletError::config("retry_backoff_factor must be at least 1.0"));
        }

        if self.rpc_timeout_ms == 0 {
            return Err(WalletError::config("rpc_timeout_ms must be greater than zero"));
        }

        if self.tron_node_url.trim().is_empty() {
            return Err(WalletError::config("tron_node_url is required"));
        }

        if self.usdt_trc20_contract.trim().is_empty() {
            return Err(WalletError::config("usdt_trc20_contract is required"));
        }

        if self.retry_count == 0 {
            log::warn!("retry_count is 0, operations will still run once");
        }

        Ok(())
    }

    pub fn master_key(&self) -> WalletResult<MasterKey> {
        MasterKey::from_hex(&self.master_encryption_key)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }

    pub fn retry_options(&self) -> RetryOptions {
        RetryOptions::new(
            self.retry_count,
            Duration::from_millis(self.retry_initial_delay_ms),
            self.retry_backoff_factor,
        )
    }

    pub fn fee_settings(&self) -> FeeSettings {
        FeeSettings {
            fallback_fee_trx: self.fallback_fee_trx,
            energy_price_sun: self.energy_price_sun,
            safety_multiplier: self.fee_safety_multiplier,
            usdt_contract: self.usdt_trc20_contract.clone(),
            rpc_timeout: self.rpc_timeout(),
            retry: self.retry_options(),
        }
    }
}

impl fmt::Debug for WalletCoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletCoreConfig")
            .field("master_encryption_key", &"[REDACTED]")
            .field("fallback_fee_trx", &self.fallback_fee_trx)
            .field("energy_price_sun", &self.energy_price_sun)
            .field("fee_safety_multiplier", &self.fee_safety_multiplier)
            .field("retry_count", &self.retry_count)
            .field("retry_initial_delay_ms", &self.retry_initial_delay_ms)
            .field("retry_backoff_factor", &self.retry_backoff_factor)
            .field("tron_node_url", &self.tron_node_url)
            .field("tron_api_key", &self.tron_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("usdt_trc20_contract", &self.usdt_trc20_contract)
            .field("rpc_timeout_ms", &self.rpc_timeout_ms)
            .field("log_level", &self.log_level)
            .finish()
    }
}
