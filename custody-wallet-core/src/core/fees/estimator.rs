//! USDT-TRC20 sweep fee estimation
//!
//! Simulates the token transfer against a Tron node, converts the energy it
//! burns into TRX with a safety margin, and degrades to a configured constant
//! when the node cannot answer.

use super::tron_client::{TriggerConstantContractRequest, TronNodeClient};
use crate::core::retry::{with_retry, RetryOptions};
use crate::shared::constants::{
    BASIS_POINTS, DEFAULT_ENERGY_PRICE_SUN, DEFAULT_ENERGY_USED, DEFAULT_FALLBACK_FEE_TRX,
    DEFAULT_FEE_SAFETY_MULTIPLIER, DEFAULT_RPC_TIMEOUT_MS, DEFAULT_USDT_TRC20_CONTRACT,
    SUN_PER_TRX, TRC20_DECIMALS, TRC20_TRANSFER_SELECTOR, TRON_ADDRESS_PREFIX,
};
use crate::shared::error::WalletError;
use crate::shared::utils::{base58_to_hex, parse_units};
use crate::shared::WalletResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Fee estimate for one sweep. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GasEstimate {
    pub energy_units: u64,
    pub unit_price_sun: u64,
    pub safety_multiplier: f64,
    pub native_fee_trx: u64,
}

/// Reasons a live estimate could not be produced
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimationError {
    #[error("Invalid estimation input: {0}")]
    InvalidInput(String),

    #[error("Node request failed: {0}")]
    Transport(String),

    #[error("Node request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Node rejected the simulated transfer: {0}")]
    Rejected(String),
}

/// Collapse a failed estimate into the configured constant fee
pub trait FeeFallback {
    fn or_fallback(self, fallback_trx: u64) -> u64;
}

impl FeeFallback for Result<GasEstimate, EstimationError> {
    fn or_fallback(self, fallback_trx: u64) -> u64 {
        match self {
            Ok(estimate) => estimate.native_fee_trx,
            Err(_) => fallback_trx,
        }
    }
}

/// Last observed energy price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCache {
    pub value: u64,
    pub fetched_at: DateTime<Utc>,
}

impl PriceCache {
    pub fn new(value: u64, fetched_at: DateTime<Utc>) -> Self {
        Self { value, fetched_at }
    }

    pub fn is_fresh(&self, max_age: chrono::Duration, now: DateTime<Utc>) -> bool {
        now >= self.fetched_at && now - self.fetched_at <= max_age
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeSettings {
    pub fallback_fee_trx: u64,
    pub energy_price_sun: u64,
    pub safety_multiplier: f64,
    pub usdt_contract: String,
    pub rpc_timeout: Duration,
    pub retry: RetryOptions,
}

impl Default for FeeSettings {
    fn default() -> Self {
        Self {
            fallback_fee_trx: DEFAULT_FALLBACK_FEE_TRX,
            energy_price_sun: DEFAULT_ENERGY_PRICE_SUN,
            safety_multiplier: DEFAULT_FEE_SAFETY_MULTIPLIER,
            usdt_contract: DEFAULT_USDT_TRC20_CONTRACT.to_string(),
            rpc_timeout: Duration::from_millis(DEFAULT_RPC_TIMEOUT_MS),
            retry: RetryOptions::default(),
        }
    }
}

/// `ceil(energy * price * multiplier / SUN_PER_TRX)`.
///
/// The multiplier is applied in basis points so the result is exact for the
/// decimal multipliers used in practice.
pub fn compute_fee_trx(energy_units: u64, unit_price_sun: u64, safety_multiplier: f64) -> u64 {
    let multiplier_bps = (safety_multiplier.max(0.0) * BASIS_POINTS as f64).round() as u128;
    let denominator = SUN_PER_TRX * BASIS_POINTS;
    (energy_units as u128)
        .checked_mul(unit_price_sun as u128)
        .and_then(|product| product.checked_mul(multiplier_bps))
        .map_or(u64::MAX, |numerator| {
            u64::try_from(numerator.div_ceil(denominator)).unwrap_or(u64::MAX)
        })
}

/// Current price from a `getenergyprices` history string
pub fn parse_energy_prices(prices: &str) -> WalletResult<u64> {
    let latest = prices
        .trim()
        .rsplit(',')
        .next()
        .filter(|entry| !entry.is_empty())
        .ok_or_else(|| WalletError::network("Empty energy price history"))?;

    let (_, price) = latest
        .split_once(':')
        .ok_or_else(|| WalletError::network(format!("Malformed energy price entry '{}'", latest)))?;

    price
        .trim()
        .parse::<u64>()
        .map_err(|_| WalletError::network(format!("Malformed energy price entry '{}'", latest)))
}

/// ABI parameters of `transfer(address,uint256)`: 20-byte address body and
/// amount, each left-padded to 32 bytes
pub fn encode_transfer_parameters(to_hex: &str, amount_units: u128) -> String {
    let prefix = format!("{:02x}", TRON_ADDRESS_PREFIX);
    let body = to_hex.strip_prefix(prefix.as_str()).unwrap_or(to_hex);
    format!("{:0>64}{:064x}", body, amount_units)
}

pub struct FeeEstimator {
    client: Arc<dyn TronNodeClient>,
    settings: FeeSettings,
}

impl FeeEstimator {
    pub fn new(client: Arc<dyn TronNodeClient>, settings: FeeSettings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &FeeSettings {
        &self.settings
    }

    /// Sweep fee in TRX for moving `amount` USDT from `from` to `to`.
    ///
    /// Never fails: a node that cannot answer yields the fallback fee.
    pub async fn estimate_fee(&self, from: &str, to: &str, amount: &str) -> u64 {
        self.estimate_with_price(from, to, amount, self.settings.energy_price_sun)
            .await
            .inspect_err(|e| self.log_degraded(from, to, amount, e))
            .or_fallback(self.settings.fallback_fee_trx)
    }

    /// Like [`estimate_fee`](Self::estimate_fee), pricing energy from `cache`
    /// while it is younger than `max_age`
    pub async fn estimate_fee_with_price(
        &self,
        from: &str,
        to: &str,
        amount: &str,
        cache: &PriceCache,
        max_age: chrono::Duration,
    ) -> u64 {
        let price = if cache.is_fresh(max_age, Utc::now()) {
            cache.value
        } else {
            log::debug!("Energy price cache is stale, using configured price");
            self.settings.energy_price_sun
        };

        self.estimate_with_price(from, to, amount, price)
            .await
            .inspect_err(|e| self.log_degraded(from, to, amount, e))
            .or_fallback(self.settings.fallback_fee_trx)
    }

    /// Full estimate, or why it could not be produced
    pub async fn estimate(&self, from: &str, to: &str, amount: &str) -> Result<GasEstimate, EstimationError> {
        self.estimate_with_price(from, to, amount, self.settings.energy_price_sun)
            .await
    }

    /// Query the node for the current energy price, retrying transient failures
    pub async fn refresh_energy_price(&self) -> WalletResult<PriceCache> {
        let timeout = self.settings.rpc_timeout;
        let client = Arc::clone(&self.client);
        let price = with_retry(
            move || {
                let client = Arc::clone(&client);
                async move {
                    let prices = tokio::time::timeout(timeout, client.get_energy_prices())
                        .await
                        .map_err(|_| {
                            WalletError::network(format!(
                                "Energy price request timed out after {:?}",
                                timeout
                            ))
                        })??;
                    parse_energy_prices(&prices)
                }
            },
            &self.settings.retry,
        )
        .await?;

        log::info!("Refreshed energy price: {} sun", price);
        Ok(PriceCache::new(price, Utc::now()))
    }

    async fn estimate_with_price(
        &self,
        from: &str,
        to: &str,
        amount: &str,
        unit_price_sun: u64,
    ) -> Result<GasEstimate, EstimationError> {
        let amount_units = parse_units(amount, TRC20_DECIMALS)
            .map_err(|e| EstimationError::InvalidInput(e.to_string()))?;
        let owner_address =
            base58_to_hex(from).map_err(|e| EstimationError::InvalidInput(e.to_string()))?;
        let to_hex = base58_to_hex(to).map_err(|e| EstimationError::InvalidInput(e.to_string()))?;
        let contract_address = base58_to_hex(&self.settings.usdt_contract)
            .map_err(|e| EstimationError::InvalidInput(e.to_string()))?;

        let request = TriggerConstantContractRequest {
            owner_address,
            contract_address,
            function_selector: TRC20_TRANSFER_SELECTOR.to_string(),
            parameter: encode_transfer_parameters(&to_hex, amount_units),
            visible: false,
        };

        let timeout = self.settings.rpc_timeout;
        let response = tokio::time::timeout(timeout, self.client.trigger_constant_contract(&request))
            .await
            .map_err(|_| EstimationError::Timeout(timeout))?
            .map_err(|e| EstimationError::Transport(e.to_string()))?;

        if !response.result.result {
            let reason = response
                .result
                .message
                .unwrap_or_else(|| "simulation did not succeed".to_string());
            return Err(EstimationError::Rejected(reason));
        }

        let energy_units = response.energy_used.unwrap_or(DEFAULT_ENERGY_USED);
        let native_fee_trx =
            compute_fee_trx(energy_units, unit_price_sun, self.settings.safety_multiplier);

        log::debug!(
            "Estimated {} energy at {} sun for transfer to {}: {} TRX",
            energy_units,
            unit_price_sun,
            to,
            native_fee_trx
        );

        Ok(GasEstimate {
            energy_units,
            unit_price_sun,
            safety_multiplier: self.settings.safety_multiplier,
            native_fee_trx,
        })
    }

    fn log_degraded(&self, from: &str, to: &str, amount: &str, error: &EstimationError) {
        log::warn!(
            "Fee estimation degraded for {} -> {} amount {}: {}. Using fallback of {} TRX",
            from,
            to,
            amount,
            error,
            self.settings.fallback_fee_trx
        );
    }
}
