//! Tron full-node HTTP client
//!
//! Only the two read-only endpoints fee estimation needs.

use crate::shared::constants::TRON_API_KEY_HEADER;
use crate::shared::error::WalletError;
use crate::shared::WalletResult;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Body of `/wallet/triggerconstantcontract`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerConstantContractRequest {
    pub owner_address: String,
    pub contract_address: String,
    pub function_selector: String,
    pub parameter: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallResult {
    #[serde(default)]
    pub result: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Fields of the simulation response used for fee estimation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TriggerConstantContractResponse {
    #[serde(default)]
    pub result: CallResult,
    #[serde(default)]
    pub energy_used: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
struct EnergyPricesResponse {
    prices: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TronNodeClient: Send + Sync {
    /// Simulate a contract call without broadcasting it
    async fn trigger_constant_contract(
        &self,
        request: &TriggerConstantContractRequest,
    ) -> WalletResult<TriggerConstantContractResponse>;

    /// Energy price history, `"<timestamp>:<sun>,..."` with the current price last
    async fn get_energy_prices(&self) -> WalletResult<String>;
}

/// [`TronNodeClient`] over HTTPS with an optional TronGrid API key
#[derive(Clone)]
pub struct HttpTronNodeClient {
    http_client: reqwest::Client,
    base_url: Arc<str>,
}

impl std::fmt::Debug for HttpTronNodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTronNodeClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTronNodeClient {
    pub fn new(base_url: &str, api_key: Option<&str>, timeout: Duration) -> WalletResult<Self> {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key.filter(|key| !key.is_empty()) {
            let mut value = HeaderValue::from_str(key)
                .map_err(|_| WalletError::config("Tron API key contains invalid header characters"))?;
            value.set_sensitive(true);
            headers.insert(TRON_API_KEY_HEADER, value);
        }

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| WalletError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl TronNodeClient for HttpTronNodeClient {
    async fn trigger_constant_contract(
        &self,
        request: &TriggerConstantContractRequest,
    ) -> WalletResult<TriggerConstantContractResponse> {
        let body = self
            .http_client
            .post(self.endpoint("/wallet/triggerconstantcontract"))
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        // Parsed by hand so a malformed reply can be logged verbatim
        serde_json::from_str::<TriggerConstantContractResponse>(&body).map_err(|e| {
            log::debug!("Unparseable triggerconstantcontract reply: {}", body);
            WalletError::from(e)
        })
    }

    async fn get_energy_prices(&self) -> WalletResult<String> {
        let response = self
            .http_client
            .get(self.endpoint("/wallet/getenergyprices"))
            .send()
            .await?
            .error_for_status()?
            .json::<EnergyPricesResponse>()
            .await?;

        Ok(response.prices)
    }
}
