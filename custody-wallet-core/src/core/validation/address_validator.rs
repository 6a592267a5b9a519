use crate::core::chains::EthereumDeriver;
use crate::domain::entities::{Currency, Network};
use crate::shared::constants::{
    ETHEREUM_ADDRESS_LENGTH, SOLANA_MAX_ADDRESS_LENGTH, SOLANA_MIN_ADDRESS_LENGTH,
    TRON_ADDRESS_LENGTH, TRON_ADDRESS_PREFIX,
};
use ed25519_dalek::VerifyingKey;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

lazy_static! {
    static ref BTC_P2PKH: Regex =
        Regex::new(r"^1[1-9A-HJ-NP-Za-km-z]{24,33}$").expect("P2PKH pattern");
    static ref BTC_P2SH: Regex =
        Regex::new(r"^3[1-9A-HJ-NP-Za-km-z]{24,33}$").expect("P2SH pattern");
    static ref BTC_SEGWIT_V0: Regex =
        Regex::new(r"^bc1q[ac-hj-np-z02-9]{38,59}$").expect("SegWit pattern");
    static ref BTC_TAPROOT: Regex =
        Regex::new(r"^bc1p[ac-hj-np-z02-9]{58}$").expect("Taproot pattern");
}

/// Outcome of validating a withdrawal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AddressValidationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// Syntactic and checksum validation of addresses per chain.
///
/// Never returns an error: every failure, including library decode errors,
/// is reported through [`AddressValidationResult`].
pub struct AddressValidator;

impl AddressValidator {
    /// Validate `address` for the currency with code `currency`
    pub fn validate(address: &str, currency: &str) -> AddressValidationResult {
        if address.is_empty() {
            return AddressValidationResult::invalid("Address is required");
        }

        let network = Currency::from_str(currency)
            .ok()
            .and_then(|currency| currency.network());

        match network {
            Some(Network::Tron) => Self::validate_tron(address),
            Some(Network::Ethereum) => Self::validate_ethereum(address),
            Some(Network::Bitcoin) => Self::validate_bitcoin(address),
            Some(Network::Solana) => Self::validate_solana(address),
            None => AddressValidationResult::invalid(format!("Unknown currency: {}", currency)),
        }
    }

    pub fn validate_tron(address: &str) -> AddressValidationResult {
        if address.is_empty() {
            return AddressValidationResult::invalid("Address is required");
        }
        if !address.starts_with('T') {
            return AddressValidationResult::invalid("Tron address must start with 'T'");
        }
        if address.len() != TRON_ADDRESS_LENGTH {
            return AddressValidationResult::invalid("Tron address must be 34 characters long");
        }

        match bs58::decode(address).with_check(None).into_vec() {
            Ok(payload) if payload.len() == 21 && payload[0] == TRON_ADDRESS_PREFIX => {
                AddressValidationResult::valid()
            }
            _ => AddressValidationResult::invalid("Invalid Tron address format"),
        }
    }

    pub fn validate_ethereum(address: &str) -> AddressValidationResult {
        if address.is_empty() {
            return AddressValidationResult::invalid("Address is required");
        }
        let Some(body) = address.strip_prefix("0x") else {
            return AddressValidationResult::invalid("Ethereum address must start with 0x");
        };
        if address.len() != ETHEREUM_ADDRESS_LENGTH {
            return AddressValidationResult::invalid("Ethereum address must be 42 characters long");
        }
        if !body.chars().all(|c| c.is_ascii_hexdigit()) {
            return AddressValidationResult::invalid(
                "Ethereum address contains invalid hex characters",
            );
        }

        // Single-case bodies carry no checksum
        let is_lower = body == body.to_ascii_lowercase();
        let is_upper = body == body.to_ascii_uppercase();
        if is_lower || is_upper || EthereumDeriver::to_checksum_address(body) == address {
            AddressValidationResult::valid()
        } else {
            AddressValidationResult::invalid("Invalid Ethereum address checksum")
        }
    }

    pub fn validate_bitcoin(address: &str) -> AddressValidationResult {
        if address.is_empty() {
            return AddressValidationResult::invalid("Address is required");
        }

        let matches = [&*BTC_P2PKH, &*BTC_P2SH, &*BTC_SEGWIT_V0, &*BTC_TAPROOT]
            .iter()
            .any(|pattern| pattern.is_match(address));
        if matches {
            return AddressValidationResult::valid();
        }

        if address.starts_with('1') || address.starts_with('3') {
            AddressValidationResult::invalid(
                "Invalid Bitcoin legacy address: expected 25-34 base58 characters",
            )
        } else if address.starts_with("bc1") {
            AddressValidationResult::invalid("Invalid Bitcoin bech32 address")
        } else {
            AddressValidationResult::invalid(
                "Unrecognized Bitcoin address prefix: expected 1, 3 or bc1",
            )
        }
    }

    pub fn validate_solana(address: &str) -> AddressValidationResult {
        if address.is_empty() {
            return AddressValidationResult::invalid("Address is required");
        }
        if !(SOLANA_MIN_ADDRESS_LENGTH..=SOLANA_MAX_ADDRESS_LENGTH).contains(&address.len()) {
            return AddressValidationResult::invalid(
                "Solana address must be between 32 and 44 characters",
            );
        }

        let is_point = bs58::decode(address)
            .into_vec()
            .ok()
            .and_then(|bytes| <[u8; 32]>::try_from(bytes.as_slice()).ok())
            .map(|bytes| VerifyingKey::from_bytes(&bytes).is_ok())
            .unwrap_or(false);

        if is_point {
            AddressValidationResult::valid()
        } else {
            AddressValidationResult::invalid("Invalid Solana address format")
        }
    }
}
