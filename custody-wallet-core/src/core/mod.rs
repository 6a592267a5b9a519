//! Core wallet functionality
//!
//! Cryptography, per-chain key encodings, address validation, fee
//! estimation and the retry primitive the network calls share.

pub mod chains;
pub mod crypto;
pub mod fees;
pub mod retry;
pub mod validation;
