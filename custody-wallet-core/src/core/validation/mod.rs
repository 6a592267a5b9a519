//! Withdrawal address validation

pub mod address_validator;

pub use address_validator::*;
