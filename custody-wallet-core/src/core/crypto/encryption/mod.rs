//! Encryption functionality for the wallet core
//!
//! This module seals master secrets with AES-256-GCM under the process-wide
//! master key.

pub mod encrypted_data;
pub mod encryption_manager;

// Re-export all public items from submodules
pub use encrypted_data::*;
pub use encryption_manager::*;
