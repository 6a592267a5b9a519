//! Key management for the wallet core
//!
//! This module handles master secret generation, hierarchical derivation and
//! transient regeneration of private keys.

pub mod hd_derivation;
pub mod key_manager;
pub mod secure_seed_phrase;

// Re-export all public items from submodules
pub use hd_derivation::*;
pub use key_manager::*;
pub use secure_seed_phrase::*;
