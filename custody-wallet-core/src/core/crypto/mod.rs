//! Cryptographic functionality for the wallet core
//!
//! Sealing of master secrets at rest and hierarchical key derivation. Every
//! type holding secret material zeroizes it on drop.

pub mod encryption;
pub mod keys;

pub use encryption::*;
pub use keys::*;
