//! Domain layer
//!
//! Currencies, networks and derived wallets, plus the repository trait the
//! persistence collaborator implements.

pub mod entities;
pub mod repositories;

pub use entities::*;
pub use repositories::*;
