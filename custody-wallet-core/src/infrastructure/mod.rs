//! Infrastructure layer
//!
//! Process-level concerns: configuration loading and logging.

pub mod config;
pub mod logger;

pub use config::WalletCoreConfig;
pub use logger::init_logging;
