//! Network fee estimation for USDT-TRC20 sweeps

pub mod estimator;
pub mod tron_client;

pub use estimator::*;
pub use tron_client::*;
