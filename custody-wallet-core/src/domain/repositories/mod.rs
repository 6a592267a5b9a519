//! Domain repositories
//!
//! This module contains repository traits implemented by the persistence
//! collaborator.

pub mod user_secret_repository;

// Re-export repositories
pub use user_secret_repository::*;
