//! # Lockbox Domain
//!
//! Business domain types and models for Lockbox.
//!
//! This crate contains:
//! - Vault entry and accessibility types
//! - Vault configuration with construction-time validation
//! - Domain error types and Result definitions
//! - Version metadata and vault-wide constants
//!
//! ## Architecture
//! - No dependencies on other Lockbox crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::VaultConfig;
pub use errors::{EntryError, Result, VaultError};
pub use types::{Accessibility, VaultEntry};
