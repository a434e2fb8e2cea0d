//! # Lockbox Core
//!
//! Vault use-case logic and port definitions.
//!
//! This crate contains:
//! - The [`vault::ports::EntryStore`] trait implemented by storage
//!   backends
//! - The [`vault::service::VaultService`] public operation layer
//!
//! ## Architecture
//! - Depends only on `lockbox-domain`
//! - No I/O: storage is reached exclusively through ports

pub mod vault;

// Re-export commonly used items
pub use vault::ports::EntryStore;
pub use vault::service::VaultService;
