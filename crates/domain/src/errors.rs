//! Error types used throughout the vault

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Lockbox
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum VaultError {
    #[error("The service name specified is invalid")]
    InvalidServiceName,

    #[error("The access group name specified is invalid")]
    InvalidAccessGroup,

    #[error("Unknown accessibility level: {0}")]
    InvalidAccessibility(String),

    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Security error: {0}")]
    Security(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised by vault entry construction and decoding
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum EntryError {
    /// The entry key is empty or whitespace-only.
    #[error("The entry key is invalid")]
    InvalidKey,

    /// A stored record could not be decoded into an entry.
    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),
}

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;
