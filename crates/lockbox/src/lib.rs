//! # Lockbox
//!
//! Encrypted local credential vault.
//!
//! This crate aggregates the public surface of the Lockbox workspace:
//! the entry model and configuration from `lockbox-domain`, the vault
//! operations from `lockbox-core`, and the SQLCipher storage backend and
//! key management from `lockbox-infra`.
//!
//! ## Usage
//!
//! ```no_run
//! use lockbox::{VaultConfig, VaultEntry};
//!
//! # async fn demo() -> lockbox::Result<()> {
//! let config = VaultConfig::new("com.example.app")?;
//! let vault = lockbox::open("vault.db", config)?;
//!
//! let entry = VaultEntry::new("api-token")?
//!     .with_account("service-account")
//!     .with_secret(b"super-secret".to_vec());
//! vault.put(entry).await?;
//!
//! let stored = vault.entry_with_secret("api-token").await?;
//! assert!(stored.is_some());
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;

pub use lockbox_core::{EntryStore, VaultService};
pub use lockbox_domain::constants::{VERSION, VERSION_NUMBER, VERSION_STRING};
pub use lockbox_domain::{
    Accessibility, EntryError, Result, VaultConfig, VaultEntry, VaultError,
};
pub use lockbox_infra::database::{DbManager, SqlCipherEntryStore};
pub use lockbox_infra::key_manager::KeyManager;
pub use lockbox_infra::security::SecureString;

/// Default connection pool size for vaults opened through this crate.
const DEFAULT_POOL_SIZE: u32 = 4;

/// Open a vault at `path`, keeping the encryption key in the OS keyring.
///
/// The key is looked up under the config's service name and generated on
/// first use. The schema is created or migrated as needed.
///
/// # Errors
/// Returns [`VaultError::Security`] when the keyring is unavailable and
/// [`VaultError::Storage`] when the database cannot be opened (including
/// a wrong or changed encryption key).
pub fn open<P: AsRef<Path>>(path: P, config: VaultConfig) -> Result<VaultService> {
    let key = KeyManager::new(config.service()).get_or_create_key()?;
    open_with_key(path, config, key)
}

/// Open a vault at `path` with an explicit encryption key.
///
/// Intended for callers that manage key material themselves (or for
/// tests); [`open`] is the keyring-backed variant.
///
/// # Errors
/// Returns [`VaultError::Storage`] when the database cannot be opened.
pub fn open_with_key<P: AsRef<Path>>(
    path: P,
    config: VaultConfig,
    key: SecureString,
) -> Result<VaultService> {
    let manager = DbManager::new(path, DEFAULT_POOL_SIZE, key)?;
    manager.run_migrations()?;

    let store = SqlCipherEntryStore::new(Arc::new(manager), config);
    Ok(VaultService::new(Arc::new(store)))
}
