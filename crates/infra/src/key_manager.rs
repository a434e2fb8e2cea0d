//! Encryption key management using the system keyring
//!
//! The database encryption key never touches the vault file or its
//! configuration: it is generated on first use and kept in the platform
//! keyring (Keychain Access on macOS, Credential Manager on Windows,
//! Secret Service on Linux) under the vault's service name.

use keyring::Entry;
use lockbox_domain::constants::{ENCRYPTION_KEY_NAME, ENCRYPTION_KEY_LEN};
use lockbox_domain::{Result, VaultError};
use rand::Rng;
use tracing::debug;

use crate::security::SecureString;

/// Manages the vault encryption key for one service.
pub struct KeyManager {
    service: String,
}

impl KeyManager {
    /// Create a key manager scoped to the given service name.
    pub fn new(service: impl Into<String>) -> Self {
        Self { service: service.into() }
    }

    /// Get the stored encryption key, generating and storing a new one
    /// when none exists yet.
    pub fn get_or_create_key(&self) -> Result<SecureString> {
        let entry = self.entry()?;

        match entry.get_password() {
            Ok(key) => {
                debug!(service = %self.service, "existing encryption key found");
                Ok(SecureString::new(key))
            }
            Err(keyring::Error::NoEntry) => {
                debug!(service = %self.service, "no encryption key found, generating");
                let key = generate_key();
                entry.set_password(key.expose()).map_err(|e| {
                    VaultError::Security(format!("Failed to store key: {e}"))
                })?;
                Ok(key)
            }
            Err(e) => Err(VaultError::Security(format!("Failed to read key: {e}"))),
        }
    }

    /// Delete the stored encryption key (use with caution!)
    ///
    /// A vault encrypted with the deleted key becomes unreadable.
    /// Deleting a key that does not exist succeeds.
    pub fn delete_key(&self) -> Result<()> {
        let entry = self.entry()?;

        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(VaultError::Security(format!("Failed to delete key: {e}"))),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, ENCRYPTION_KEY_NAME)
            .map_err(|e| VaultError::Security(format!("Failed to access keyring: {e}")))
    }
}

/// Generate a new random encryption key (32 random bytes, hex encoded).
fn generate_key() -> SecureString {
    let mut rng = rand::thread_rng();
    let key: Vec<u8> = (0..ENCRYPTION_KEY_LEN / 2).map(|_| rng.gen()).collect();
    SecureString::new(hex::encode(key))
}
