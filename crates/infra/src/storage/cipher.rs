//! SQLCipher configuration
//!
//! Applies the encryption pragmas that turn a plain SQLite connection
//! into an encrypted one, and verifies early that the key actually
//! decrypts the file.

use rusqlite::Connection;
use tracing::{debug, error};

use super::error::{StorageError, StorageResult};
use crate::security::SecureString;

/// SQLCipher configuration
#[derive(Clone)]
pub struct SqlCipherConfig {
    /// Encryption key (secured with automatic zeroization)
    pub key: SecureString,

    /// Cipher compatibility version (default: 4 for SQLCipher 4.x)
    pub cipher_compatibility: i32,

    /// KDF iterations for key derivation (default: 256000)
    pub kdf_iter: i32,

    /// Enable cipher memory security (default: true)
    pub cipher_memory_security: bool,
}

// Custom Debug impl to avoid exposing the key
impl std::fmt::Debug for SqlCipherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlCipherConfig")
            .field("key", &"SecureString(***)")
            .field("cipher_compatibility", &self.cipher_compatibility)
            .field("kdf_iter", &self.kdf_iter)
            .field("cipher_memory_security", &self.cipher_memory_security)
            .finish()
    }
}

impl SqlCipherConfig {
    /// Create default configuration with the given key
    pub fn new(key: SecureString) -> Self {
        Self { key, cipher_compatibility: 4, kdf_iter: 256_000, cipher_memory_security: true }
    }

    /// Set KDF iterations
    pub fn with_kdf_iter(mut self, iterations: i32) -> Self {
        self.kdf_iter = iterations;
        self
    }
}

/// Configure SQLCipher for a connection
///
/// Applies encryption pragmas to enable SQLCipher encryption.
/// Must be called immediately after opening the connection.
///
/// # Errors
/// Returns an error if any pragma fails to apply
pub fn configure_sqlcipher(conn: &Connection, config: &SqlCipherConfig) -> StorageResult<()> {
    // Apply encryption key (must be first)
    conn.pragma_update(None, "key", config.key.expose()).map_err(|e| {
        let err = classify_key_error(&e)
            .unwrap_or_else(|| StorageError::Encryption(format!("Failed to set encryption key: {e}")));
        error!(error = %err, "SQLCipher key setup failed");
        err
    })?;

    // Set cipher compatibility version (SQLCipher 4.x)
    conn.pragma_update(None, "cipher_compatibility", config.cipher_compatibility).map_err(|e| {
        error!(error = %e, "Failed to set cipher_compatibility");
        StorageError::Encryption(format!("Failed to set cipher_compatibility: {e}"))
    })?;

    // Set KDF iterations (key derivation function)
    conn.pragma_update(None, "kdf_iter", config.kdf_iter).map_err(|e| {
        error!(error = %e, "Failed to set kdf_iter");
        StorageError::Encryption(format!("Failed to set kdf_iter: {e}"))
    })?;

    // Enable cipher memory security
    let memory_security = if config.cipher_memory_security { "ON" } else { "OFF" };
    conn.pragma_update(None, "cipher_memory_security", memory_security).map_err(|e| {
        error!(error = %e, "Failed to set cipher_memory_security");
        StorageError::Encryption(format!("Failed to set cipher_memory_security: {e}"))
    })?;

    debug!("SQLCipher configuration successful");

    Ok(())
}

/// Verify that encryption is working by attempting to query the database
///
/// This catches encryption errors early before the pool is fully
/// initialized. PRAGMA user_version forces SQLCipher to actually decrypt
/// pages.
///
/// # Errors
/// Returns `WrongKeyOrNotEncrypted` if the key is wrong or the database
/// isn't encrypted
pub fn verify_encryption(conn: &Connection) -> StorageResult<()> {
    let result = conn
        .query_row("PRAGMA user_version", [], |_| Ok::<(), rusqlite::Error>(()))
        .and_then(|()| {
            // Also read the catalog, which forces decryption of table pages
            conn.query_row("SELECT count(*) FROM sqlite_master", [], |_| Ok(()))
        })
        .map_err(|e| classify_key_error(&e).unwrap_or_else(|| StorageError::from(e)));

    match &result {
        Ok(()) => debug!("encryption verification successful"),
        Err(e) => error!(error = %e, "encryption verification failed"),
    }

    result
}

/// Recognize the error shapes SQLite produces when a database is opened
/// with the wrong key (or isn't encrypted at all).
pub(crate) fn is_wrong_key_message(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("file is not a database")
        || message.contains("file is encrypted")
        || message.contains("database disk image is malformed")
        || message.contains("notadb")
        || message.contains("unsupported file format")
        || message.contains("unable to open database")
}

fn classify_key_error(err: &rusqlite::Error) -> Option<StorageError> {
    is_wrong_key_message(&err.to_string()).then_some(StorageError::WrongKeyOrNotEncrypted)
}
