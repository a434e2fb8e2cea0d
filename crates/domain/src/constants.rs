//! Vault-wide constants and version metadata

/// Library version as declared in the package manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library version as a NUL-terminated byte string.
///
/// Exposed for diagnostic tooling that embeds or reports the linked build
/// in C-string form.
pub const VERSION_STRING: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();

/// Numeric major.minor version for quick compatibility checks.
///
/// Must track the manifest version.
pub const VERSION_NUMBER: f64 = 0.1;

/// Length in characters of generated database encryption keys (32 random
/// bytes, hex encoded).
pub const ENCRYPTION_KEY_LEN: usize = 64;

/// Keyring account name under which the database encryption key is stored.
pub const ENCRYPTION_KEY_NAME: &str = "vault_encryption_key";
