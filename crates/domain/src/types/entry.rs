//! Vault entry model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::EntryError;

/// A single entry in the vault.
///
/// Entries are addressed by `key` within the vault's scope. The secret
/// payload is optional: lookups that skip the payload leave it `None`
/// even when one is stored. `created_at` and `modified_at` are unix-second
/// timestamps owned by the store; values set by callers are ignored on
/// write and replaced by the stored values on read.
#[derive(Clone, Serialize, Deserialize)]
pub struct VaultEntry {
    /// Lookup key, unique within a service/access-group scope.
    pub key: String,

    /// Account name associated with this entry, if any.
    pub account: Option<String>,

    /// Human-readable label, if any.
    pub label: Option<String>,

    /// Free-form description, if any.
    pub description: Option<String>,

    /// Notes attached to this entry, if any.
    pub notes: Option<String>,

    /// Secret payload bytes, if any.
    pub secret: Option<Vec<u8>>,

    /// Whether this entry is eligible for cross-device synchronization.
    pub synchronizable: bool,

    /// When the entry was first stored (unix seconds, store-managed).
    pub created_at: i64,

    /// When the entry was last written (unix seconds, store-managed).
    pub modified_at: i64,
}

impl VaultEntry {
    /// Create a new entry for the given key with no attributes set.
    ///
    /// # Errors
    /// Returns [`EntryError::InvalidKey`] when the key is empty or
    /// whitespace-only.
    pub fn new(key: impl Into<String>) -> Result<Self, EntryError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(EntryError::InvalidKey);
        }

        Ok(Self {
            key,
            account: None,
            label: None,
            description: None,
            notes: None,
            secret: None,
            synchronizable: false,
            created_at: 0,
            modified_at: 0,
        })
    }

    /// Set the account name.
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the secret payload.
    pub fn with_secret(mut self, secret: impl Into<Vec<u8>>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Mark the entry as eligible for cross-device synchronization.
    pub fn with_synchronizable(mut self, synchronizable: bool) -> Self {
        self.synchronizable = synchronizable;
        self
    }
}

/// Equality covers the identifying attributes only: key, account,
/// description, and label. Secret payload, notes, the sync flag, and
/// timestamps do not participate, so an entry fetched without its payload
/// still compares equal to the entry that was stored.
impl PartialEq for VaultEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.account == other.account
            && self.description == other.description
            && self.label == other.label
    }
}

impl Eq for VaultEntry {}

// Secret bytes are redacted; everything else prints normally.
impl fmt::Debug for VaultEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultEntry")
            .field("key", &self.key)
            .field("account", &self.account)
            .field("label", &self.label)
            .field("description", &self.description)
            .field("notes", &self.notes)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .field("synchronizable", &self.synchronizable)
            .field("created_at", &self.created_at)
            .field("modified_at", &self.modified_at)
            .finish()
    }
}
