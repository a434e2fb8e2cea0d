//! Vault service
//!
//! The public operation layer over an [`EntryStore`] backend. The service
//! adds structured tracing around every operation and is the type the
//! aggregation crate hands to applications.

use std::sync::Arc;

use lockbox_domain::{Result, VaultEntry};
use tracing::{debug, instrument};

use super::ports::EntryStore;

/// High-level vault operations over a storage backend.
#[derive(Clone)]
pub struct VaultService {
    store: Arc<dyn EntryStore>,
}

impl VaultService {
    /// Create a service over the given backend.
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }

    /// Get the entry stored under `key`, or `None` when absent.
    ///
    /// The secret payload is omitted; use [`VaultService::entry_with_secret`]
    /// when the payload is needed.
    #[instrument(skip(self))]
    pub async fn entry(&self, key: &str) -> Result<Option<VaultEntry>> {
        self.store.get(key, false).await
    }

    /// Get the entry stored under `key` including its secret payload.
    #[instrument(skip(self))]
    pub async fn entry_with_secret(&self, key: &str) -> Result<Option<VaultEntry>> {
        self.store.get(key, true).await
    }

    /// Check whether an entry exists under `key`.
    #[instrument(skip(self))]
    pub async fn contains(&self, key: &str) -> Result<bool> {
        self.store.contains(key).await
    }

    /// Insert the entry, or update the entry already stored under its key.
    #[instrument(skip(self, entry), fields(key = %entry.key))]
    pub async fn put(&self, entry: VaultEntry) -> Result<()> {
        self.store.put(entry).await?;
        debug!("entry stored");
        Ok(())
    }

    /// List every entry in scope, without secret payloads, in creation
    /// order.
    #[instrument(skip(self))]
    pub async fn entries(&self) -> Result<Vec<VaultEntry>> {
        self.store.list(false).await
    }

    /// List every entry in scope including secret payloads.
    #[instrument(skip(self))]
    pub async fn entries_with_secrets(&self) -> Result<Vec<VaultEntry>> {
        self.store.list(true).await
    }

    /// Remove the entry stored under `key`. Succeeds when absent.
    #[instrument(skip(self))]
    pub async fn remove(&self, key: &str) -> Result<()> {
        self.store.remove(key).await?;
        debug!("entry removed");
        Ok(())
    }

    /// Remove every entry in scope.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<()> {
        self.store.clear().await?;
        debug!("vault cleared");
        Ok(())
    }
}
