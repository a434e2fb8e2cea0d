//! Port interfaces for vault entry persistence
//!
//! These traits define the boundary between vault use-case logic and
//! storage implementations.

use async_trait::async_trait;
use lockbox_domain::{Result, VaultEntry};

/// Trait for vault entry persistence and retrieval.
///
/// Implementations are scoped: every operation applies to the
/// service/access-group pair the store was constructed with.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Get the entry stored under `key`, or `None` when absent.
    ///
    /// When `include_secret` is false the returned entry's secret payload
    /// is left unset even if one is stored, which keeps lookups cheap.
    async fn get(&self, key: &str, include_secret: bool) -> Result<Option<VaultEntry>>;

    /// Check whether an entry exists under `key`.
    async fn contains(&self, key: &str) -> Result<bool>;

    /// Insert the entry, or update the entry already stored under its key.
    ///
    /// Updates rewrite the mutable attributes and the modification
    /// timestamp; the creation timestamp and accessibility level of the
    /// stored entry are preserved.
    async fn put(&self, entry: VaultEntry) -> Result<()>;

    /// List every entry in scope, in creation order.
    ///
    /// `include_secret` behaves as in [`EntryStore::get`].
    async fn list(&self, include_secret: bool) -> Result<Vec<VaultEntry>>;

    /// Remove the entry stored under `key`. Succeeds when absent.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Remove every entry in scope. Succeeds on an empty vault.
    async fn clear(&self) -> Result<()>;
}
