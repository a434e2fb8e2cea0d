//! Vault entry repository implementation using SQLCipher
//!
//! Implements the `EntryStore` port over the encrypted database. Every
//! statement is scoped to the service/access-group pair fixed in the
//! vault configuration; an empty string stands in for "no access group"
//! so the primary key covers unscoped entries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use lockbox_core::EntryStore;
use lockbox_domain::{Accessibility, EntryError, Result as DomainResult, VaultConfig, VaultEntry};
use rusqlite::{Row, ToSql};
use tokio::task;

use super::manager::{map_storage_error, DbManager};
use crate::storage::{StorageError, StorageResult};
use crate::storage::connection::SqlCipherConnection;

const ENTRY_COLUMNS: &str =
    "key, account, label, description, notes, synchronizable, accessibility, \
     created_at, modified_at";

/// SQLCipher-backed implementation of `EntryStore`
pub struct SqlCipherEntryStore {
    db: Arc<DbManager>,
    config: VaultConfig,
}

impl SqlCipherEntryStore {
    /// Create a new store over the given database, scoped by `config`.
    pub fn new(db: Arc<DbManager>, config: VaultConfig) -> Self {
        Self { db, config }
    }

    fn service(&self) -> String {
        self.config.service().to_string()
    }

    // '' stands in for "no access group" (see schema.sql)
    fn group(&self) -> String {
        self.config.access_group().unwrap_or("").to_string()
    }
}

#[async_trait]
impl EntryStore for SqlCipherEntryStore {
    async fn get(&self, key: &str, include_secret: bool) -> DomainResult<Option<VaultEntry>> {
        let db = Arc::clone(&self.db);
        let (service, group) = (self.service(), self.group());
        let key = key.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<VaultEntry>> {
            let conn = db.get_connection()?;

            let secret_column = if include_secret { "secret" } else { "NULL" };
            let sql = format!(
                "SELECT {ENTRY_COLUMNS}, {secret_column} FROM vault_entries
                 WHERE service = ?1 AND access_group = ?2 AND key = ?3"
            );

            let result = conn.query_row(&sql, &[&service, &group, &key], map_entry_row);

            match result {
                Ok(record) => Ok(Some(decode_entry(record)?)),
                Err(StorageError::Rusqlite(rusqlite::Error::QueryReturnedNoRows)) => Ok(None),
                Err(err) => Err(map_storage_error(err)),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn contains(&self, key: &str) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);
        let (service, group) = (self.service(), self.group());
        let key = key.to_string();

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            exists_in_scope(&conn, &service, &group, &key).map_err(map_storage_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn put(&self, entry: VaultEntry) -> DomainResult<()> {
        if entry.key.trim().is_empty() {
            return Err(EntryError::InvalidKey.into());
        }

        let db = Arc::clone(&self.db);
        let (service, group) = (self.service(), self.group());
        let accessibility = self.config.accessibility();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;

            if exists_in_scope(&conn, &service, &group, &entry.key).map_err(map_storage_error)? {
                update_entry(&conn, &service, &group, &entry).map_err(map_storage_error)?;
            } else {
                insert_entry(&conn, &service, &group, accessibility, &entry)
                    .map_err(map_storage_error)?;
            }

            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list(&self, include_secret: bool) -> DomainResult<Vec<VaultEntry>> {
        let db = Arc::clone(&self.db);
        let (service, group) = (self.service(), self.group());

        task::spawn_blocking(move || -> DomainResult<Vec<VaultEntry>> {
            let conn = db.get_connection()?;

            let secret_column = if include_secret { "secret" } else { "NULL" };
            let sql = format!(
                "SELECT {ENTRY_COLUMNS}, {secret_column} FROM vault_entries
                 WHERE service = ?1 AND access_group = ?2
                 ORDER BY created_at ASC, rowid ASC"
            );

            let records = conn
                .query_map(&sql, &[&service, &group], map_entry_row)
                .map_err(map_storage_error)?;

            records.into_iter().map(|r| decode_entry(r).map_err(Into::into)).collect()
        })
        .await
        .map_err(map_join_error)?
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let (service, group) = (self.service(), self.group());
        let key = key.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            // Deleting a missing key is not an error
            conn.execute(
                "DELETE FROM vault_entries WHERE service = ?1 AND access_group = ?2 AND key = ?3",
                &[&service, &group, &key],
            )
            .map_err(map_storage_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn clear(&self) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let (service, group) = (self.service(), self.group());

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "DELETE FROM vault_entries WHERE service = ?1 AND access_group = ?2",
                &[&service, &group],
            )
            .map_err(map_storage_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Raw row image, decoded and validated separately so record-level
/// failures surface as typed entry errors rather than SQL errors.
struct EntryRecord {
    key: String,
    account: Option<String>,
    label: Option<String>,
    description: Option<String>,
    notes: Option<String>,
    synchronizable: i64,
    accessibility: String,
    created_at: i64,
    modified_at: i64,
    secret: Option<Vec<u8>>,
}

fn map_entry_row(row: &Row<'_>) -> rusqlite::Result<EntryRecord> {
    Ok(EntryRecord {
        key: row.get(0)?,
        account: row.get(1)?,
        label: row.get(2)?,
        description: row.get(3)?,
        notes: row.get(4)?,
        synchronizable: row.get(5)?,
        accessibility: row.get(6)?,
        created_at: row.get(7)?,
        modified_at: row.get(8)?,
        secret: row.get(9)?,
    })
}

fn decode_entry(record: EntryRecord) -> Result<VaultEntry, EntryError> {
    // The level itself is not exposed on the entry; an unknown tag still
    // means the row was written by something we don't understand.
    record
        .accessibility
        .parse::<Accessibility>()
        .map_err(|_| EntryError::InvalidRecord(format!(
            "unknown accessibility tag: {}",
            record.accessibility
        )))?;

    let mut entry = VaultEntry::new(record.key)?;
    entry.account = record.account;
    entry.label = record.label;
    entry.description = record.description;
    entry.notes = record.notes;
    entry.secret = record.secret;
    entry.synchronizable = int_to_bool(record.synchronizable);
    entry.created_at = record.created_at;
    entry.modified_at = record.modified_at;

    Ok(entry)
}

fn exists_in_scope(
    conn: &SqlCipherConnection,
    service: &str,
    group: &str,
    key: &str,
) -> StorageResult<bool> {
    let result = conn.query_row(
        "SELECT 1 FROM vault_entries
         WHERE service = ?1 AND access_group = ?2 AND key = ?3 LIMIT 1",
        &[&service, &group, &key],
        |_| Ok(()),
    );

    match result {
        Ok(()) => Ok(true),
        Err(StorageError::Rusqlite(rusqlite::Error::QueryReturnedNoRows)) => Ok(false),
        Err(err) => Err(err),
    }
}

fn insert_entry(
    conn: &SqlCipherConnection,
    service: &str,
    group: &str,
    accessibility: Accessibility,
    entry: &VaultEntry,
) -> StorageResult<()> {
    let now = Utc::now().timestamp();
    let synchronizable = bool_to_int(entry.synchronizable);
    let accessibility = accessibility.as_str();

    let params: [&dyn ToSql; 12] = [
        &service,
        &group,
        &entry.key,
        &entry.account,
        &entry.label,
        &entry.description,
        &entry.notes,
        &entry.secret,
        &synchronizable,
        &accessibility,
        &now,
        &now,
    ];

    conn.execute(
        "INSERT INTO vault_entries (
            service, access_group, key, account, label, description, notes,
            secret, synchronizable, accessibility, created_at, modified_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params.as_slice(),
    )?;

    Ok(())
}

// Accessibility and created_at are fixed at insert time.
fn update_entry(
    conn: &SqlCipherConnection,
    service: &str,
    group: &str,
    entry: &VaultEntry,
) -> StorageResult<()> {
    let now = Utc::now().timestamp();
    let synchronizable = bool_to_int(entry.synchronizable);

    let params: [&dyn ToSql; 10] = [
        &entry.account,
        &entry.label,
        &entry.description,
        &entry.notes,
        &entry.secret,
        &synchronizable,
        &now,
        &service,
        &group,
        &entry.key,
    ];

    conn.execute(
        "UPDATE vault_entries SET
            account = ?1, label = ?2, description = ?3, notes = ?4,
            secret = ?5, synchronizable = ?6, modified_at = ?7
         WHERE service = ?8 AND access_group = ?9 AND key = ?10",
        params.as_slice(),
    )?;

    Ok(())
}

// =============================================================================
// Error Mapping
// =============================================================================

fn map_join_error(err: task::JoinError) -> lockbox_domain::VaultError {
    lockbox_domain::VaultError::Internal(format!("Task join error: {err}"))
}

// =============================================================================
// Utility Functions
// =============================================================================

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

fn int_to_bool(value: i64) -> bool {
    value != 0
}

// =============================================================================
// Tests
// =============================================================================
