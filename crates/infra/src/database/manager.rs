//! Database connection manager backed by the SQLCipher pool.

use std::path::{Path, PathBuf};

use lockbox_domain::{Result, VaultError};
use tracing::info;

use crate::security::SecureString;
use crate::storage::{SqlCipherPool, SqlCipherPoolConfig, StorageError};
use crate::storage::connection::SqlCipherConnection;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Database manager that wraps an [`SqlCipherPool`].
pub struct DbManager {
    pool: SqlCipherPool,
    path: PathBuf,
}

impl DbManager {
    /// Create a new manager with the given pool size and SQLCipher key.
    pub fn new<P: AsRef<Path>>(
        db_path: P,
        pool_size: u32,
        encryption_key: SecureString,
    ) -> Result<Self> {
        if encryption_key.is_empty() {
            return Err(VaultError::Security("database encryption key not provided".into()));
        }

        let path = db_path.as_ref().to_path_buf();

        let config =
            SqlCipherPoolConfig { max_size: pool_size.max(1), ..SqlCipherPoolConfig::default() };

        let pool =
            SqlCipherPool::new(&path, encryption_key, config).map_err(map_storage_error)?;

        info!(
            db_path = %path.display(),
            max_connections = pool.max_size(),
            "sqlcipher pool initialised"
        );

        Ok(Self { pool, path })
    }

    /// Acquire a SQLCipher connection from the pool.
    pub fn get_connection(&self) -> Result<SqlCipherConnection> {
        self.pool.get_connection().map_err(map_storage_error)
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        create_schema(&conn)?;
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Perform a health check to verify database connectivity.
    ///
    /// Acquires a connection from the pool and executes a simple query to
    /// verify the database is accessible and responding.
    pub fn health_check(&self) -> Result<()> {
        self.pool.health_check().map_err(map_storage_error)
    }
}

fn create_schema(conn: &SqlCipherConnection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| map_storage_error(StorageError::Migration(e.to_string())))?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?, CAST(strftime('%s','now') AS INTEGER))",
        &[&SCHEMA_VERSION],
    )
    .map_err(map_storage_error)?;
    Ok(())
}

pub(crate) fn map_storage_error(err: StorageError) -> VaultError {
    match err {
        StorageError::WrongKeyOrNotEncrypted => {
            VaultError::Storage("Database key error or not encrypted".into())
        }
        StorageError::Keychain(msg) => VaultError::Security(msg),
        other => VaultError::Storage(other.to_string()),
    }
}
