//! SQLCipher connection pool
//!
//! r2d2-based connection pooling for SQLCipher databases. Every pooled
//! connection has the encryption key and connection pragmas applied
//! before first use, and the pool verifies at construction that the key
//! actually decrypts the file.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{debug, info, warn};

use super::cipher::{configure_sqlcipher, is_wrong_key_message, SqlCipherConfig};
use super::config::SqlCipherPoolConfig;
use super::connection::SqlCipherConnection;
use super::error::{StorageError, StorageResult};
use super::pragmas::apply_connection_pragmas;
use crate::security::SecureString;

/// SQLCipher connection pool
///
/// Manages a pool of encrypted SQLite connections using r2d2.
#[derive(Debug)]
pub struct SqlCipherPool {
    pool: Pool<SqliteConnectionManager>,
    config: SqlCipherPoolConfig,
}

impl SqlCipherPool {
    /// Create a new SQLCipher connection pool
    ///
    /// # Process
    /// 1. Create connection manager with encryption pragmas
    /// 2. Build r2d2 pool with configured size and timeouts
    /// 3. Test a connection to verify encryption works
    ///
    /// # Errors
    /// Returns an error if:
    /// - Database file can't be accessed
    /// - Encryption key is wrong
    /// - Pool creation fails
    pub fn new(
        path: &Path,
        encryption_key: SecureString,
        config: SqlCipherPoolConfig,
    ) -> StorageResult<Self> {
        let cipher_config = SqlCipherConfig::new(encryption_key);

        // Initialization callback applied to every pooled connection
        let pool_config = config.clone();
        let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
            configure_sqlcipher(conn, &cipher_config)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

            apply_connection_pragmas(conn, &pool_config)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

            Ok(())
        });

        // Build r2d2 pool
        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|e| {
                warn!("failed to create connection pool: {e}");
                classify_pool_error(&e.to_string())
            })?;

        // Verify encryption works before handing the pool out
        {
            let conn = pool.get().map_err(|e| {
                warn!("failed to get test connection: {e}");
                classify_pool_error(&e.to_string())
            })?;

            super::cipher::verify_encryption(&conn)?;
            debug!("encryption verified successfully");
        }

        info!(max_connections = config.max_size, db_path = %path.display(), "SQLCipher pool created");

        Ok(Self { pool, config })
    }

    /// Get a connection from the pool.
    pub fn get_connection(&self) -> StorageResult<SqlCipherConnection> {
        match self.pool.get() {
            Ok(conn) => Ok(SqlCipherConnection::new(conn)),
            Err(e) => {
                let err_str = e.to_string().to_lowercase();
                if err_str.contains("timeout") {
                    warn!("connection timeout after {:?}", self.config.connection_timeout);
                    Err(StorageError::Timeout(self.config.connection_timeout.as_secs()))
                } else {
                    warn!("connection error: {e}");
                    Err(StorageError::Connection(format!("Failed to get connection: {e}")))
                }
            }
        }
    }

    /// Check that the pool can hand out a working connection.
    pub fn health_check(&self) -> StorageResult<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", &[], |row| row.get::<_, i32>(0))?;
        Ok(())
    }

    /// Maximum number of connections this pool manages.
    pub fn max_size(&self) -> u32 {
        self.config.max_size
    }
}

fn classify_pool_error(message: &str) -> StorageError {
    if is_wrong_key_message(message) {
        StorageError::WrongKeyOrNotEncrypted
    } else {
        StorageError::Connection(format!("Failed to create pool: {message}"))
    }
}
