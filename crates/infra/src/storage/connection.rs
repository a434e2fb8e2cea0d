//! SQLCipher connection wrapper
//!
//! Wraps a pooled rusqlite connection. The connection is automatically
//! returned to the pool when dropped.

use std::ops::{Deref, DerefMut};

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection as RusqliteConnection, Row, ToSql};

use super::error::{StorageError, StorageResult};

/// SQLCipher connection wrapper
pub struct SqlCipherConnection {
    inner: PooledConnection<SqliteConnectionManager>,
}

impl SqlCipherConnection {
    /// Create a new connection wrapper from a pooled connection
    pub fn new(conn: PooledConnection<SqliteConnectionManager>) -> Self {
        Self { inner: conn }
    }

    /// Execute a SQL statement, returning the number of affected rows.
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> StorageResult<usize> {
        self.inner.execute(sql, params).map_err(StorageError::from)
    }

    /// Execute a SQL query that returns a single row
    ///
    /// The callback function is called with the row data.
    pub fn query_row<T, F>(&self, sql: &str, params: &[&dyn ToSql], f: F) -> StorageResult<T>
    where
        F: FnOnce(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        self.inner.query_row(sql, params, f).map_err(StorageError::from)
    }

    /// Run a query and collect every mapped row.
    pub fn query_map<T, F>(&self, sql: &str, params: &[&dyn ToSql], mut f: F) -> StorageResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        let mut stmt = self.inner.prepare(sql).map_err(StorageError::from)?;
        let rows = stmt.query_map(params, |row| f(row)).map_err(StorageError::from)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(StorageError::from)
    }
}

// Allow using SqlCipherConnection as RusqliteConnection
impl Deref for SqlCipherConnection {
    type Target = RusqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for SqlCipherConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::security::SecureString;
    use crate::storage::{SqlCipherPool, SqlCipherPoolConfig};

    fn test_key() -> SecureString {
        SecureString::from("test_key_64_chars_long_aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa")
    }

    #[test]
    fn connection_execute() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let pool =
            SqlCipherPool::new(&db_path, test_key(), SqlCipherPoolConfig::default()).unwrap();
        let conn = pool.get_connection().unwrap();

        let result = conn.execute("CREATE TABLE test (id INTEGER PRIMARY KEY, name TEXT)", &[]);
        assert!(result.is_ok());

        let name = "Alice";
        let result = conn.execute("INSERT INTO test (name) VALUES (?)", &[&name]);
        assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn connection_query_row() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let pool =
            SqlCipherPool::new(&db_path, test_key(), SqlCipherPoolConfig::default()).unwrap();
        let conn = pool.get_connection().unwrap();

        conn.execute("CREATE TABLE test (id INTEGER PRIMARY KEY, name TEXT)", &[]).unwrap();
        let name = "Bob";
        conn.execute("INSERT INTO test (name) VALUES (?)", &[&name]).unwrap();

        let result: String =
            conn.query_row("SELECT name FROM test WHERE id = ?", &[&1], |row| row.get(0)).unwrap();

        assert_eq!(result, "Bob");
    }

    #[test]
    fn connection_query_map() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let pool =
            SqlCipherPool::new(&db_path, test_key(), SqlCipherPoolConfig::default()).unwrap();
        let conn = pool.get_connection().unwrap();

        conn.execute("CREATE TABLE test (id INTEGER PRIMARY KEY, name TEXT)", &[]).unwrap();
        for name in ["Charlie", "Diana"] {
            conn.execute("INSERT INTO test (name) VALUES (?)", &[&name]).unwrap();
        }

        let names: Vec<String> = conn
            .query_map("SELECT name FROM test ORDER BY id", &[], |row| row.get(0))
            .unwrap();
        assert_eq!(names, ["Charlie", "Diana"]);
    }
}
