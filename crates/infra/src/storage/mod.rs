//! SQLCipher storage plumbing
//!
//! Connection pooling, encryption pragma application, and error types for
//! the encrypted vault database.

pub mod cipher;
pub mod config;
pub mod connection;
pub mod error;
pub mod pool;
pub mod pragmas;

pub use cipher::SqlCipherConfig;
pub use config::SqlCipherPoolConfig;
pub use connection::SqlCipherConnection;
pub use error::{StorageError, StorageResult};
pub use pool::SqlCipherPool;
