use tracing::debug;

use crate::database::{get_db_pool, SqlitePool};
use super::in_memory::InMemoryStorage;

/// Where a repository reads and writes its records
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// SQLite through the connection pool
    Database(SqlitePool),
    /// Process-local tables, lost on restart
    Memory(InMemoryStorage),
}

impl StorageBackend {
    /// Use the global database pool when it has been initialised, otherwise
    /// fall back to a fresh in-memory store.
    pub fn from_environment() -> Self {
        match get_db_pool() {
            Ok(pool) => {
                debug!("Using database storage");
                StorageBackend::Database(pool)
            }
            Err(e) => {
                debug!("Database not available ({}), using in-memory storage", e);
                StorageBackend::Memory(InMemoryStorage::new())
            }
        }
    }

    /// A fresh in-memory backend
    pub fn in_memory() -> Self {
        StorageBackend::Memory(InMemoryStorage::new())
    }

    /// Whether records survive a restart
    pub fn is_persistent(&self) -> bool {
        matches!(self, StorageBackend::Database(_))
    }
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::from_environment()
    }
}
