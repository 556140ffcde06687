//! Durable tier: a single SQLite table of keyed JSON documents.

use std::path::Path;
use std::time::Duration;

use episodic_common::{Error, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};

use crate::BlobStore;

/// Type alias for the blob database pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled blob database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const SCHEMA: &str = "
    PRAGMA journal_mode = WAL;
    CREATE TABLE IF NOT EXISTS blobs (
        key        TEXT PRIMARY KEY NOT NULL,
        value      TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    );
";

/// How long a checkout waits before the tier is treated as unavailable.
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(2);

/// Pool handle for the durable tier. Connections are checked out per
/// operation through [`SqliteBlobStore::session`].
#[derive(Clone)]
pub struct SqliteBlobStore {
    pool: DbPool,
}

impl SqliteBlobStore {
    /// Open (creating if needed) the database at `path` and ensure the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(Error::storage(format!(
                    "Blob database directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch(SCHEMA)
        });

        let pool = Pool::builder()
            .max_size(4)
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build(manager)
            .map_err(|e| {
                Error::storage(format!(
                    "Failed to open blob database {}: {}",
                    path.display(),
                    e
                ))
            })?;

        Ok(Self { pool })
    }

    /// Check out a connection for one operation.
    pub fn session(&self) -> Result<SqliteSession> {
        let conn = self
            .pool
            .get()
            .map_err(|e| Error::storage(format!("Failed to get blob connection: {}", e)))?;
        Ok(SqliteSession { conn })
    }
}

impl std::fmt::Debug for SqliteBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBlobStore")
            .field("state", &self.pool.state())
            .finish()
    }
}

/// A checked-out connection. Returned to the pool on drop.
pub struct SqliteSession {
    conn: PooledConnection,
}

impl BlobStore for SqliteSession {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM blobs WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| Error::storage(format!("Failed to read {key}: {e}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO blobs (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![key, value],
            )
            .map_err(|e| Error::storage(format!("Failed to write {key}: {e}")))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM blobs WHERE key = ?1", [key])
            .map_err(|e| Error::storage(format!("Failed to delete {key}: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteBlobStore::open(dir.path().join("blobs.db")).unwrap();
        let session = store.session().unwrap();

        assert_eq!(session.get("a").unwrap(), None);
        session.set("a", "{\"x\":1}").unwrap();
        session.set("a", "{\"x\":2}").unwrap();
        assert_eq!(session.get("a").unwrap().as_deref(), Some("{\"x\":2}"));
        session.delete("a").unwrap();
        session.delete("a").unwrap();
        assert_eq!(session.get("a").unwrap(), None);
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blobs.db");
        {
            let store = SqliteBlobStore::open(&path).unwrap();
            store.session().unwrap().set("k", "v").unwrap();
        }
        let store = SqliteBlobStore::open(&path).unwrap();
        assert_eq!(store.session().unwrap().get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_unopenable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = SqliteBlobStore::open(dir.path().join("missing").join("blobs.db"));
        assert!(matches!(result, Err(Error::Storage(_))));
    }
}
