use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use cogtest_core::{CogError, CogResult, KvStore};

use crate::schema::init_db;

/// [`KvStore`] over a single SQLite table. The connection sits behind a mutex
/// so one handle can serve concurrent image preloads.
pub struct SqliteKvStore {
    conn: Mutex<Connection>,
}

impl SqliteKvStore {
    pub fn new(path: &Path) -> CogResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CogError::Store(format!("cannot create db directory: {e}")))?;
        }
        let conn = Connection::open(path)
            .map_err(|e| CogError::Store(format!("cannot open database: {e}")))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| CogError::Store(e.to_string()))?;
        init_db(&conn)?;
        debug!("opened store at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> CogResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| CogError::Store(format!("cannot open in-memory db: {e}")))?;
        init_db(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> CogResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| CogError::Store(format!("connection lock poisoned: {e}")))
    }
}

impl KvStore for SqliteKvStore {
    fn get(&self, key: &str) -> CogResult<Option<String>> {
        self.conn()?
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| CogError::Store(e.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> CogResult<()> {
        self.conn()?
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| CogError::Store(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> CogResult<()> {
        self.conn()?
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(|e| CogError::Store(e.to_string()))?;
        Ok(())
    }

    fn list_keys(&self) -> CogResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT key FROM kv ORDER BY key")
            .map_err(|e| CogError::Store(e.to_string()))?;
        let keys = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| CogError::Store(e.to_string()))?
            .collect::<Result<Vec<String>, _>>()
            .map_err(|e| CogError::Store(e.to_string()))?;
        Ok(keys)
    }

    fn remove_many(&self, keys: &[String]) -> CogResult<usize> {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| CogError::Store(e.to_string()))?;
        let mut removed = 0;
        {
            let mut stmt = tx
                .prepare("DELETE FROM kv WHERE key = ?1")
                .map_err(|e| CogError::Store(e.to_string()))?;
            for key in keys {
                removed += stmt
                    .execute(params![key])
                    .map_err(|e| CogError::Store(e.to_string()))?;
            }
        }
        tx.commit().map_err(|e| CogError::Store(e.to_string()))?;
        Ok(removed)
    }
}
