//! SQLite-backed collection store.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, OptionalExtension, params};

use super::{CollectionKind, PersistResult, StorageBackend};

/// SQLite implementation of [`StorageBackend`].
///
/// One row per collection; each save replaces the whole payload.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens or creates a SQLite-backed store at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory SQLite store.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }
}

impl StorageBackend for SqliteBackend {
    fn load(&self, kind: CollectionKind) -> PersistResult<Option<String>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM collections WHERE name = ?1",
                params![kind.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn save(&mut self, kind: CollectionKind, payload: &str) -> PersistResult<()> {
        self.conn.execute(
            "INSERT INTO collections(name, ts_ms, payload) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE SET ts_ms = excluded.ts_ms, payload = excluded.payload",
            params![kind.as_str(), now_ms() as i64, payload],
        )?;
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
