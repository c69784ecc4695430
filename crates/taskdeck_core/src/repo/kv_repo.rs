//! Key-value backend contract with SQLite and in-memory implementations.
//!
//! # Invariants
//! - `put` is an upsert: the previous value under the key is replaced.
//! - `get` returns `None` for keys never written.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type KvResult<T> = Result<T, KvError>;

/// Error for key-value reads, writes and adapter plumbing.
#[derive(Debug)]
pub enum KvError {
    /// Storage backend failure.
    Db(DbError),
    /// Writer thread could not be started.
    Io(std::io::Error),
    /// A thread panicked while holding the backend lock.
    Poisoned,
    /// Writer thread is no longer accepting commands.
    WriterStopped,
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "failed to start storage writer: {err}"),
            Self::Poisoned => write!(f, "storage backend lock poisoned"),
            Self::WriterStopped => write!(f, "storage writer has stopped"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Poisoned | Self::WriterStopped => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Backend contract for string values under string keys.
pub trait KvRepository: Send {
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> KvResult<()>;
}

/// SQLite-backed key-value repository over the `kv_store` table.
///
/// Owns its connection so it can move onto the writer thread.
pub struct SqliteKvRepository {
    conn: Connection,
}

impl SqliteKvRepository {
    /// Wraps a connection that already has migrations applied.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KvRepository for SqliteKvRepository {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local repository. Values are lost when it is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvRepository {
    entries: BTreeMap<String, String>,
}

impl MemoryKvRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `entries`.
    pub fn seeded<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl KvRepository for MemoryKvRepository {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KvRepository, MemoryKvRepository};

    #[test]
    fn memory_repo_upserts() {
        let mut repo = MemoryKvRepository::seeded([("k", "v1")]);
        assert_eq!(repo.get("k").unwrap().as_deref(), Some("v1"));

        repo.put("k", "v2").unwrap();
        assert_eq!(repo.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(repo.get("missing").unwrap(), None);
    }
}
