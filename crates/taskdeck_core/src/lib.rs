//! Core domain logic for TaskDeck.
//! This crate is the single source of truth for task and category invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{Platform, StorageKeys, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::filter::{filter_options, visible_tasks, Filter};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::kv_repo::{KvError, KvRepository, KvResult, MemoryKvRepository, SqliteKvRepository};
pub use repo::write_through::{PersistentStore, WriteThroughStore};
pub use service::task_store::TaskStore;
pub use service::task_view::TaskView;

/// Task store persisting to SQLite through the background writer.
pub type SqliteTaskStore = TaskStore<WriteThroughStore>;

/// Opens the database named by `config` and returns a hydrated task store.
///
/// # Errors
/// - Returns an error when the database cannot be opened or migrated, or
///   when the writer thread cannot start. Unreadable saved state is not an
///   error; it hydrates to empty collections.
pub fn open_task_store(config: &StoreConfig) -> KvResult<SqliteTaskStore> {
    let conn = db::open_db(&config.db_path)?;
    let persistence = WriteThroughStore::new(SqliteKvRepository::new(conn))?;
    let mut store = TaskStore::new(persistence, config.keys());
    store.initialize();
    Ok(store)
}

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
