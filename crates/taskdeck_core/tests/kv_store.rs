use taskdeck_core::db::{open_db, open_db_in_memory};
use taskdeck_core::{
    KvRepository, MemoryKvRepository, PersistentStore, SqliteKvRepository, WriteThroughStore,
};

#[test]
fn sqlite_repo_returns_none_for_unknown_key() {
    let repo = SqliteKvRepository::new(open_db_in_memory().unwrap());
    assert_eq!(repo.get("@tasks_storage").unwrap(), None);
}

#[test]
fn sqlite_repo_put_replaces_previous_value() {
    let mut repo = SqliteKvRepository::new(open_db_in_memory().unwrap());

    repo.put("@categories_storage", r#"["Work"]"#).unwrap();
    repo.put("@categories_storage", r#"["Home","Work"]"#).unwrap();

    assert_eq!(
        repo.get("@categories_storage").unwrap().as_deref(),
        Some(r#"["Home","Work"]"#)
    );
}

#[test]
fn dropping_adapter_drains_queued_writes_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskdeck.sqlite3");

    {
        let repo = SqliteKvRepository::new(open_db(&path).unwrap());
        let store = WriteThroughStore::new(repo).unwrap();
        for round in 0..20 {
            store.write("counter", round.to_string());
        }
    }

    let repo = SqliteKvRepository::new(open_db(&path).unwrap());
    assert_eq!(repo.get("counter").unwrap().as_deref(), Some("19"));
}

#[test]
fn flush_orders_writes_per_key() {
    let store = WriteThroughStore::new(MemoryKvRepository::new()).unwrap();

    store.write("a", "1".to_string());
    store.write("b", "2".to_string());
    store.write("a", "3".to_string());
    store.flush().unwrap();

    assert_eq!(store.read("a").unwrap().as_deref(), Some("3"));
    assert_eq!(store.read("b").unwrap().as_deref(), Some("2"));
}
