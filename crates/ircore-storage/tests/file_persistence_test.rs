//! Entries survive closing and reopening a file-backed engine.

use ircore_core::entry::{Entry, EntryKind};
use ircore_core::search::SearchOptions;
use ircore_core::traits::IEntryStorage;
use ircore_storage::StorageEngine;

#[test]
fn entries_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("ircore.db");

    let entry_id = {
        let engine = StorageEngine::open(&db_path).unwrap();
        let entry = Entry::new(EntryKind::Knowledge, "persisted", "body", "/docs/persisted.md");
        engine.create(&entry).unwrap();
        engine.wal_checkpoint().unwrap();
        entry.id
    };

    let engine = StorageEngine::open(&db_path).unwrap();
    let fetched = engine.get(&entry_id).unwrap();
    assert!(fetched.is_some());
    assert_eq!(fetched.unwrap().title, "persisted");
}

#[test]
fn fts_search_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("ircore.db");

    {
        let engine = StorageEngine::open(&db_path).unwrap();
        let entry = Entry::new(EntryKind::Knowledge, "t", "findable_marker_123", "/docs/findable.md");
        engine.create(&entry).unwrap();
        engine.wal_checkpoint().unwrap();
    }

    let engine = StorageEngine::open(&db_path).unwrap();
    let results = engine.search_fts("findable_marker_123", 10, &SearchOptions::default()).unwrap();
    assert_eq!(results.len(), 1);
}
