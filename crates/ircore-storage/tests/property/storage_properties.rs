//! Property tests: insert/get roundtrip, bulk ops consistency.

use ircore_core::entry::{Entry, EntryKind};
use ircore_core::traits::IEntryStorage;
use ircore_storage::StorageEngine;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_insert_get_roundtrip(
        body in "[a-zA-Z0-9 ]{1,200}",
        idx in 0u32..100_000,
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let path = format!("/prop/{idx}.md");
        let entry = Entry::new(EntryKind::Knowledge, "prop title", &body, &path);

        engine.create(&entry).unwrap();
        let retrieved = engine.get(&entry.id).unwrap().unwrap();

        prop_assert_eq!(&retrieved.id, &entry.id);
        prop_assert_eq!(&retrieved.body, &body);
        prop_assert_eq!(retrieved.kind, EntryKind::Knowledge);
    }

    #[test]
    fn prop_bulk_insert_consistency(count in 1usize..30) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let entries: Vec<Entry> = (0..count)
            .map(|i| Entry::new(EntryKind::Knowledge, format!("t{i}"), "body", format!("/bulk/{i}.md")))
            .collect();

        let inserted = engine.create_bulk(&entries).unwrap();
        prop_assert_eq!(inserted, count);
        prop_assert_eq!(engine.total_entries().unwrap(), count);
    }
}
