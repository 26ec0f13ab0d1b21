//! Many readers and writers hitting shared engines at once: the storage
//! pool, the bandit learner, and the provenance tracker all promise
//! `Send + Sync` concurrent use (§5 "many pipelines can run
//! concurrently"); this exercises that promise under real thread
//! contention instead of trusting the type signature alone.

use std::sync::Arc;

use ircore_bandit::BanditLearner;
use ircore_core::config::BanditConfig;
use ircore_core::entry::EntryKind;
use ircore_core::traits::IEntryStorage;
use ircore_provenance::ProvenanceTracker;
use ircore_storage::StorageEngine;
use ircore_test_fixtures::builders;

#[test]
fn concurrent_writes_and_reads_do_not_corrupt_the_store() {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());

    std::thread::scope(|scope| {
        for i in 0..8 {
            let storage = storage.clone();
            scope.spawn(move || {
                let entry = builders::entry(
                    EntryKind::Knowledge,
                    &format!("doc {i}"),
                    &format!("body for document {i}"),
                    &format!("/docs/{i}.md"),
                );
                storage.create(&entry).unwrap();
            });
        }
    });

    assert_eq!(storage.total_entries().unwrap(), 8);
}

#[test]
fn bandit_learner_survives_concurrent_selection_and_reward() {
    let learner = Arc::new(BanditLearner::new(BanditConfig::default()));

    std::thread::scope(|scope| {
        for _ in 0..16 {
            let learner = learner.clone();
            scope.spawn(move || {
                let strategy = learner.select_arm(None);
                learner.update_reward(strategy, None, 0.7);
            });
        }
    });
}

#[test]
fn provenance_tracker_isolates_concurrent_sessions() {
    let tracker = Arc::new(ProvenanceTracker::new());

    let session_ids: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let tracker = tracker.clone();
                scope.spawn(move || {
                    let session_id = tracker.start_session(format!("pack-{i}"));
                    tracker
                        .register_source(&session_id, "fts", "store", "keyword match", serde_json::json!({}))
                        .unwrap();
                    tracker.end_session(&session_id).unwrap();
                    session_id
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for session_id in &session_ids {
        let info = tracker.generate(session_id).unwrap();
        assert_eq!(info.entries.len(), 1);
    }
}
