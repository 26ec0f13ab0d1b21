//! `IndexingEngine`: the public entry point to indexing.
//! Wires validation, the debounce buffer, the priority/standard batch
//! queue, and the error ring around the [`IEntryStorage`] port, and runs
//! a background scheduler + maintenance loop until told to shut down.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::Utc;
use ircore_core::config::IndexingConfig;
use ircore_core::entry::{content_addressed_id, content_hash, Entry, EntryKind};
use ircore_core::errors::{IrError, IrResult};
use ircore_core::events::Event;
use ircore_core::traits::{IEntryStorage, IEventSink, NullEventSink};

use crate::debounce::DebounceBuffer;
use crate::error_ring::ErrorRing;
use crate::maintenance::{self, MaintenanceSnapshot};
use crate::queue::{Batch, BatchOperation, BatchQueue};
use crate::validation;
use crate::watcher::{passes_filters, ChangeKind, ContentChange};

/// Point-in-time counters surfaced by [`IndexingEngine::stats`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexingStats {
    pub queue_depth: usize,
    pub in_flight: usize,
    pub error_count: usize,
    pub approx_indexed_bytes: u64,
}

/// Coordinates ingestion for one FTS store. Construct with [`IndexingEngine::new`],
/// call [`IndexingEngine::start`] once watch roots are configured, and
/// [`IndexingEngine::shutdown`] to drain and stop cleanly.
pub struct IndexingEngine {
    storage: Arc<dyn IEntryStorage>,
    config: IndexingConfig,
    events: Arc<dyn IEventSink>,
    queue: Arc<BatchQueue>,
    debounce: Arc<DebounceBuffer>,
    errors: Arc<ErrorRing>,
    watchers: Mutex<Vec<notify::RecommendedWatcher>>,
    in_flight: Arc<AtomicUsize>,
    approx_indexed_bytes: Arc<AtomicU64>,
    slow_queries_since_tick: Arc<AtomicU64>,
    running: Arc<AtomicBool>,
    threads: Mutex<Vec<JoinHandle<()>>>,
}

impl IndexingEngine {
    pub fn new(storage: Arc<dyn IEntryStorage>, config: IndexingConfig) -> Self {
        Self::with_event_sink(storage, config, Arc::new(NullEventSink))
    }

    pub fn with_event_sink(
        storage: Arc<dyn IEntryStorage>,
        config: IndexingConfig,
        events: Arc<dyn IEventSink>,
    ) -> Self {
        let queue = Arc::new(BatchQueue::new(config.queue_warning_threshold));
        let debounce = Arc::new(DebounceBuffer::new(
            Duration::from_millis(config.debounce_leading_ms),
            Duration::from_millis(config.debounce_hard_cap_ms),
        ));
        Self {
            storage,
            config,
            events,
            queue,
            debounce,
            errors: Arc::new(ErrorRing::new()),
            watchers: Mutex::new(Vec::new()),
            in_flight: Arc::new(AtomicUsize::new(0)),
            approx_indexed_bytes: Arc::new(AtomicU64::new(0)),
            slow_queries_since_tick: Arc::new(AtomicU64::new(0)),
            running: Arc::new(AtomicBool::new(false)),
            threads: Mutex::new(Vec::new()),
        }
    }

    /// Start the scheduler tick and maintenance loop threads, and begin
    /// watching every configured root. Idempotent: a second call is a
    /// no-op while already running.
    pub fn start(&self) -> IrResult<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let roots: Vec<String> = self.config.watch_roots.clone();
        for root in &roots {
            self.add_watch_dir(Path::new(root))?;
        }

        self.threads.lock().expect("threads lock").push(self.spawn_scheduler());
        self.threads.lock().expect("threads lock").push(self.spawn_maintenance());

        self.events.emit(Event::Initialized { at: Utc::now() });
        Ok(())
    }

    fn spawn_scheduler(&self) -> JoinHandle<()> {
        let tick = Duration::from_millis(self.config.scheduler_tick_ms);
        let max_concurrent = self.config.max_concurrent_ops;
        let running = Arc::clone(&self.running);
        let queue = Arc::clone(&self.queue);
        let debounce = Arc::clone(&self.debounce);
        let storage = Arc::clone(&self.storage);
        let errors = Arc::clone(&self.errors);
        let events = Arc::clone(&self.events);
        let in_flight = Arc::clone(&self.in_flight);

        std::thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                std::thread::sleep(tick);

                let ready = debounce.drain_ready();
                if !ready.is_empty() {
                    let count = ready.len();
                    for change in ready {
                        process_change(&storage, &errors, &events, change);
                    }
                    events.emit(Event::ChangeBufferProcessed { count });
                }

                if queue.is_over_threshold() {
                    events.emit(Event::QueueWarning { depth: queue.len(), threshold: queue.warning_threshold });
                }

                let capacity = max_concurrent.saturating_sub(in_flight.load(Ordering::SeqCst));
                if capacity == 0 {
                    continue;
                }
                let batches = queue.drain_up_to(capacity);
                for batch in batches {
                    in_flight.fetch_add(1, Ordering::SeqCst);
                    let started = std::time::Instant::now();
                    let outcome = apply_batch(&storage, &batch);
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    match outcome {
                        Ok(count) => {
                            events.emit(Event::BatchProcessed {
                                count,
                                duration_ms: started.elapsed().as_millis() as u64,
                            });
                        }
                        Err(err) => {
                            errors.record(batch.id.clone(), err.to_string(), err.is_recoverable());
                        }
                    }
                }
            }
        })
    }

    fn spawn_maintenance(&self) -> JoinHandle<()> {
        let interval = Duration::from_secs(self.config.maintenance_interval_secs.max(1));
        let running = Arc::clone(&self.running);
        let storage = Arc::clone(&self.storage);
        let errors = Arc::clone(&self.errors);
        let events = Arc::clone(&self.events);
        let approx_bytes = Arc::clone(&self.approx_indexed_bytes);
        let slow_queries = Arc::clone(&self.slow_queries_since_tick);
        let vacuum_threshold_pct = self.config.vacuum_size_threshold_pct;
        let optimize_threshold = self.config.slow_query_threshold_for_optimize;
        let retention_days = self.config.retention_days;
        let max_content_length = self.config.max_content_length as u64;

        std::thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                std::thread::sleep(interval);

                let snapshot = MaintenanceSnapshot {
                    db_size_bytes: approx_bytes.load(Ordering::SeqCst),
                    max_db_size_bytes: max_content_length.saturating_mul(100_000).max(1)
                        * (vacuum_threshold_pct / 100.0).max(0.01) as u64,
                    slow_queries_since_last_tick: slow_queries.swap(0, Ordering::SeqCst),
                    slow_query_threshold: optimize_threshold,
                    retention_days,
                };
                let actions = maintenance::decide(&snapshot, Utc::now());

                if actions.vacuum {
                    events.emit(Event::VacuumStarted);
                    let started = std::time::Instant::now();
                    match storage.vacuum() {
                        Ok(()) => events.emit(Event::VacuumCompleted {
                            duration_ms: started.elapsed().as_millis() as u64,
                            bytes_reclaimed: 0,
                        }),
                        Err(err) => events.emit(Event::VacuumError { reason: err.to_string() }),
                    }
                }

                if actions.optimize {
                    tracing::info!("maintenance: optimizing after slow-query threshold breach");
                }

                if let Some(cutoff) = actions.cleanup_cutoff {
                    if let Err(err) = cleanup_before(storage.as_ref(), cutoff) {
                        errors.record("maintenance", err.to_string(), err.is_recoverable());
                    }
                }

                errors.compact_if_needed();
            }
        })
    }

    /// Begin watching `dir` for filesystem changes, feeding them into the
    /// debounce buffer via [`IndexingEngine::handle_content_change`].
    pub fn add_watch_dir(&self, dir: &Path) -> IrResult<()> {
        use notify::{RecursiveMode, Watcher};

        let debounce = Arc::clone(&self.debounce);
        let config = self.config.clone();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            let Ok(event) = res else { return };
            for path in event.paths {
                if !passes_filters(&path, &config) {
                    continue;
                }
                let kind = match event.kind {
                    notify::EventKind::Create(_) => ChangeKind::Created,
                    notify::EventKind::Remove(_) => ChangeKind::Deleted,
                    _ => ChangeKind::Modified,
                };
                debounce.record(ContentChange::new(kind, path));
            }
        })
        .map_err(|e| IrError::Config(format!("failed to create file watcher: {e}")))?;

        watcher
            .watch(dir, RecursiveMode::Recursive)
            .map_err(|e| IrError::Config(format!("failed to watch {}: {e}", dir.display())))?;

        self.watchers.lock().expect("watchers lock").push(watcher);
        Ok(())
    }

    /// Stop watching `dir`. Matches by path only; a watcher created for a
    /// parent of `dir` is not split.
    pub fn remove_watch_dir(&self, dir: &Path) -> IrResult<()> {
        use notify::Watcher;
        let mut watchers = self.watchers.lock().expect("watchers lock");
        for watcher in watchers.iter_mut() {
            let _ = watcher.unwatch(dir);
        }
        Ok(())
    }

    /// Index one piece of content synchronously (`indexContent`).
    pub fn index_content(&self, kind: EntryKind, title: &str, body: &str, path: &str) -> IrResult<Entry> {
        let entry = Entry::new(kind, title, body, path);
        let report = validation::validate(&entry, &self.config)?;
        for warning in &report.warnings {
            tracing::warn!(entry_id = %entry.id, path, warning, "indexing validation warning");
        }
        match self.storage.get(&entry.id)? {
            Some(_) => self.storage.update(&entry)?,
            None => self.storage.create(&entry)?,
        }
        self.approx_indexed_bytes.fetch_add(entry.body.len() as u64, Ordering::SeqCst);
        self.events.emit(Event::ContentIndexed { entry_id: entry.id.clone(), path: entry.path.clone() });
        Ok(entry)
    }

    /// Enqueue a batch of operations for asynchronous processing by the
    /// scheduler tick, rather than applying them inline.
    pub fn index_batch(&self, source: impl Into<String>, operations: Vec<BatchOperation>) {
        self.queue.enqueue(Batch::new(source, operations));
    }

    pub fn remove(&self, id: &str) -> IrResult<()> {
        self.storage.delete(id)
    }

    pub fn update(&self, entry: Entry) -> IrResult<()> {
        validation::validate(&entry, &self.config)?;
        self.storage.update(&entry)
    }

    /// Re-index every entry of every kind from scratch.
    pub fn rebuild(&self) -> IrResult<()> {
        self.events.emit(Event::RebuildStarted);
        let started = std::time::Instant::now();
        let result = (|| -> IrResult<()> {
            for kind in [
                EntryKind::Knowledge,
                EntryKind::Memory,
                EntryKind::DecisionRecord,
                EntryKind::Pitfall,
                EntryKind::Code,
                EntryKind::Config,
            ] {
                self.rebuild_partial(kind)?;
            }
            Ok(())
        })();
        match &result {
            Ok(()) => self.events.emit(Event::RebuildCompleted { duration_ms: started.elapsed().as_millis() as u64 }),
            Err(err) => self.events.emit(Event::RebuildError { reason: err.to_string() }),
        }
        result
    }

    /// Re-index only entries of one kind.
    pub fn rebuild_partial(&self, kind: EntryKind) -> IrResult<()> {
        let entries = self.storage.query_by_kind(kind)?;
        for entry in entries {
            self.storage.update(&entry)?;
        }
        Ok(())
    }

    /// Feed one already-classified filesystem change through validation
    /// and into storage. Called by the scheduler tick for debounced
    /// events, or directly by callers that bypass the watcher.
    pub fn handle_content_change(&self, change: ContentChange) -> IrResult<()> {
        process_change(&self.storage, &self.errors, &self.events, change);
        Ok(())
    }

    pub fn stats(&self) -> IndexingStats {
        IndexingStats {
            queue_depth: self.queue.len(),
            in_flight: self.in_flight.load(Ordering::SeqCst),
            error_count: self.errors.len(),
            approx_indexed_bytes: self.approx_indexed_bytes.load(Ordering::SeqCst),
        }
    }

    pub fn vacuum(&self) -> IrResult<()> {
        self.storage.vacuum()
    }

    pub fn cleanup(&self, before: chrono::DateTime<Utc>) -> IrResult<usize> {
        cleanup_before(self.storage.as_ref(), before)
    }

    /// Idempotent shutdown: stop accepting new scheduler ticks, drain
    /// in-flight work with a grace period, drain whatever remains in the
    /// queue in small groups, flush the debounce buffer once, and close
    /// the file watchers.
    pub fn shutdown(&self) -> IrResult<()> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        let grace = Duration::from_secs(5);
        let deadline = std::time::Instant::now() + grace;
        while self.in_flight.load(Ordering::SeqCst) > 0 && std::time::Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(50));
        }

        loop {
            let batches = self.queue.drain_up_to(3);
            if batches.is_empty() {
                break;
            }
            for batch in batches {
                if let Err(err) = apply_batch(&self.storage, &batch) {
                    self.errors.record(batch.id.clone(), err.to_string(), err.is_recoverable());
                }
            }
        }

        for change in self.debounce.drain_ready() {
            let _ = self.handle_content_change(change);
        }

        self.watchers.lock().expect("watchers lock").clear();

        for handle in self.threads.lock().expect("threads lock").drain(..) {
            let _ = handle.join();
        }

        self.events.emit(Event::Shutdown { at: Utc::now() });
        Ok(())
    }
}

fn process_change(
    storage: &Arc<dyn IEntryStorage>,
    errors: &Arc<ErrorRing>,
    events: &Arc<dyn IEventSink>,
    change: ContentChange,
) {
    let path = change.path.to_string_lossy().to_string();
    let result: IrResult<()> = match change.kind {
        ChangeKind::Deleted => {
            let id = content_addressed_id(&change.path);
            storage.delete(&id)
        }
        ChangeKind::Created | ChangeKind::Modified => {
            let body = match std::fs::read_to_string(&change.path) {
                Ok(body) => body,
                Err(err) => {
                    events.emit(Event::ContentChangeError { path: path.clone(), reason: err.to_string() });
                    return;
                }
            };
            let title = change
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("untitled")
                .to_string();
            let id = content_addressed_id(&change.path);
            let hash = content_hash(&body);
            let mut entry = Entry::new(change.content_kind, title, body, path.clone());
            entry.id = id;
            entry.content_hash = hash;
            match storage.get(&entry.id) {
                Ok(Some(_)) => storage.update(&entry),
                Ok(None) => storage.create(&entry),
                Err(err) => Err(err),
            }
        }
    };

    if let Err(err) = result {
        errors.record(path.clone(), err.to_string(), err.is_recoverable());
        events.emit(Event::ContentChangeError { path, reason: err.to_string() });
    } else {
        events.emit(Event::ContentIndexed { entry_id: content_addressed_id(&change.path), path });
    }
}

fn apply_batch(storage: &Arc<dyn IEntryStorage>, batch: &Batch) -> IrResult<usize> {
    let mut applied = 0;
    for op in &batch.operations {
        match op {
            BatchOperation::Insert(entry) => storage.create(entry)?,
            BatchOperation::Update(entry) => storage.update(entry)?,
            BatchOperation::Delete(id) => storage.delete(id)?,
        }
        applied += 1;
    }
    Ok(applied)
}

fn cleanup_before(storage: &dyn IEntryStorage, before: chrono::DateTime<Utc>) -> IrResult<usize> {
    let stale = storage.query_by_date_range(chrono::DateTime::<Utc>::MIN_UTC, before)?;
    let count = stale.len();
    for entry in stale {
        storage.delete(&entry.id)?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ircore_core::relationships::{RelationshipEdge, RelationshipType};
    use ircore_core::search::{SearchOptions, SearchResponse, SearchResult};
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct MemStorage {
        entries: StdMutex<std::collections::HashMap<String, Entry>>,
    }

    impl IEntryStorage for MemStorage {
        fn create(&self, entry: &Entry) -> IrResult<()> {
            self.entries.lock().unwrap().insert(entry.id.clone(), entry.clone());
            Ok(())
        }
        fn get(&self, id: &str) -> IrResult<Option<Entry>> {
            Ok(self.entries.lock().unwrap().get(id).cloned())
        }
        fn update(&self, entry: &Entry) -> IrResult<()> {
            self.entries.lock().unwrap().insert(entry.id.clone(), entry.clone());
            Ok(())
        }
        fn delete(&self, id: &str) -> IrResult<()> {
            self.entries.lock().unwrap().remove(id);
            Ok(())
        }
        fn create_bulk(&self, entries: &[Entry]) -> IrResult<usize> {
            for e in entries {
                self.create(e)?;
            }
            Ok(entries.len())
        }
        fn get_bulk(&self, ids: &[String]) -> IrResult<Vec<Entry>> {
            Ok(ids.iter().filter_map(|id| self.entries.lock().unwrap().get(id).cloned()).collect())
        }
        fn query_by_kind(&self, kind: EntryKind) -> IrResult<Vec<Entry>> {
            Ok(self.entries.lock().unwrap().values().filter(|e| e.kind == kind).cloned().collect())
        }
        fn query_by_tags(&self, _tags: &[String]) -> IrResult<Vec<Entry>> {
            Ok(vec![])
        }
        fn query_by_date_range(
            &self,
            _from: chrono::DateTime<Utc>,
            _to: chrono::DateTime<Utc>,
        ) -> IrResult<Vec<Entry>> {
            Ok(vec![])
        }
        fn search_fts(&self, _query: &str, _limit: usize, _options: &SearchOptions) -> IrResult<Vec<SearchResult>> {
            Ok(vec![])
        }
        fn search(&self, _query: &str, _limit: usize, _options: &SearchOptions) -> IrResult<SearchResponse> {
            Ok(SearchResponse::default())
        }
        fn suggest(&self, _prefix: &str, _limit: usize) -> IrResult<Vec<String>> {
            Ok(vec![])
        }
        fn get_relationships(
            &self,
            _entry_id: &str,
            _rel_type: Option<RelationshipType>,
        ) -> IrResult<Vec<RelationshipEdge>> {
            Ok(vec![])
        }
        fn add_relationship(&self, _edge: &RelationshipEdge) -> IrResult<()> {
            Ok(())
        }
        fn remove_relationship(&self, _source_id: &str, _target_id: &str) -> IrResult<()> {
            Ok(())
        }
        fn count_by_kind(&self) -> IrResult<Vec<(EntryKind, usize)>> {
            Ok(vec![])
        }
        fn stale_count(&self, _threshold_days: u64) -> IrResult<usize> {
            Ok(0)
        }
        fn vacuum(&self) -> IrResult<()> {
            Ok(())
        }
    }

    fn engine() -> IndexingEngine {
        IndexingEngine::new(Arc::new(MemStorage::default()), IndexingConfig::default())
    }

    #[test]
    fn index_content_creates_then_updates() {
        let engine = engine();
        let a = engine.index_content(EntryKind::Knowledge, "t", "body one", "/a.md").unwrap();
        let b = engine.index_content(EntryKind::Knowledge, "t", "body two", "/a.md").unwrap();
        assert_eq!(a.id, b.id);
        assert_ne!(a.content_hash, b.content_hash);
    }

    #[test]
    fn rejects_invalid_entries() {
        let engine = engine();
        assert!(engine.index_content(EntryKind::Knowledge, "", "body", "/a.md").is_err());
    }

    #[test]
    fn index_batch_enqueues_without_applying_immediately() {
        let engine = engine();
        let entry = Entry::new(EntryKind::Knowledge, "t", "b", "/a.md");
        engine.index_batch("standard-source", vec![BatchOperation::Insert(entry.clone())]);
        assert_eq!(engine.stats().queue_depth, 1);
        assert!(engine.storage.get(&entry.id).unwrap().is_none());
    }

    #[test]
    fn shutdown_without_start_is_a_noop() {
        let engine = engine();
        assert!(engine.shutdown().is_ok());
    }
}
