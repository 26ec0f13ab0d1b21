//! `StorageEngine` — owns the `ConnectionPool` and implements
//! `IEntryStorage`.

use std::path::Path;

use chrono::{DateTime, Utc};
use ircore_core::config::StorageConfig;
use ircore_core::entry::{Entry, EntryKind};
use ircore_core::errors::IrResult;
use ircore_core::relationships::{RelationshipEdge, RelationshipType};
use ircore_core::search::{SearchOptions, SearchResponse, SearchResult};
use ircore_core::traits::IEntryStorage;

use crate::pool::ConnectionPool;
use crate::queries;

pub struct StorageEngine {
    pool: ConnectionPool,
    /// File-backed engines route reads through the pool; in-memory
    /// engines route reads through the writer since in-memory read
    /// connections are isolated databases that can't see the writer's
    /// changes.
    use_read_pool: bool,
    config: StorageConfig,
}

impl StorageEngine {
    pub fn open(path: &Path) -> IrResult<Self> {
        Self::open_with_config(path, StorageConfig::default())
    }

    pub fn open_with_config(path: &Path, config: StorageConfig) -> IrResult<Self> {
        let pool = ConnectionPool::open(path, crate::pool::ReadPool::default_size())?;
        Ok(Self { pool, use_read_pool: true, config })
    }

    pub fn open_in_memory() -> IrResult<Self> {
        Self::open_in_memory_with_config(StorageConfig::default())
    }

    pub fn open_in_memory_with_config(config: StorageConfig) -> IrResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        Ok(Self { pool, use_read_pool: false, config })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn with_reader<F, T>(&self, f: F) -> IrResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> IrResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn(f)
        }
    }

    /// Record that `id` was used (increments `usage_count`, stamps
    /// `last_used`). Called by the retrieval engine after serving a
    /// result, not part of `IEntryStorage` since it is a side effect of
    /// reading rather than a write a caller explicitly requests.
    pub fn record_usage(&self, id: &str) -> IrResult<()> {
        self.pool.writer.with_conn(|conn| queries::entry_crud::record_usage(conn, id))
    }

    pub fn get_by_path(&self, path: &str) -> IrResult<Option<Entry>> {
        self.with_reader(|conn| queries::entry_crud::get_by_path(conn, path))
    }

    pub fn delete_by_path(&self, path: &str) -> IrResult<()> {
        self.pool.writer.with_conn(|conn| queries::entry_crud::delete_by_path(conn, path))
    }

    pub fn total_entries(&self) -> IrResult<usize> {
        self.with_reader(queries::aggregation::total_entries)
    }

    pub fn average_effectiveness(&self) -> IrResult<f64> {
        self.with_reader(queries::aggregation::average_effectiveness)
    }

    pub fn fragmentation_pct(&self) -> IrResult<f64> {
        self.with_reader(queries::maintenance::fragmentation_pct)
    }

    pub fn incremental_vacuum(&self, pages: u32) -> IrResult<()> {
        self.pool.writer.with_conn(|conn| queries::maintenance::incremental_vacuum(conn, pages))
    }

    pub fn wal_checkpoint(&self) -> IrResult<()> {
        self.pool.writer.with_conn(queries::maintenance::wal_checkpoint)
    }

    pub fn integrity_check(&self) -> IrResult<bool> {
        self.with_reader(queries::maintenance::integrity_check)
    }

    pub fn rebuild_fts(&self) -> IrResult<()> {
        self.pool.writer.with_conn(queries::maintenance::rebuild_fts)
    }
}

impl IEntryStorage for StorageEngine {
    fn create(&self, entry: &Entry) -> IrResult<()> {
        self.pool.writer.with_conn(|conn| queries::entry_crud::insert_entry(conn, entry))
    }

    fn get(&self, id: &str) -> IrResult<Option<Entry>> {
        self.with_reader(|conn| queries::entry_crud::get_entry(conn, id))
    }

    fn update(&self, entry: &Entry) -> IrResult<()> {
        self.pool.writer.with_conn(|conn| queries::entry_crud::update_entry(conn, entry))
    }

    fn delete(&self, id: &str) -> IrResult<()> {
        self.pool.writer.with_conn(|conn| queries::entry_crud::delete_entry(conn, id))
    }

    fn create_bulk(&self, entries: &[Entry]) -> IrResult<usize> {
        self.pool.writer.with_conn(|conn| queries::entry_crud::bulk_insert(conn, entries))
    }

    fn get_bulk(&self, ids: &[String]) -> IrResult<Vec<Entry>> {
        self.with_reader(|conn| queries::entry_crud::bulk_get(conn, ids))
    }

    fn query_by_kind(&self, kind: EntryKind) -> IrResult<Vec<Entry>> {
        self.with_reader(|conn| queries::entry_query::query_by_kind(conn, kind))
    }

    fn query_by_tags(&self, tags: &[String]) -> IrResult<Vec<Entry>> {
        self.with_reader(|conn| queries::entry_query::query_by_tags(conn, tags))
    }

    fn query_by_date_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> IrResult<Vec<Entry>> {
        self.with_reader(|conn| queries::entry_query::query_by_date_range(conn, from, to))
    }

    fn search_fts(&self, query: &str, limit: usize, options: &SearchOptions) -> IrResult<Vec<SearchResult>> {
        self.with_reader(|conn| queries::fts_search::search_fts(conn, query, limit, &self.config, options))
    }

    fn search(&self, query: &str, limit: usize, options: &SearchOptions) -> IrResult<SearchResponse> {
        self.with_reader(|conn| queries::fts_search::search(conn, query, limit, &self.config, options))
    }

    fn suggest(&self, prefix: &str, limit: usize) -> IrResult<Vec<String>> {
        self.with_reader(|conn| queries::entry_query::suggest(conn, prefix, limit))
    }

    fn get_relationships(
        &self,
        entry_id: &str,
        rel_type: Option<RelationshipType>,
    ) -> IrResult<Vec<RelationshipEdge>> {
        self.with_reader(|conn| queries::relationship_ops::get_relationships(conn, entry_id, rel_type))
    }

    fn add_relationship(&self, edge: &RelationshipEdge) -> IrResult<()> {
        self.pool.writer.with_conn(|conn| queries::relationship_ops::add_relationship(conn, edge))
    }

    fn remove_relationship(&self, source_id: &str, target_id: &str) -> IrResult<()> {
        self.pool
            .writer
            .with_conn(|conn| queries::relationship_ops::remove_relationship(conn, source_id, target_id))
    }

    fn count_by_kind(&self) -> IrResult<Vec<(EntryKind, usize)>> {
        self.with_reader(queries::aggregation::count_by_kind)
    }

    fn stale_count(&self, threshold_days: u64) -> IrResult<usize> {
        self.with_reader(|conn| queries::aggregation::stale_count(conn, threshold_days))
    }

    fn vacuum(&self) -> IrResult<()> {
        self.pool.writer.with_conn(queries::maintenance::full_vacuum)
    }
}
