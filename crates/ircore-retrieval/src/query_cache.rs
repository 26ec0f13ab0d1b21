//! Small in-memory cache for whole retrieval responses, keyed on the
//! request shape (query text, kind filter, project, agent types,
//! limit/offset). Distinct from the Context Pack Cache
//! (`ircore-cache`), which memoizes the assembled pack further
//! downstream.

use std::time::Duration;

use ircore_core::entry::EntryKind;
use ircore_core::search::SearchResult;
use moka::sync::Cache;

pub struct QueryCache {
    inner: Cache<String, Vec<SearchResult>>,
}

impl QueryCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self { inner: Cache::builder().max_capacity(max_capacity).time_to_live(ttl).build() }
    }

    pub fn get(&self, key: &str) -> Option<Vec<SearchResult>> {
        self.inner.get(key)
    }

    pub fn insert(&self, key: String, results: Vec<SearchResult>) {
        self.inner.insert(key, results);
    }
}

/// Derive a stable cache key from the request shape. Two requests that
/// would produce the same candidate set map to the same key.
pub fn cache_key(
    query: &str,
    kind_filter: Option<EntryKind>,
    project_id: Option<&str>,
    agent_types: &[String],
    limit: usize,
    offset: usize,
) -> String {
    let mut sorted_agents = agent_types.to_vec();
    sorted_agents.sort();
    let raw = format!(
        "{query}|{}|{}|{}|{limit}|{offset}",
        kind_filter.map(|k| k.as_str()).unwrap_or("any"),
        project_id.unwrap_or(""),
        sorted_agents.join(","),
    );
    blake3::hash(raw.as_bytes()).to_hex().to_string()
}
