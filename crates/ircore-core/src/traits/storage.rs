use chrono::{DateTime, Utc};

use crate::entry::{Entry, EntryKind};
use crate::errors::IrResult;
use crate::relationships::{RelationshipEdge, RelationshipType};
use crate::search::{SearchOptions, SearchResponse, SearchResult};

/// Storage port implemented by `ircore-storage`. Everything above this
/// crate talks to the FTS store only through this trait, so the retrieval
/// and assembler crates never pull in `rusqlite` directly.
pub trait IEntryStorage: Send + Sync {
    fn create(&self, entry: &Entry) -> IrResult<()>;
    fn get(&self, id: &str) -> IrResult<Option<Entry>>;
    fn update(&self, entry: &Entry) -> IrResult<()>;
    fn delete(&self, id: &str) -> IrResult<()>;

    fn create_bulk(&self, entries: &[Entry]) -> IrResult<usize>;
    fn get_bulk(&self, ids: &[String]) -> IrResult<Vec<Entry>>;

    fn query_by_kind(&self, kind: EntryKind) -> IrResult<Vec<Entry>>;
    fn query_by_tags(&self, tags: &[String]) -> IrResult<Vec<Entry>>;
    fn query_by_date_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> IrResult<Vec<Entry>>;

    /// Ranked results using the weighted field-match model (title/tag/
    /// content/category weights, recency/effectiveness/usage boosts,
    /// min-score cutoff, snippets, highlighting); `options` overrides
    /// whatever the store's `StorageConfig` defaults to for this query.
    fn search_fts(&self, query: &str, limit: usize, options: &SearchOptions) -> IrResult<Vec<SearchResult>>;

    /// The richer public `search` contract: `search_fts`'s ranked page
    /// plus facet counts, the total match count, and execution time.
    fn search(&self, query: &str, limit: usize, options: &SearchOptions) -> IrResult<SearchResponse>;

    /// Up to `limit` entries related to `id` by shared tags, shared
    /// category, or a direct relationship edge, excluding `id` itself.
    /// Default implementation composes the other port methods, so any
    /// implementor gets it for free.
    fn find_similar(&self, id: &str, limit: usize) -> IrResult<Vec<Entry>> {
        let anchor = match self.get(id)? {
            Some(entry) => entry,
            None => return Ok(Vec::new()),
        };

        let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
        seen.insert(anchor.id.clone());
        let mut scored: Vec<(u32, Entry)> = Vec::new();

        if !anchor.metadata.tags.is_empty() {
            let tags: Vec<String> = anchor.metadata.tags.iter().cloned().collect();
            for entry in self.query_by_tags(&tags)? {
                if seen.insert(entry.id.clone()) {
                    let overlap = entry.metadata.tags.intersection(&anchor.metadata.tags).count() as u32;
                    scored.push((overlap * 2, entry));
                }
            }
        }

        if let Some(category) = anchor.metadata.category.clone() {
            for entry in self.query_by_kind(anchor.kind)? {
                if entry.metadata.category.as_deref() == Some(category.as_str())
                    && seen.insert(entry.id.clone())
                {
                    scored.push((1, entry));
                }
            }
        }

        for edge in self.get_relationships(&anchor.id, None)? {
            let other_id = if edge.source_id == anchor.id { &edge.target_id } else { &edge.source_id };
            if seen.insert(other_id.clone()) {
                if let Some(entry) = self.get(other_id)? {
                    scored.push((10, entry));
                }
            }
        }

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(scored.into_iter().take(limit).map(|(_, entry)| entry).collect())
    }

    /// Completion candidates (entry titles) starting with `prefix`,
    /// case-insensitive.
    fn suggest(&self, prefix: &str, limit: usize) -> IrResult<Vec<String>>;

    fn get_relationships(
        &self,
        entry_id: &str,
        rel_type: Option<RelationshipType>,
    ) -> IrResult<Vec<RelationshipEdge>>;
    fn add_relationship(&self, edge: &RelationshipEdge) -> IrResult<()>;
    fn remove_relationship(&self, source_id: &str, target_id: &str) -> IrResult<()>;

    fn count_by_kind(&self) -> IrResult<Vec<(EntryKind, usize)>>;
    fn stale_count(&self, threshold_days: u64) -> IrResult<usize>;

    fn vacuum(&self) -> IrResult<()>;
}
