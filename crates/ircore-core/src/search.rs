//! Result shape returned by the Hybrid Retrieval Engine.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Which field(s) of an [`Entry`] a query matched against, surfaced so
/// callers (and the provenance tracker) can explain a result instead of
/// just trusting the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedField {
    Title,
    Body,
    Tag,
    Category,
    Path,
}

/// Per-factor breakdown of a [`SearchResult`]'s score, one field per signal
/// fused by the Rank Fusion Engine. Kept alongside the final score so a
/// caller can see *why* a result ranked where it did without re-deriving it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RelevanceFactors {
    pub title_match: f64,
    pub content_match: f64,
    pub tag_match: f64,
    pub category_match: f64,
    pub recency: f64,
    pub effectiveness: f64,
    pub usage: f64,
}

/// One ranked hit from the Hybrid Retrieval Engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub entry: Entry,
    pub score: f64,
    /// 1-based rank within the result set this was produced in.
    pub rank: usize,
    pub highlighted_title: Option<String>,
    pub snippets: Vec<String>,
    pub matched_fields: HashSet<MatchedField>,
    pub raw_match_count: usize,
    pub relevance_factors: RelevanceFactors,
}

impl SearchResult {
    pub fn new(entry: Entry, score: f64, rank: usize) -> Self {
        Self {
            entry,
            score,
            rank,
            highlighted_title: None,
            snippets: Vec::new(),
            matched_fields: HashSet::new(),
            raw_match_count: 0,
            relevance_factors: RelevanceFactors::default(),
        }
    }
}

/// Per-query overrides of the FTS Store's weighted ranking model and
/// highlight marker (`StorageConfig` supplies the defaults any `None`
/// field here falls back to).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    pub title_weight: Option<f64>,
    pub tag_weight: Option<f64>,
    pub content_weight: Option<f64>,
    pub category_weight: Option<f64>,
    pub highlight_open: Option<String>,
    pub highlight_close: Option<String>,
}

/// Result-set breakdown by kind and category, computed over every match
/// before `limit` truncation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFacets {
    pub by_kind: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
}

/// The FTS Store's rich `search(query)` response: the page of ranked
/// results plus facets, the total match count, and how long the query took.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub facets: SearchFacets,
    pub total_matches: usize,
    pub execution_time_ms: u64,
}

/// Re-rank a result set in place, re-deriving `rank` from descending score.
/// Ties keep their prior relative order (stable sort).
pub fn reassign_ranks(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    for (i, r) in results.iter_mut().enumerate() {
        r.rank = i + 1;
    }
}
