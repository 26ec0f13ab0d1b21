//! `HybridRetriever`: the Hybrid Retrieval Engine. Wires the query
//! cache, the bandit strategy selector, the four retrieval modes, the
//! Feature Extractor, and the Rank Fusion Engine around the
//! [`IEntryStorage`] / [`IVectorSearch`] ports.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use ircore_bandit::BanditLearner;
use ircore_core::bandit::Strategy;
use ircore_core::config::RetrievalConfig;
use ircore_core::entry::EntryKind;
use ircore_core::errors::IrResult;
use ircore_core::search::{reassign_ranks, SearchResult};
use ircore_core::traits::{IEntryStorage, IVectorSearch};
use tracing::{debug, info, warn};

use crate::errors::{RetrievalError, RetrievalResult};
use crate::fusion::enhancements::{self, BoostContext};
use crate::fusion::{rrf, weighted};
use crate::query_cache::{cache_key, QueryCache};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalMode {
    Parallel,
    Cascade,
    Adaptive,
    Ensemble,
}

#[derive(Debug, Clone, Default)]
pub struct RetrievalRequest {
    pub query: String,
    pub kind_filter: Option<EntryKind>,
    pub project_id: Option<String>,
    pub agent_types: Vec<String>,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone)]
pub struct RetrievalOutcome {
    pub results: Vec<SearchResult>,
    pub strategy: Strategy,
    pub cache_hit: bool,
}

pub struct HybridRetriever {
    storage: Arc<dyn IEntryStorage>,
    vector_search: Option<Arc<dyn IVectorSearch>>,
    bandit: Arc<BanditLearner>,
    config: RetrievalConfig,
    mode: RetrievalMode,
    parallel_timeout: Duration,
    cache: QueryCache,
}

impl HybridRetriever {
    pub fn new(
        storage: Arc<dyn IEntryStorage>,
        bandit: Arc<BanditLearner>,
        config: RetrievalConfig,
        mode: RetrievalMode,
    ) -> Self {
        Self {
            storage,
            vector_search: None,
            bandit,
            config,
            mode,
            parallel_timeout: Duration::from_millis(800),
            cache: QueryCache::new(1000, Duration::from_secs(300)),
        }
    }

    pub fn with_vector_search(mut self, vector_search: Arc<dyn IVectorSearch>) -> Self {
        self.vector_search = Some(vector_search);
        self
    }

    pub fn with_parallel_timeout(mut self, timeout: Duration) -> Self {
        self.parallel_timeout = timeout;
        self
    }

    /// Run the full pipeline: cache check, strategy selection, mode
    /// execution, feature extraction, enrichment, fusion and
    /// enhancements, then truncate/cache/record.
    pub fn retrieve(&self, request: &RetrievalRequest, query_embedding: Option<&[f32]>) -> RetrievalResult<RetrievalOutcome> {
        let key = cache_key(
            &request.query,
            request.kind_filter,
            request.project_id.as_deref(),
            &request.agent_types,
            request.limit,
            request.offset,
        );

        if let Some(cached) = self.cache.get(&key) {
            debug!(query = %request.query, "query cache hit");
            let strategy = self.bandit.select_arm(request.agent_types.first().map(String::as_str));
            return Ok(RetrievalOutcome { results: cached, strategy, cache_hit: true });
        }

        let context = request.agent_types.first().map(String::as_str);
        let strategy = self.bandit.select_arm(context);
        info!(query = %request.query, strategy = strategy.as_str(), "strategy selected");

        let mut results = match self.mode {
            RetrievalMode::Parallel => self.run_parallel(request, strategy, query_embedding)?,
            RetrievalMode::Cascade => self.run_cascade(request, strategy, query_embedding)?,
            RetrievalMode::Adaptive => self.run_adaptive(request, strategy, query_embedding)?,
            RetrievalMode::Ensemble => self.run_ensemble(request, query_embedding)?,
        };

        if results.is_empty() {
            warn!(query = %request.query, "retrieval produced no candidates");
            return Err(RetrievalError::NoCandidates);
        }

        let boost_ctx = BoostContext {
            project_id: request.project_id.as_deref(),
            agent_type: context,
            query: &request.query,
        };
        enhancements::apply_diversity_penalty(&mut results);
        enhancements::apply_query_boosts(&mut results, &boost_ctx);
        enhancements::apply_strategy_tie_break(&mut results, strategy);

        let offset = request.offset.min(results.len());
        let limit = if request.limit == 0 { results.len() } else { request.limit };
        let mut truncated: Vec<SearchResult> = results.into_iter().skip(offset).take(limit).collect();
        reassign_ranks(&mut truncated);

        self.cache.insert(key, truncated.clone());

        Ok(RetrievalOutcome { results: truncated, strategy, cache_hit: false })
    }

    fn run_fts(&self, query: &str, limit: usize) -> IrResult<Vec<SearchResult>> {
        self.storage.search_fts(query, limit, &ircore_core::search::SearchOptions::default())
    }

    /// Run FTS and (if timed out or unavailable) return what completed.
    /// Races a storage call against `self.parallel_timeout` on its own
    /// thread so a slow method doesn't block the others.
    fn run_fts_racing(&self, query: &str, limit: usize) -> Option<Vec<SearchResult>> {
        race(self.parallel_timeout, {
            let storage = Arc::clone(&self.storage);
            let query = query.to_string();
            move || {
                storage
                    .search_fts(&query, limit, &ircore_core::search::SearchOptions::default())
                    .unwrap_or_default()
            }
        })
    }

    fn run_vector_racing(&self, embedding: &[f32], limit: usize) -> Option<Vec<(String, f64)>> {
        let vector_search = self.vector_search.clone()?;
        if !vector_search.is_available() {
            return None;
        }
        let embedding = embedding.to_vec();
        race(self.parallel_timeout, move || vector_search.search(&embedding, limit).unwrap_or_default())
    }

    fn run_parallel(&self, request: &RetrievalRequest, strategy: Strategy, query_embedding: Option<&[f32]>) -> RetrievalResult<Vec<SearchResult>> {
        let limit = effective_limit(request, self.config.max_results);
        let fts_results = self.run_fts_racing(&request.query, limit).unwrap_or_default();

        let vector_list: Option<Vec<(String, f64)>> = query_embedding.and_then(|emb| self.run_vector_racing(emb, limit));

        let by_id: std::collections::HashMap<String, SearchResult> = fts_results.into_iter().map(|r| (r.entry.id.clone(), r)).collect();

        let fts_ranked: Vec<(String, usize, f64)> = {
            let mut ranked: Vec<&SearchResult> = by_id.values().collect();
            ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
            ranked.into_iter().enumerate().map(|(i, r)| (r.entry.id.clone(), i + 1, r.score)).collect()
        };

        let vector_ranked: Vec<(String, usize, f64)> = vector_list
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, (id, score))| (id, i + 1, score))
            .collect();

        let weight_for_semantic = if strategy == Strategy::SemanticFocused { self.config.vector_weight * 1.5 } else { self.config.vector_weight };

        let fused = weighted::fuse(&[(fts_ranked.as_slice(), self.config.fts_weight), (vector_ranked.as_slice(), weight_for_semantic)]);

        Ok(resolve_fused(fused, &by_id))
    }

    fn run_cascade(&self, request: &RetrievalRequest, _strategy: Strategy, query_embedding: Option<&[f32]>) -> RetrievalResult<Vec<SearchResult>> {
        let limit = effective_limit(request, self.config.max_results);
        let fts_results = self.run_fts(&request.query, limit).map_err(RetrievalError::Storage)?;

        let mean_score = if fts_results.is_empty() {
            0.0
        } else {
            fts_results.iter().map(|r| r.score).sum::<f64>() / fts_results.len() as f64
        };

        if fts_results.len() >= 5 && mean_score > 0.5 {
            return Ok(fts_results);
        }

        let by_id: std::collections::HashMap<String, SearchResult> = fts_results.into_iter().map(|r| (r.entry.id.clone(), r)).collect();
        let fts_ranked: Vec<(String, usize, f64)> = {
            let mut ranked: Vec<&SearchResult> = by_id.values().collect();
            ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
            ranked.into_iter().enumerate().map(|(i, r)| (r.entry.id.clone(), i + 1, r.score)).collect()
        };

        let vector_ranked: Vec<(String, usize, f64)> = query_embedding
            .and_then(|emb| self.run_vector_racing(emb, limit))
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, (id, score))| (id, i + 1, score))
            .collect();

        let fused = weighted::fuse(&[(fts_ranked.as_slice(), self.config.fts_weight), (vector_ranked.as_slice(), self.config.vector_weight)]);
        Ok(resolve_fused(fused, &by_id))
    }

    fn run_adaptive(&self, request: &RetrievalRequest, strategy: Strategy, query_embedding: Option<&[f32]>) -> RetrievalResult<Vec<SearchResult>> {
        let limit = effective_limit(request, self.config.max_results);
        match strategy {
            Strategy::FtsHeavy => self.run_fts(&request.query, limit).map_err(RetrievalError::Storage),
            Strategy::VectorHeavy => {
                let vector_list = query_embedding.and_then(|emb| self.run_vector_racing(emb, limit));
                match vector_list {
                    Some(list) if !list.is_empty() => {
                        let ids: Vec<String> = list.iter().map(|(id, _)| id.clone()).collect();
                        let entries = self.storage.get_bulk(&ids).map_err(RetrievalError::Storage)?;
                        let by_id: std::collections::HashMap<String, ircore_core::entry::Entry> =
                            entries.into_iter().map(|e| (e.id.clone(), e)).collect();
                        let results: Vec<SearchResult> = list
                            .into_iter()
                            .enumerate()
                            .filter_map(|(i, (id, score))| by_id.get(&id).cloned().map(|entry| SearchResult::new(entry, score, i + 1)))
                            .collect();
                        Ok(results)
                    }
                    // Vector search unavailable or empty: fall back to FTS alone.
                    _ => self.run_fts(&request.query, limit).map_err(RetrievalError::Storage),
                }
            }
            _ => self.run_parallel(request, strategy, query_embedding),
        }
    }

    fn run_ensemble(&self, request: &RetrievalRequest, query_embedding: Option<&[f32]>) -> RetrievalResult<Vec<SearchResult>> {
        let limit = effective_limit(request, self.config.max_results);

        let fts_only = self.run_fts(&request.query, limit).unwrap_or_default();
        let vector_only: Vec<SearchResult> = query_embedding
            .and_then(|emb| self.run_vector_racing(emb, limit))
            .map(|list| {
                let ids: Vec<String> = list.into_iter().map(|(id, _)| id).collect();
                self.storage.get_bulk(&ids).unwrap_or_default()
            })
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, entry)| SearchResult::new(entry, 1.0 / (i as f64 + 1.0), i + 1))
            .collect();

        let mut by_id: std::collections::HashMap<String, SearchResult> = std::collections::HashMap::new();
        for r in fts_only.iter().chain(vector_only.iter()) {
            by_id.entry(r.entry.id.clone()).or_insert_with(|| r.clone());
        }

        let fts_list: Vec<String> = fts_only.iter().map(|r| r.entry.id.clone()).collect();
        let vector_list: Vec<String> = vector_only.iter().map(|r| r.entry.id.clone()).collect();

        let fused = rrf::fuse(&[("fts", fts_list.as_slice()), ("vector", vector_list.as_slice())], self.config.rrf_k);
        Ok(resolve_fused_rrf(fused, &by_id))
    }
}

fn effective_limit(request: &RetrievalRequest, default_limit: usize) -> usize {
    let requested = request.offset + if request.limit == 0 { default_limit } else { request.limit };
    requested.max(5)
}

fn resolve_fused(fused: Vec<(String, f64)>, by_id: &std::collections::HashMap<String, SearchResult>) -> Vec<SearchResult> {
    fused
        .into_iter()
        .enumerate()
        .filter_map(|(i, (id, score))| {
            by_id.get(&id).cloned().map(|mut r| {
                r.score = score;
                r.rank = i + 1;
                r
            })
        })
        .collect()
}

fn resolve_fused_rrf(
    fused: Vec<(String, crate::fusion::rrf::FusedScore)>,
    by_id: &std::collections::HashMap<String, SearchResult>,
) -> Vec<SearchResult> {
    fused
        .into_iter()
        .enumerate()
        .filter_map(|(i, (id, fused_score))| {
            by_id.get(&id).cloned().map(|mut r| {
                r.score = fused_score.score;
                r.rank = i + 1;
                r
            })
        })
        .collect()
}

/// Run `work` on its own thread and wait up to `timeout` for it; if the
/// deadline passes first, the thread is abandoned (it still finishes and
/// its result is dropped) and `None` is returned so the caller can
/// degrade by skipping that list.
fn race<T: Send + 'static>(timeout: Duration, work: impl FnOnce() -> T + Send + 'static) -> Option<T> {
    let (tx, rx) = mpsc::channel();
    let start = Instant::now();
    thread::spawn(move || {
        let result = work();
        let _ = tx.send(result);
    });
    match rx.recv_timeout(timeout) {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(elapsed_ms = start.elapsed().as_millis() as u64, "racing method timed out");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_limit_has_a_floor() {
        let request = RetrievalRequest { limit: 2, offset: 0, ..Default::default() };
        assert!(effective_limit(&request, 50) >= 5);
    }

    #[test]
    fn effective_limit_accounts_for_offset() {
        let request = RetrievalRequest { limit: 10, offset: 20, ..Default::default() };
        assert_eq!(effective_limit(&request, 50), 30);
    }

    #[test]
    fn race_returns_none_on_timeout() {
        let result = race::<u32>(Duration::from_millis(10), || {
            thread::sleep(Duration::from_millis(200));
            1
        });
        assert!(result.is_none());
    }

    #[test]
    fn race_returns_some_when_fast_enough() {
        let result = race(Duration::from_millis(200), || 42u32);
        assert_eq!(result, Some(42));
    }
}
