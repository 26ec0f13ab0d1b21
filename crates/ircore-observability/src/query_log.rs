//! Query performance logging: query text, strategy used, latency, result
//! count, token budget used, cache hits. Append-only ring buffer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    pub strategy: Option<String>,
    pub latency: Duration,
    pub result_count: usize,
    pub token_budget: usize,
    pub tokens_used: usize,
    pub cache_hits: usize,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    pub fn new(
        query: impl Into<String>,
        strategy: Option<String>,
        latency: Duration,
        result_count: usize,
        token_budget: usize,
        tokens_used: usize,
        cache_hits: usize,
    ) -> Self {
        Self {
            query: query.into(),
            strategy,
            latency,
            result_count,
            token_budget,
            tokens_used,
            cache_hits,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: Vec<QueryLogEntry>,
    max_entries: usize,
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryLog {
    pub fn new() -> Self {
        Self::with_capacity(50_000)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self { entries: Vec::new(), max_entries }
    }

    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            query = %entry.query,
            strategy = ?entry.strategy,
            latency_ms = entry.latency.as_millis() as u64,
            result_count = entry.result_count,
            tokens_used = entry.tokens_used,
            cache_hits = entry.cache_hits,
            "query logged"
        );

        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            let overflow = self.entries.len() - self.max_entries;
            self.entries.drain(..overflow);
        }
    }

    pub fn entries(&self) -> &[QueryLogEntry] {
        &self.entries
    }

    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Latency at the given percentile (0.0-1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let idx = ((p * (latencies.len() - 1) as f64).round() as usize).min(latencies.len() - 1);
        latencies[idx]
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Queries at or beyond a slow-query threshold, most recent first.
    pub fn slow_queries(&self, threshold_ms: u64) -> Vec<&QueryLogEntry> {
        self.entries.iter().rev().filter(|e| e.latency.as_millis() as u64 >= threshold_ms).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ms: u64) -> QueryLogEntry {
        QueryLogEntry::new("q", Some("hybrid".to_string()), Duration::from_millis(ms), 5, 2000, 1500, 1)
    }

    #[test]
    fn ring_buffer_drops_oldest() {
        let mut log = QueryLog::with_capacity(2);
        log.record(entry(1));
        log.record(entry(2));
        log.record(entry(3));
        assert_eq!(log.count(), 2);
        assert_eq!(log.entries()[0].latency.as_millis(), 2);
    }

    #[test]
    fn percentile_matches_sorted_order() {
        let mut log = QueryLog::new();
        for ms in [10, 50, 100, 200, 500] {
            log.record(entry(ms));
        }
        assert_eq!(log.latency_percentile(1.0), Duration::from_millis(500));
        assert_eq!(log.latency_percentile(0.0), Duration::from_millis(10));
    }

    #[test]
    fn slow_queries_respects_threshold() {
        let mut log = QueryLog::new();
        log.record(entry(10));
        log.record(entry(300));
        assert_eq!(log.slow_queries(200).len(), 1);
    }
}
