use serde::{Deserialize, Serialize};

use super::defaults;

/// Indexing Engine configuration: watched roots, content limits, and the
/// debounce/batch/concurrency knobs that govern how the file watcher
/// drains into the FTS store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingConfig {
    pub watch_roots: Vec<String>,
    pub max_content_length: usize,
    pub debounce_leading_ms: u64,
    pub debounce_hard_cap_ms: u64,
    pub batch_size: usize,
    pub max_concurrent_ops: usize,
    pub scheduler_tick_ms: u64,
    pub queue_warning_threshold: usize,
    pub maintenance_interval_secs: u64,
    pub vacuum_size_threshold_pct: f64,
    pub slow_query_threshold_for_optimize: u64,
    pub retention_days: Option<u64>,
    pub allowed_extensions: Vec<String>,
    pub excluded_globs: Vec<String>,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            watch_roots: Vec::new(),
            max_content_length: defaults::DEFAULT_MAX_CONTENT_LENGTH,
            debounce_leading_ms: defaults::DEFAULT_DEBOUNCE_MS,
            debounce_hard_cap_ms: 2_000,
            batch_size: defaults::DEFAULT_BATCH_SIZE,
            max_concurrent_ops: 5,
            scheduler_tick_ms: 2_000,
            queue_warning_threshold: defaults::DEFAULT_QUEUE_WARNING_THRESHOLD,
            maintenance_interval_secs: defaults::DEFAULT_MAINTENANCE_INTERVAL_SECS,
            vacuum_size_threshold_pct: defaults::DEFAULT_VACUUM_THRESHOLD_FRAGMENTATION_PCT,
            slow_query_threshold_for_optimize: 10,
            retention_days: None,
            allowed_extensions: vec![
                "md".to_string(),
                "txt".to_string(),
                "rs".to_string(),
                "ts".to_string(),
                "js".to_string(),
                "py".to_string(),
                "json".to_string(),
                "toml".to_string(),
                "yaml".to_string(),
                "yml".to_string(),
            ],
            excluded_globs: vec![
                "**/.git/**".to_string(),
                "**/node_modules/**".to_string(),
                "**/target/**".to_string(),
                "**/dist/**".to_string(),
                "**/build/**".to_string(),
            ],
        }
    }
}

impl IndexingConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.max_content_length == 0 {
            errors.push("indexing.max_content_length must be > 0".to_string());
        }
        if self.batch_size == 0 {
            errors.push("indexing.batch_size must be > 0".to_string());
        }
        if self.max_concurrent_ops == 0 {
            errors.push("indexing.max_concurrent_ops must be > 0".to_string());
        }
        if self.debounce_hard_cap_ms < self.debounce_leading_ms {
            errors.push("indexing.debounce_hard_cap_ms must be >= debounce_leading_ms".to_string());
        }
        if !(0.0..=100.0).contains(&self.vacuum_size_threshold_pct) {
            errors.push("indexing.vacuum_size_threshold_pct must be within 0..=100".to_string());
        }
        errors
    }
}
