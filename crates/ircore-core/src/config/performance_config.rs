use serde::{Deserialize, Serialize};

use super::defaults;

/// Resource ceilings enforced across the retrieval and assembly path.
/// These are soft limits the engines consult (e.g. to cap a reranking
/// candidate set) rather than hard kernel-level quotas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub max_feature_extraction_time_ms: u64,
    pub max_reranking_candidates: usize,
    pub max_concurrent_queries: usize,
    pub max_memory_usage_mb: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_feature_extraction_time_ms: defaults::DEFAULT_MAX_FEATURE_EXTRACTION_TIME_MS,
            max_reranking_candidates: defaults::DEFAULT_MAX_RERANKING_CANDIDATES,
            max_concurrent_queries: defaults::DEFAULT_MAX_CONCURRENT_QUERIES,
            max_memory_usage_mb: defaults::DEFAULT_MAX_MEMORY_USAGE_MB,
        }
    }
}

impl PerformanceConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.max_feature_extraction_time_ms == 0 {
            errors.push("performance.max_feature_extraction_time_ms must be > 0".to_string());
        }
        if self.max_reranking_candidates == 0 {
            errors.push("performance.max_reranking_candidates must be > 0".to_string());
        }
        if self.max_concurrent_queries == 0 {
            errors.push("performance.max_concurrent_queries must be > 0".to_string());
        }
        errors
    }
}
