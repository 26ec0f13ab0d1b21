use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid Retrieval Engine configuration: fusion weights and result
/// shape. `fts_weight` + `vector_weight` + `recency_weight` +
/// `effectiveness_weight` is expected to sum to 1.0; `validate` flags it
/// otherwise without hard-failing construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub fts_weight: f64,
    pub vector_weight: f64,
    pub recency_weight: f64,
    pub effectiveness_weight: f64,
    pub rrf_k: f64,
    pub max_results: usize,
    pub min_score_threshold: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            fts_weight: defaults::DEFAULT_FTS_WEIGHT,
            vector_weight: defaults::DEFAULT_VECTOR_WEIGHT,
            recency_weight: defaults::DEFAULT_RECENCY_WEIGHT,
            effectiveness_weight: defaults::DEFAULT_EFFECTIVENESS_WEIGHT,
            rrf_k: defaults::DEFAULT_FUSION_K,
            max_results: defaults::DEFAULT_MAX_RESULTS,
            min_score_threshold: 0.0,
        }
    }
}

impl RetrievalConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let sum = self.fts_weight + self.vector_weight + self.recency_weight + self.effectiveness_weight;
        if (sum - 1.0).abs() > 1e-6 {
            errors.push(format!("retrieval fusion weights must sum to 1.0, got {sum}"));
        }
        if self.max_results == 0 {
            errors.push("retrieval.max_results must be > 0".to_string());
        }
        if self.rrf_k <= 0.0 {
            errors.push("retrieval.rrf_k must be > 0".to_string());
        }
        errors
    }
}
