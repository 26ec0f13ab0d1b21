use serde::{Deserialize, Serialize};

use super::defaults;

/// FTS Store configuration: field weights for the weighted ranking model,
/// optional recency/effectiveness boosts, the usage boost divisor, the
/// minimum-score cutoff applied before snippet generation, and the
/// snippet/highlight shape. Every weight here has a per-query override in
/// `SearchOptions`; this struct only supplies the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub title_weight: f64,
    pub tag_weight: f64,
    pub content_weight: f64,
    pub category_weight: f64,
    pub recency_boost_enabled: bool,
    pub recency_half_life_days: f64,
    pub effectiveness_boost_enabled: bool,
    pub usage_boost_k: f64,
    pub min_score: f64,
    pub max_snippet_len: usize,
    pub highlight_open: String,
    pub highlight_close: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            title_weight: defaults::DEFAULT_TITLE_WEIGHT,
            tag_weight: defaults::DEFAULT_TAG_WEIGHT,
            content_weight: defaults::DEFAULT_CONTENT_WEIGHT,
            category_weight: defaults::DEFAULT_CATEGORY_WEIGHT,
            recency_boost_enabled: true,
            recency_half_life_days: defaults::DEFAULT_DECAY_TEMPORAL_HALF_LIFE_DAYS,
            effectiveness_boost_enabled: true,
            usage_boost_k: defaults::DEFAULT_USAGE_BOOST_K,
            min_score: 0.0,
            max_snippet_len: defaults::DEFAULT_MAX_SNIPPET_LEN,
            highlight_open: defaults::DEFAULT_HIGHLIGHT_OPEN.to_string(),
            highlight_close: defaults::DEFAULT_HIGHLIGHT_CLOSE.to_string(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.title_weight < self.tag_weight
            || self.tag_weight < self.content_weight
            || self.content_weight < self.category_weight
        {
            errors.push(
                "storage field weights must satisfy title >= tag >= content >= category".to_string(),
            );
        }
        if self.title_weight < 0.0
            || self.tag_weight < 0.0
            || self.content_weight < 0.0
            || self.category_weight < 0.0
        {
            errors.push("storage field weights must be non-negative".to_string());
        }
        if self.recency_half_life_days <= 0.0 {
            errors.push("storage.recency_half_life_days must be > 0".to_string());
        }
        if self.usage_boost_k <= 0.0 {
            errors.push("storage.usage_boost_k must be > 0".to_string());
        }
        if self.max_snippet_len == 0 {
            errors.push("storage.max_snippet_len must be > 0".to_string());
        }
        if self.highlight_open.is_empty() || self.highlight_close.is_empty() {
            errors.push("storage highlight markers must not be empty".to_string());
        }
        errors
    }
}
