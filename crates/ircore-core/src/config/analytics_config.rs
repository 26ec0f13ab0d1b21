use serde::{Deserialize, Serialize};

use super::defaults;

/// Query-analytics retention and alerting thresholds. Analytics storage
/// and dashboards themselves are out of scope (§1 Non-goals); this
/// governs only what the retriever/assembler record and when they flag
/// a query as slow or low-relevance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub retention_days: u32,
    pub slow_query_threshold_ms: u64,
    pub low_relevance_threshold: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            retention_days: defaults::DEFAULT_ANALYTICS_RETENTION_DAYS,
            slow_query_threshold_ms: defaults::DEFAULT_SLOW_QUERY_THRESHOLD_MS,
            low_relevance_threshold: defaults::DEFAULT_LOW_RELEVANCE_THRESHOLD,
        }
    }
}

impl AnalyticsConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.retention_days == 0 {
            errors.push("analytics.retention_days must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.low_relevance_threshold) {
            errors.push("analytics.low_relevance_threshold must be within 0..=1".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(AnalyticsConfig::default().validate().is_empty());
    }
}
