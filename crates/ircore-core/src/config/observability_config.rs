use serde::{Deserialize, Serialize};

use super::defaults;

/// Logging / health / metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub health_check_interval_secs: u64,
    pub queue_warning_threshold: usize,
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            health_check_interval_secs: defaults::DEFAULT_HEALTH_CHECK_INTERVAL_SECS,
            queue_warning_threshold: defaults::DEFAULT_QUEUE_WARNING_THRESHOLD,
            log_filter: "info".to_string(),
        }
    }
}

impl ObservabilityConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.queue_warning_threshold == 0 {
            errors.push("observability.queue_warning_threshold must be > 0".to_string());
        }
        errors
    }
}
