use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Recency decay configuration for the feature extractor's temporal
/// signal. Grounded on the teacher's standalone decay subsystem, folded
/// in here as one of the retrieval engine's feature extractors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Per-entry-kind half-life overrides, in days.
    pub half_life_overrides: HashMap<String, f64>,
    pub default_half_life_days: f64,
    pub archival_threshold: f64,
    pub processing_interval_secs: u64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            half_life_overrides: HashMap::new(),
            default_half_life_days: defaults::DEFAULT_DECAY_TEMPORAL_HALF_LIFE_DAYS,
            archival_threshold: defaults::DEFAULT_ARCHIVAL_THRESHOLD,
            processing_interval_secs: defaults::DEFAULT_DECAY_PROCESSING_INTERVAL_SECS,
        }
    }
}

impl DecayConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.default_half_life_days <= 0.0 {
            errors.push("decay.default_half_life_days must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.archival_threshold) {
            errors.push("decay.archival_threshold must be within 0..=1".to_string());
        }
        errors
    }
}
