use serde::{Deserialize, Serialize};

use super::defaults;

/// Provenance Tracker configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvenanceConfig {
    pub min_trust_threshold: f64,
    pub record_reasons: bool,
}

impl Default for ProvenanceConfig {
    fn default() -> Self {
        Self {
            min_trust_threshold: defaults::DEFAULT_PROVENANCE_MIN_TRUST,
            record_reasons: true,
        }
    }
}

impl ProvenanceConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(0.0..=1.0).contains(&self.min_trust_threshold) {
            errors.push("provenance.min_trust_threshold must be within 0..=1".to_string());
        }
        errors
    }
}
