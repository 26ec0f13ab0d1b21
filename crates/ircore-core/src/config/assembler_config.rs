use serde::{Deserialize, Serialize};

use super::defaults;

/// Context Pack Assembler configuration (§4.11): the desired content mix,
/// the assembly time budget, and feature toggles for the optional stages
/// (provenance, dedup, adaptive optimization, ML ranking).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Soft target share of the pack reserved for each bucket; these are
    /// desired mixes, not hard partitions — budget enforcement (§4.8)
    /// still applies to the assembled whole.
    pub memory_content_percentage: f64,
    pub knowledge_content_percentage: f64,
    pub realtime_content_percentage: f64,
    pub max_generation_time_ms: u64,
    pub enable_provenance_tracking: bool,
    pub enable_content_deduplication: bool,
    pub enable_adaptive_optimization: bool,
    pub enable_ml_content_ranking: bool,
    pub content_similarity_threshold: f64,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            memory_content_percentage: defaults::DEFAULT_MEMORY_CONTENT_PCT,
            knowledge_content_percentage: defaults::DEFAULT_KNOWLEDGE_CONTENT_PCT,
            realtime_content_percentage: defaults::DEFAULT_REALTIME_CONTENT_PCT,
            max_generation_time_ms: defaults::DEFAULT_MAX_GENERATION_TIME_MS,
            enable_provenance_tracking: true,
            enable_content_deduplication: true,
            enable_adaptive_optimization: true,
            enable_ml_content_ranking: false,
            content_similarity_threshold: defaults::DEFAULT_CONTENT_SIMILARITY_THRESHOLD,
        }
    }
}

impl AssemblerConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mix = self.memory_content_percentage
            + self.knowledge_content_percentage
            + self.realtime_content_percentage;
        if (mix - 1.0).abs() > 1e-6 {
            errors.push(format!(
                "assembler content percentages must sum to 1.0, got {mix}"
            ));
        }
        if self.max_generation_time_ms == 0 {
            errors.push("assembler.max_generation_time_ms must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.content_similarity_threshold) {
            errors.push("assembler.content_similarity_threshold must be within 0..=1".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(AssemblerConfig::default().validate().is_empty());
    }

    #[test]
    fn rejects_mix_not_summing_to_one() {
        let mut config = AssemblerConfig::default();
        config.memory_content_percentage = 0.9;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("percentages")));
    }
}
