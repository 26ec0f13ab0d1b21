use serde::{Deserialize, Serialize};

use super::defaults;

/// Online reranking configuration: whether the prioritizer's feature
/// weights adapt from feedback (§4.7) and the gradient-step parameters
/// governing that adaptation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankingConfig {
    pub enabled: bool,
    pub learning_rate: f64,
    pub regularization: f64,
    pub batch_size: usize,
    pub online_learning: bool,
}

impl Default for RerankingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            learning_rate: defaults::DEFAULT_RERANKING_LEARNING_RATE,
            regularization: defaults::DEFAULT_RERANKING_REGULARIZATION,
            batch_size: defaults::DEFAULT_RERANKING_BATCH_SIZE,
            online_learning: true,
        }
    }
}

impl RerankingConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(0.0..1.0).contains(&self.learning_rate) || self.learning_rate <= 0.0 {
            errors.push("reranking.learning_rate must be within (0,1)".to_string());
        }
        if self.regularization < 0.0 {
            errors.push("reranking.regularization must be >= 0".to_string());
        }
        if self.batch_size == 0 {
            errors.push("reranking.batch_size must be > 0".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(RerankingConfig::default().validate().is_empty());
    }

    #[test]
    fn rejects_learning_rate_out_of_range() {
        let mut config = RerankingConfig::default();
        config.learning_rate = 1.5;
        assert!(!config.validate().is_empty());
        config.learning_rate = 0.0;
        assert!(!config.validate().is_empty());
    }
}
