//! Root configuration, one struct per subsystem, following the teacher's
//! per-component config + shared `defaults` module pattern.

pub mod analytics_config;
pub mod assembler_config;
pub mod bandit_config;
pub mod budget_config;
pub mod cache_config;
pub mod decay_config;
pub mod defaults;
pub mod indexing_config;
pub mod observability_config;
pub mod performance_config;
pub mod provenance_config;
pub mod reranking_config;
pub mod retrieval_config;
pub mod storage_config;

pub use analytics_config::AnalyticsConfig;
pub use assembler_config::AssemblerConfig;
pub use bandit_config::BanditConfig;
pub use budget_config::{BudgetConfig, TokenCountingMethod};
pub use cache_config::CacheConfig;
pub use decay_config::DecayConfig;
pub use indexing_config::IndexingConfig;
pub use observability_config::ObservabilityConfig;
pub use performance_config::PerformanceConfig;
pub use provenance_config::ProvenanceConfig;
pub use reranking_config::RerankingConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

/// Aggregates every subsystem's configuration. Constructed from defaults
/// or deserialized wholesale from a single TOML file; `validate` collects
/// every subsystem's complaints instead of bailing on the first one so a
/// misconfigured deployment sees its whole rap sheet at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelligenceCoreConfig {
    pub storage: StorageConfig,
    pub indexing: IndexingConfig,
    pub retrieval: RetrievalConfig,
    pub bandit: BanditConfig,
    pub budget: BudgetConfig,
    pub cache: CacheConfig,
    pub decay: DecayConfig,
    pub provenance: ProvenanceConfig,
    pub observability: ObservabilityConfig,
    pub reranking: RerankingConfig,
    pub performance: PerformanceConfig,
    pub analytics: AnalyticsConfig,
    pub assembler: AssemblerConfig,
}

impl IntelligenceCoreConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.storage.validate());
        errors.extend(self.indexing.validate());
        errors.extend(self.retrieval.validate());
        errors.extend(self.bandit.validate());
        errors.extend(self.budget.validate());
        errors.extend(self.cache.validate());
        errors.extend(self.decay.validate());
        errors.extend(self.provenance.validate());
        errors.extend(self.observability.validate());
        errors.extend(self.reranking.validate());
        errors.extend(self.performance.validate());
        errors.extend(self.analytics.validate());
        errors.extend(self.assembler.validate());
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = IntelligenceCoreConfig::default();
        assert!(config.validate().is_empty(), "{:?}", config.validate());
    }

    #[test]
    fn invalid_weights_are_collected() {
        let mut config = IntelligenceCoreConfig::default();
        config.retrieval.fts_weight = 0.9;
        config.bandit.epsilon_min = 2.0;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("fusion weights")));
        assert!(errors.iter().any(|e| e.contains("epsilon_min")));
    }
}
