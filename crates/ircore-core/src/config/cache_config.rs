use serde::{Deserialize, Serialize};

use super::defaults;

/// Context Pack Cache configuration (§4.10): a hot in-memory LRU/TTL tier,
/// plus an optional on-disk cold tier for surviving process restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub max_entries: u64,
    pub enabled: bool,
    pub max_size_mb: u64,
    /// Directory for the optional on-disk cold tier; `None` disables it.
    pub cold_tier_dir: Option<String>,
    pub compression: bool,
    pub encryption: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::DEFAULT_CACHE_TTL_SECS,
            max_entries: defaults::DEFAULT_CACHE_MAX_ENTRIES,
            enabled: true,
            max_size_mb: defaults::DEFAULT_CACHE_MAX_SIZE_MB,
            cold_tier_dir: None,
            compression: false,
            encryption: false,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.max_entries == 0 && self.enabled {
            errors.push("cache.max_entries must be > 0 when cache.enabled".to_string());
        }
        if self.max_size_mb == 0 && self.enabled {
            errors.push("cache.max_size_mb must be > 0 when cache.enabled".to_string());
        }
        errors
    }
}
