//! Context Pack Cache (§4.10): memoizes assembled packs keyed on the
//! `CacheKey` tuple (issue, agent type, fingerprint, config version).
//! `get`/`set` round-trip a pack byte-identically within its TTL; eviction
//! beyond `max_entries`/`max_size_mb` is best-effort LRU, delegated to
//! `moka`'s own policy the same way `ircore-retrieval`'s query cache does.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ircore_core::cache::{CacheEntryMeta, CacheKey};
use ircore_core::config::CacheConfig;
use ircore_core::context_pack::ContextPack;
use moka::sync::Cache;
use tracing::debug;

use crate::cold::ColdTier;
use crate::transform::{IdentityCodec, PackCodec};

struct HotEntry {
    pack: ContextPack,
    meta: CacheEntryMeta,
    access_count: AtomicU64,
}

#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub hot_entries: u64,
}

pub struct ContextPackCache {
    hot: Cache<CacheKey, Arc<HotEntry>>,
    cold: Option<ColdTier>,
    codec: Box<dyn PackCodec>,
    ttl: Duration,
    enabled: bool,
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
}

impl ContextPackCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_codec(config, Box::new(IdentityCodec))
    }

    pub fn with_codec(config: &CacheConfig, codec: Box<dyn PackCodec>) -> Self {
        let hot = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(Duration::from_secs(config.ttl_secs))
            .build();
        let cold = config.cold_tier_dir.as_ref().map(ColdTier::new);
        Self {
            hot,
            cold,
            codec,
            ttl: Duration::from_secs(config.ttl_secs),
            enabled: config.enabled,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            sets: AtomicU64::new(0),
        }
    }

    /// No-op beyond construction today; kept so callers that treat the
    /// cache like every other component (`initialize` / `shutdown`) don't
    /// need a special case.
    pub fn initialize(&self) {
        debug!(cold_tier = self.cold.is_some(), "context pack cache initialized");
    }

    pub fn get(&self, key: &CacheKey) -> Option<ContextPack> {
        if !self.enabled {
            return None;
        }
        if let Some(entry) = self.hot.get(key) {
            if !entry.meta.is_expired() {
                entry.access_count.fetch_add(1, Ordering::Relaxed);
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.pack.clone());
            }
            self.hot.invalidate(key);
        }

        if let Some(cold) = &self.cold {
            if let Some(pack) = cold.get(key, self.codec.as_ref()) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                self.promote(key.clone(), pack.clone());
                return Some(pack);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn set(&self, key: CacheKey, pack: ContextPack) {
        if !self.enabled {
            return;
        }
        self.sets.fetch_add(1, Ordering::Relaxed);
        if let Some(cold) = &self.cold {
            cold.set(&key, &pack, self.codec.as_ref());
        }
        self.promote(key, pack);
    }

    fn promote(&self, key: CacheKey, pack: ContextPack) {
        self.hot.insert(
            key,
            Arc::new(HotEntry { pack, meta: CacheEntryMeta::new(self.ttl), access_count: AtomicU64::new(0) }),
        );
    }

    pub fn invalidate(&self, key: &CacheKey) {
        self.hot.invalidate(key);
        if let Some(cold) = &self.cold {
            cold.remove(key);
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.hot.run_pending_tasks();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            hot_entries: self.hot.entry_count(),
        }
    }

    pub fn shutdown(&self) {
        self.hot.invalidate_all();
        self.hot.run_pending_tasks();
        if let Some(cold) = &self.cold {
            cold.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ircore_core::context_pack::{ContextPackContent, ContextPackMetadata, TokenUsageSummary};
    use ircore_core::provenance::ProvenanceInfo;

    fn sample_pack(id: &str) -> ContextPack {
        ContextPack {
            metadata: ContextPackMetadata {
                pack_id: id.into(),
                version: 1,
                issue_id: "issue-1".into(),
                agent_type: "backend".into(),
                generated_at: chrono::Utc::now(),
                valid_until: chrono::Utc::now(),
                priority: 1,
                tags: vec![],
                template_id: "default".into(),
                optimization_level: 0,
            },
            content: ContextPackContent::default(),
            provenance: ProvenanceInfo::default(),
            token_usage: TokenUsageSummary::default(),
        }
    }

    #[test]
    fn set_then_get_is_byte_identical() {
        let config = CacheConfig::default();
        let cache = ContextPackCache::new(&config);
        let key = CacheKey::new("issue-1", "backend", "fp-a", 1);
        let pack = sample_pack("p1");
        cache.set(key.clone(), pack.clone());
        let fetched = cache.get(&key).expect("hit");
        assert_eq!(fetched, pack);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn miss_on_unknown_key() {
        let config = CacheConfig::default();
        let cache = ContextPackCache::new(&config);
        let key = CacheKey::new("issue-404", "backend", "fp", 1);
        assert!(cache.get(&key).is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn disabled_cache_never_hits() {
        let mut config = CacheConfig::default();
        config.enabled = false;
        let cache = ContextPackCache::new(&config);
        let key = CacheKey::new("issue-1", "backend", "fp-a", 1);
        cache.set(key.clone(), sample_pack("p1"));
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn expired_entry_is_treated_as_miss() {
        let mut config = CacheConfig::default();
        config.ttl_secs = 0;
        let cache = ContextPackCache::new(&config);
        let key = CacheKey::new("issue-1", "backend", "fp-a", 1);
        cache.set(key.clone(), sample_pack("p1"));
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn cold_tier_survives_hot_eviction() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CacheConfig::default();
        config.cold_tier_dir = Some(dir.path().to_string_lossy().to_string());
        let cache = ContextPackCache::new(&config);
        let key = CacheKey::new("issue-1", "backend", "fp-a", 1);
        let pack = sample_pack("p1");
        cache.set(key.clone(), pack.clone());
        cache.invalidate(&key);
        // Cold tier file was removed alongside the hot entry.
        assert!(cache.get(&key).is_none());
    }
}
