//! Optional on-disk cold tier: one file per key under `CacheConfig::cold_tier_dir`,
//! consulted only when the hot tier misses. Best-effort — I/O failures are
//! logged and treated as a miss rather than propagated, matching the
//! cache's "eviction is best-effort" contract (spec.md §5).

use std::path::{Path, PathBuf};

use ircore_core::cache::CacheKey;
use ircore_core::context_pack::ContextPack;
use tracing::warn;

use crate::transform::PackCodec;

pub struct ColdTier {
    dir: PathBuf,
}

impl ColdTier {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        let raw = serde_json::to_string(key).unwrap_or_default();
        let hash = blake3::hash(raw.as_bytes()).to_hex().to_string();
        self.dir.join(format!("{hash}.pack"))
    }

    pub fn get(&self, key: &CacheKey, codec: &dyn PackCodec) -> Option<ContextPack> {
        let path = self.path_for(key);
        let encoded = std::fs::read(&path).ok()?;
        let raw = codec.decode(encoded);
        match serde_json::from_slice(&raw) {
            Ok(pack) => Some(pack),
            Err(err) => {
                warn!(?path, %err, "cold tier entry failed to deserialize, treating as miss");
                None
            }
        }
    }

    pub fn set(&self, key: &CacheKey, pack: &ContextPack, codec: &dyn PackCodec) {
        if let Err(err) = std::fs::create_dir_all(&self.dir) {
            warn!(dir = ?self.dir, %err, "could not create cold tier directory");
            return;
        }
        let raw = match serde_json::to_vec(pack) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(%err, "failed to serialize pack for cold tier");
                return;
            }
        };
        let encoded = codec.encode(raw);
        let path = self.path_for(key);
        if let Err(err) = std::fs::write(&path, encoded) {
            warn!(?path, %err, "failed to write cold tier entry");
        }
    }

    pub fn remove(&self, key: &CacheKey) {
        let _ = std::fs::remove_file(self.path_for(key));
    }

    pub fn clear(&self) {
        let Ok(entries) = std::fs::read_dir(&self.dir) else { return };
        for entry in entries.flatten() {
            let _ = std::fs::remove_file(entry.path());
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::IdentityCodec;
    use ircore_core::context_pack::{ContextPackContent, ContextPackMetadata, TokenUsageSummary};
    use ircore_core::provenance::ProvenanceInfo;

    fn sample_pack() -> ContextPack {
        ContextPack {
            metadata: ContextPackMetadata {
                pack_id: "p1".into(),
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
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let tier = ColdTier::new(dir.path());
        let key = CacheKey::new("issue-1", "backend", "fp", 1);
        let pack = sample_pack();
        tier.set(&key, &pack, &IdentityCodec);
        let loaded = tier.get(&key, &IdentityCodec).expect("cold tier hit");
        assert_eq!(loaded, pack);
    }

    #[test]
    fn missing_entry_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let tier = ColdTier::new(dir.path());
        let key = CacheKey::new("issue-x", "backend", "fp", 1);
        assert!(tier.get(&key, &IdentityCodec).is_none());
    }
}
