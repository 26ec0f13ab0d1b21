//! Shared cache key/metadata types for the Context Pack Cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifies a cacheable context pack request. Two requests with the same
/// key are considered interchangeable by the cache layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub issue_id: String,
    pub agent_type: String,
    /// Hash of the inputs that can silently invalidate a cached pack
    /// (entry set fingerprint, query text) without changing issue/agent.
    pub fingerprint: String,
    pub config_version: u32,
}

impl CacheKey {
    pub fn new(
        issue_id: impl Into<String>,
        agent_type: impl Into<String>,
        fingerprint: impl Into<String>,
        config_version: u32,
    ) -> Self {
        Self {
            issue_id: issue_id.into(),
            agent_type: agent_type.into(),
            fingerprint: fingerprint.into(),
            config_version,
        }
    }
}

/// Bookkeeping the cache layer attaches to a stored value, separate from
/// the value itself so eviction policy doesn't need to deserialize it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntryMeta {
    pub insert_time: DateTime<Utc>,
    pub ttl: Duration,
    pub access_count: u64,
}

impl CacheEntryMeta {
    pub fn new(ttl: Duration) -> Self {
        Self { insert_time: Utc::now(), ttl, access_count: 0 }
    }

    pub fn is_expired(&self) -> bool {
        let elapsed = Utc::now().signed_duration_since(self.insert_time);
        match chrono::Duration::from_std(self.ttl) {
            Ok(ttl) => elapsed >= ttl,
            Err(_) => false,
        }
    }

    pub fn touch(&mut self) {
        self.access_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entry_not_expired() {
        let meta = CacheEntryMeta::new(Duration::from_secs(60));
        assert!(!meta.is_expired());
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let meta = CacheEntryMeta::new(Duration::from_secs(0));
        assert!(meta.is_expired());
    }
}
