//! Input/output types for a single assembly call.

use ircore_core::context_pack::ContextPack;

#[derive(Debug, Clone, Default)]
pub struct AssembleRequest {
    pub issue_id: String,
    pub agent_type: String,
    pub query: String,
    pub project_id: Option<String>,
    pub template_id: String,
    pub force_refresh: bool,
}

impl AssembleRequest {
    /// Content fingerprint the cache key is keyed on: a fixed set of
    /// request fields, not the full candidate set, so identical requests
    /// hit the same cache entry (§3 "Cache Entry").
    pub fn fingerprint(&self) -> String {
        let canonical = format!(
            "{}|{}|{}|{}",
            self.query,
            self.project_id.as_deref().unwrap_or(""),
            self.agent_type,
            self.template_id
        );
        blake3::hash(canonical.as_bytes()).to_hex().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct AssembleOutcome {
    pub pack: ContextPack,
    pub cache_hit: bool,
    pub warnings: Vec<String>,
}
