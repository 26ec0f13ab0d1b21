use chrono::{DateTime, Utc};
use ircore_core::confidence::Confidence;
use ircore_core::provenance::ContributionKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A collaborator registered against a session: a gatherer, the retriever,
/// or a fallback path, along with whatever parameters it ran with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRegistration {
    pub kind: String,
    pub label: String,
    pub description: String,
    pub params: Value,
    pub trust: Confidence,
    pub registered_at: DateTime<Utc>,
}

/// Maps a source `kind` string to the [`ContributionKind`] used when the
/// registration is later folded into a [`ircore_core::provenance::ProvenanceEntry`].
/// Unrecognized kinds fall back to `Fallback` rather than erroring, since
/// gatherers are free to register ad-hoc kinds.
pub fn kind_to_contribution(kind: &str) -> ContributionKind {
    match kind {
        "retriever" | "fts" | "vector" | "hybrid" => ContributionKind::DirectMatch,
        "memory" | "knowledge" | "index" => ContributionKind::DirectMatch,
        "relationship" | "related" => ContributionKind::Relationship,
        "expansion" => ContributionKind::Expansion,
        _ => ContributionKind::Fallback,
    }
}

/// Default trust weight for a source kind absent an explicit override in
/// `params["trust"]`. Mirrors the teacher's category-to-tag lookup style:
/// a flat match with a sane default for anything unlisted.
pub fn default_trust_for_kind(kind: &str) -> Confidence {
    let value = match kind {
        "retriever" | "fts" | "hybrid" => 0.9,
        "vector" => 0.8,
        "memory" | "knowledge" | "index" => 0.8,
        "relationship" | "related" => 0.6,
        "expansion" => 0.55,
        "fallback" => 0.3,
        _ => 0.6,
    };
    Confidence::new(value)
}

/// Resolve the trust weight for a registration: an explicit `params.trust`
/// number wins, otherwise fall back to the kind's default.
pub fn resolve_trust(kind: &str, params: &Value) -> Confidence {
    params
        .get("trust")
        .and_then(Value::as_f64)
        .map(Confidence::new)
        .unwrap_or_else(|| default_trust_for_kind(kind))
}
