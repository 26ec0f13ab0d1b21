//! Shared provenance types. Lives in `ircore-core` (rather than only in
//! `ircore-provenance`) so both the tracker and the assembler can reference
//! `ProvenanceInfo` without a cyclic crate dependency.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;

/// How a piece of content made it into a context pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionKind {
    DirectMatch,
    Expansion,
    Relationship,
    Fallback,
}

/// One line of a provenance chain: a single Entry's contribution to the
/// assembled pack, with enough detail to answer "why is this here".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceEntry {
    pub entry_id: String,
    pub source_path: String,
    pub contribution: ContributionKind,
    pub strategy: String,
    pub score: f64,
    pub trust: Confidence,
    pub included_at: DateTime<Utc>,
    pub compression_level: u8,
    pub reasons: Vec<String>,
}

/// A single choice made while assembling a pack, recorded so a reader can
/// later answer "why this and not that" (§4.9 `recordDecision`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub title: String,
    pub summary: String,
    pub reasoning: String,
    pub alternatives: Vec<String>,
    pub confidence: Confidence,
    pub recorded_at: DateTime<Utc>,
}

/// Full provenance attached to an assembled context pack: one entry per
/// contributing source, one record per decision made while assembling,
/// and an aggregate trust score blending both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceInfo {
    pub entries: Vec<ProvenanceEntry>,
    pub decisions: Vec<Decision>,
    pub transformations: Vec<String>,
    pub aggregate_trust: Confidence,
}

impl ProvenanceInfo {
    pub fn push(&mut self, entry: ProvenanceEntry) {
        self.entries.push(entry);
        self.recompute_aggregate();
    }

    pub fn push_decision(&mut self, decision: Decision) {
        self.decisions.push(decision);
        self.recompute_aggregate();
    }

    pub fn push_transformation(&mut self, description: impl Into<String>) {
        self.transformations.push(description.into());
    }

    fn recompute_aggregate(&mut self) {
        let weights: Vec<f64> = self
            .entries
            .iter()
            .map(|e| e.trust.value())
            .chain(self.decisions.iter().map(|d| d.confidence.value()))
            .collect();
        if weights.is_empty() {
            self.aggregate_trust = Confidence::ZERO;
            return;
        }
        let sum: f64 = weights.iter().sum();
        self.aggregate_trust = Confidence::new(sum / weights.len() as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_trust_is_mean() {
        let mut p = ProvenanceInfo::default();
        p.push(ProvenanceEntry {
            entry_id: "a".into(),
            source_path: "/a.md".into(),
            contribution: ContributionKind::DirectMatch,
            strategy: "balanced".into(),
            score: 1.0,
            trust: Confidence::new(1.0),
            included_at: Utc::now(),
            compression_level: 0,
            reasons: vec![],
        });
        p.push(ProvenanceEntry {
            entry_id: "b".into(),
            source_path: "/b.md".into(),
            contribution: ContributionKind::Expansion,
            strategy: "balanced".into(),
            score: 0.5,
            trust: Confidence::new(0.0),
            included_at: Utc::now(),
            compression_level: 1,
            reasons: vec![],
        });
        assert_eq!(p.aggregate_trust.value(), 0.5);
    }

    #[test]
    fn aggregate_trust_blends_decisions() {
        let mut p = ProvenanceInfo::default();
        p.push(ProvenanceEntry {
            entry_id: "a".into(),
            source_path: "/a.md".into(),
            contribution: ContributionKind::DirectMatch,
            strategy: "balanced".into(),
            score: 1.0,
            trust: Confidence::new(1.0),
            included_at: Utc::now(),
            compression_level: 0,
            reasons: vec![],
        });
        p.push_decision(Decision {
            title: "chose cascade mode".into(),
            summary: "fts was already confident".into(),
            reasoning: "top result exceeded threshold".into(),
            alternatives: vec!["parallel".into()],
            confidence: Confidence::new(0.0),
            recorded_at: Utc::now(),
        });
        assert_eq!(p.aggregate_trust.value(), 0.5);
        assert_eq!(p.decisions.len(), 1);
    }
}
