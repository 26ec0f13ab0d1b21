//! Output of the Context Pack Assembler's 8-stage pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::provenance::ProvenanceInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextPackMetadata {
    pub pack_id: String,
    pub version: u32,
    pub issue_id: String,
    pub agent_type: String,
    pub generated_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub priority: u8,
    pub tags: Vec<String>,
    pub template_id: String,
    pub optimization_level: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextPackContent {
    pub memory: String,
    pub knowledge: String,
    pub realtime: String,
    pub agent_specific: String,
    pub related_context_refs: Vec<String>,
    pub executive_summary: String,
    pub key_insights: Vec<String>,
    pub critical_actions: Vec<String>,
}

/// Which mutation the Token Budgeter applied to fit a pack under budget
/// (spec.md §4.8 steps 3-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationType {
    Compression,
    Elimination,
    Truncation,
}

/// Severity of a `TokenOptimization`, surfaced so a caller skimming
/// `token_usage.optimizations` can tell "we tidied whitespace" apart from
/// "we dropped a whole section".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

/// A single compression, elimination, or truncation action taken by the
/// Token Budgeter, kept so the assembler can report what it had to drop
/// or shrink (spec.md §4.8: `TokenOptimization{type, description,
/// tokensSaved, impactLevel, appliedAt}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenOptimization {
    pub optimization_type: OptimizationType,
    pub description: String,
    pub section_id: String,
    pub tokens_saved: usize,
    pub impact_level: ImpactLevel,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsageSummary {
    pub total_tokens: usize,
    pub budget_limit: usize,
    pub utilization_pct: f64,
    pub section_tokens: Vec<(String, usize)>,
    pub optimizations: Vec<TokenOptimization>,
    pub warnings: Vec<String>,
}

impl TokenUsageSummary {
    pub fn recompute_utilization(&mut self) {
        self.utilization_pct = if self.budget_limit == 0 {
            0.0
        } else {
            (self.total_tokens as f64 / self.budget_limit as f64) * 100.0
        };
    }
}

/// The assembled, budget-fitted bundle handed back to the calling agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextPack {
    pub metadata: ContextPackMetadata,
    pub content: ContextPackContent,
    pub provenance: ProvenanceInfo,
    pub token_usage: TokenUsageSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utilization_pct_tracks_limit() {
        let mut usage = TokenUsageSummary {
            total_tokens: 500,
            budget_limit: 1000,
            ..Default::default()
        };
        usage.recompute_utilization();
        assert_eq!(usage.utilization_pct, 50.0);
    }

    #[test]
    fn zero_budget_does_not_divide_by_zero() {
        let mut usage = TokenUsageSummary {
            total_tokens: 500,
            budget_limit: 0,
            ..Default::default()
        };
        usage.recompute_utilization();
        assert_eq!(usage.utilization_pct, 0.0);
    }
}
