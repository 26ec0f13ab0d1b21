//! Shared arm/strategy types for the multi-armed bandit strategy selector.
//! The learner itself (epsilon-greedy / UCB1 update rules) lives in
//! `ircore-bandit`; the data model lives here so the retrieval engine can
//! reference `Strategy` without depending on the learner crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The fixed set of retrieval strategies the bandit chooses between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    FtsHeavy,
    VectorHeavy,
    Balanced,
    RecencyFocused,
    EffectivenessFocused,
    PopularityFocused,
    SemanticFocused,
}

impl Strategy {
    pub const ALL: [Strategy; 7] = [
        Strategy::FtsHeavy,
        Strategy::VectorHeavy,
        Strategy::Balanced,
        Strategy::RecencyFocused,
        Strategy::EffectivenessFocused,
        Strategy::PopularityFocused,
        Strategy::SemanticFocused,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::FtsHeavy => "fts_heavy",
            Strategy::VectorHeavy => "vector_heavy",
            Strategy::Balanced => "balanced",
            Strategy::RecencyFocused => "recency_focused",
            Strategy::EffectivenessFocused => "effectiveness_focused",
            Strategy::PopularityFocused => "popularity_focused",
            Strategy::SemanticFocused => "semantic_focused",
        }
    }
}

/// Per-context reward accumulator, keyed by a caller-chosen context label
/// (e.g. agent type) so the bandit can specialize beyond a single global
/// arm average.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmContextStats {
    pub pull_count: u64,
    pub cumulative_reward: f64,
}

impl ArmContextStats {
    pub fn mean_reward(&self) -> f64 {
        if self.pull_count == 0 {
            0.0
        } else {
            self.cumulative_reward / self.pull_count as f64
        }
    }

    pub fn record(&mut self, reward: f64) {
        self.pull_count += 1;
        self.cumulative_reward += reward;
    }
}

/// One arm of the bandit: a strategy's global statistics plus an optional
/// breakdown by context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BanditArm {
    pub pull_count: u64,
    pub cumulative_reward: f64,
    pub last_used: Option<DateTime<Utc>>,
    pub context_stats: HashMap<String, ArmContextStats>,
}

impl BanditArm {
    pub fn mean_reward(&self) -> f64 {
        if self.pull_count == 0 {
            0.0
        } else {
            self.cumulative_reward / self.pull_count as f64
        }
    }

    pub fn record(&mut self, reward: f64, context: Option<&str>) {
        self.pull_count += 1;
        self.cumulative_reward += reward;
        self.last_used = Some(Utc::now());
        if let Some(ctx) = context {
            self.context_stats.entry(ctx.to_string()).or_default().record(reward);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_reward_zero_pulls_is_zero() {
        assert_eq!(BanditArm::default().mean_reward(), 0.0);
    }

    #[test]
    fn record_updates_global_and_context() {
        let mut arm = BanditArm::default();
        arm.record(1.0, Some("debugging"));
        arm.record(0.0, Some("debugging"));
        assert_eq!(arm.pull_count, 2);
        assert_eq!(arm.mean_reward(), 0.5);
        assert_eq!(arm.context_stats["debugging"].mean_reward(), 0.5);
    }
}
