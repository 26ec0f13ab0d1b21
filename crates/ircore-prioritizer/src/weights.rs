use serde::{Deserialize, Serialize};

/// Lower/upper bound every learned weight is clamped to (§4.7).
pub const MIN_WEIGHT: f64 = 0.01;
pub const MAX_WEIGHT: f64 = 1.0;

/// Weights for the seven prioritization factors. Learned online by
/// [`crate::prioritizer::ContentPrioritizer::learn_from_feedback`]; the
/// defaults mirror the teacher's multi-factor scorer split, rebalanced
/// from eight factors down to seven.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrioritizerWeights {
    pub recency: f64,
    pub relevance: f64,
    pub effectiveness: f64,
    pub frequency: f64,
    pub agent_preference: f64,
    pub context_similarity: f64,
    pub user_feedback: f64,
}

impl Default for PrioritizerWeights {
    fn default() -> Self {
        Self {
            recency: 0.15,
            relevance: 0.30,
            effectiveness: 0.15,
            frequency: 0.10,
            agent_preference: 0.10,
            context_similarity: 0.10,
            user_feedback: 0.10,
        }
    }
}

impl PrioritizerWeights {
    pub fn clamp_all(&mut self) {
        self.recency = self.recency.clamp(MIN_WEIGHT, MAX_WEIGHT);
        self.relevance = self.relevance.clamp(MIN_WEIGHT, MAX_WEIGHT);
        self.effectiveness = self.effectiveness.clamp(MIN_WEIGHT, MAX_WEIGHT);
        self.frequency = self.frequency.clamp(MIN_WEIGHT, MAX_WEIGHT);
        self.agent_preference = self.agent_preference.clamp(MIN_WEIGHT, MAX_WEIGHT);
        self.context_similarity = self.context_similarity.clamp(MIN_WEIGHT, MAX_WEIGHT);
        self.user_feedback = self.user_feedback.clamp(MIN_WEIGHT, MAX_WEIGHT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_are_within_bounds() {
        let w = PrioritizerWeights::default();
        for v in [w.recency, w.relevance, w.effectiveness, w.frequency, w.agent_preference, w.context_similarity, w.user_feedback] {
            assert!((MIN_WEIGHT..=MAX_WEIGHT).contains(&v));
        }
    }

    #[test]
    fn clamp_all_bounds_out_of_range_values() {
        let mut w = PrioritizerWeights { recency: 5.0, user_feedback: -1.0, ..PrioritizerWeights::default() };
        w.clamp_all();
        assert_eq!(w.recency, MAX_WEIGHT);
        assert_eq!(w.user_feedback, MIN_WEIGHT);
    }
}
