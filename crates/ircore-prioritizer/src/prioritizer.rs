//! Orders a candidate set under a chosen weighting, with a second,
//! differently-weighted ordering computed alongside it (§4.7
//! "Alternatives"). Weights adapt online via [`ContentPrioritizer::learn_from_feedback`].

use std::sync::RwLock;

use ircore_core::search::SearchResult;
use tracing::debug;

use crate::factors::{self, FactorValues, PrioritizationContext};
use crate::feedback::FeedbackStore;
use crate::weights::{PrioritizerWeights, MAX_WEIGHT, MIN_WEIGHT};

/// One candidate's place in an ordering, carrying enough detail to explain
/// the ranking (`factors`) alongside the rank itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PrioritizedItem {
    pub entry_id: String,
    pub rank: usize,
    pub composite_score: f64,
    pub factors: FactorValues,
}

/// Primary ordering plus at least one alternative under a different
/// strategy, as required by §4.7.
#[derive(Debug, Clone)]
pub struct PrioritizationOutcome {
    pub primary: Vec<PrioritizedItem>,
    pub alternative: Vec<PrioritizedItem>,
    pub alternative_strategy: &'static str,
}

pub struct ContentPrioritizer {
    weights: RwLock<PrioritizerWeights>,
    feedback: FeedbackStore,
    learning_rate: f64,
}

impl Default for ContentPrioritizer {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl ContentPrioritizer {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            weights: RwLock::new(PrioritizerWeights::default()),
            feedback: FeedbackStore::new(),
            learning_rate,
        }
    }

    pub fn weights_snapshot(&self) -> PrioritizerWeights {
        *self.weights.read().expect("prioritizer weights lock poisoned")
    }

    /// Score and rank `candidates`, returning both the primary ordering
    /// (current learned weights) and an alternative ordering (relevance-only
    /// strategy, ignoring recency/effectiveness/feedback).
    pub fn prioritize(
        &self,
        candidates: &[SearchResult],
        context: &PrioritizationContext,
    ) -> PrioritizationOutcome {
        let weights = self.weights_snapshot();
        let scored: Vec<(SearchResult, FactorValues)> = candidates
            .iter()
            .map(|c| (c.clone(), factors::compute(c, context, &self.feedback)))
            .collect();

        let primary = rank(&scored, |f| composite_score(&weights, f));
        let alternative = rank(&scored, |f| f.relevance);

        PrioritizationOutcome { primary, alternative, alternative_strategy: "relevance_only" }
    }

    /// Adjust weights by a gradient step proportional to
    /// `(satisfaction - 0.5)`, clipped to `[MIN_WEIGHT, MAX_WEIGHT]`, and
    /// record the observation for future `user_feedback` factor lookups.
    pub fn learn_from_feedback(&self, entry_id: &str, factors: &FactorValues, satisfaction: f64) {
        self.feedback.record(entry_id, satisfaction);

        let delta_sign = (satisfaction.clamp(0.0, 1.0) - 0.5) * self.learning_rate;
        let mut weights = self.weights.write().expect("prioritizer weights lock poisoned");
        weights.recency += delta_sign * factors.recency;
        weights.relevance += delta_sign * factors.relevance;
        weights.effectiveness += delta_sign * factors.effectiveness;
        weights.frequency += delta_sign * factors.frequency;
        weights.agent_preference += delta_sign * factors.agent_preference;
        weights.context_similarity += delta_sign * factors.context_similarity;
        weights.user_feedback += delta_sign * factors.user_feedback;
        weights.clamp_all();
        debug!(entry_id, satisfaction, "prioritizer weights updated from feedback");
    }
}

fn composite_score(weights: &PrioritizerWeights, f: &FactorValues) -> f64 {
    weights.recency * f.recency
        + weights.relevance * f.relevance
        + weights.effectiveness * f.effectiveness
        + weights.frequency * f.frequency
        + weights.agent_preference * f.agent_preference
        + weights.context_similarity * f.context_similarity
        + weights.user_feedback * f.user_feedback
}

/// Sort by `score_fn` descending with the spec's tie-break rule (higher
/// effectiveness, newer timestamp, higher usage), then assign dense
/// 1-based ranks.
fn rank(
    scored: &[(SearchResult, FactorValues)],
    score_fn: impl Fn(&FactorValues) -> f64,
) -> Vec<PrioritizedItem> {
    let mut items: Vec<(f64, &SearchResult, FactorValues)> =
        scored.iter().map(|(r, f)| (score_fn(f), r, *f)).collect();

    items.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.1.entry
                    .metadata
                    .effectiveness
                    .value()
                    .partial_cmp(&a.1.entry.metadata.effectiveness.value())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| b.1.entry.last_modified.cmp(&a.1.entry.last_modified))
            .then_with(|| b.1.entry.metadata.usage_count.cmp(&a.1.entry.metadata.usage_count))
    });

    items
        .into_iter()
        .enumerate()
        .map(|(i, (score, result, factors))| PrioritizedItem {
            entry_id: result.entry.id.clone(),
            rank: i + 1,
            composite_score: score,
            factors,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ircore_core::entry::{Entry, EntryKind};
    use ircore_core::search::SearchResult;

    fn candidate(id_path: &str, effectiveness: f64, usage: u64) -> SearchResult {
        let mut entry = Entry::new(EntryKind::Knowledge, "t", "body", id_path);
        entry.metadata.effectiveness = ircore_core::confidence::Confidence::new(effectiveness);
        entry.metadata.usage_count = usage;
        SearchResult::new(entry, 0.5, 0)
    }

    #[test]
    fn prioritize_produces_dense_ranks_and_an_alternative() {
        let prioritizer = ContentPrioritizer::default();
        let candidates = vec![candidate("/a.md", 0.9, 10), candidate("/b.md", 0.1, 1)];
        let outcome = prioritizer.prioritize(&candidates, &PrioritizationContext::default());
        assert_eq!(outcome.primary.len(), 2);
        assert_eq!(outcome.primary[0].rank, 1);
        assert_eq!(outcome.primary[1].rank, 2);
        assert_eq!(outcome.alternative.len(), 2);
        assert_eq!(outcome.alternative_strategy, "relevance_only");
    }

    #[test]
    fn ties_break_on_effectiveness_then_usage() {
        let prioritizer = ContentPrioritizer::default();
        let low = candidate("/low.md", 0.2, 100);
        let high = candidate("/high.md", 0.9, 1);
        let high_id = high.entry.id.clone();
        // Both candidates get identical relevance/recency from `candidate`,
        // so only the effectiveness tie-break should decide the order.
        let outcome = prioritizer.prioritize(&[low, high], &PrioritizationContext::default());
        assert_eq!(outcome.primary[0].entry_id, high_id);
    }

    #[test]
    fn learn_from_feedback_keeps_weights_bounded() {
        let prioritizer = ContentPrioritizer::new(0.5);
        let factors = FactorValues {
            recency: 1.0,
            relevance: 1.0,
            effectiveness: 1.0,
            frequency: 1.0,
            agent_preference: 1.0,
            context_similarity: 1.0,
            user_feedback: 1.0,
        };
        for _ in 0..50 {
            prioritizer.learn_from_feedback("e1", &factors, 1.0);
        }
        let w = prioritizer.weights_snapshot();
        assert!(w.relevance <= MAX_WEIGHT + f64::EPSILON);
        for _ in 0..50 {
            prioritizer.learn_from_feedback("e1", &factors, 0.0);
        }
        let w = prioritizer.weights_snapshot();
        assert!(w.relevance >= MIN_WEIGHT - f64::EPSILON);
    }
}
