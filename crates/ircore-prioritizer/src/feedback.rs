//! Per-entry observed satisfaction, used both as the `user_feedback`
//! factor input and as the signal `learn_from_feedback` trains weights
//! against.

use dashmap::DashMap;

const NEUTRAL_SATISFACTION: f64 = 0.5;
/// Exponential moving average smoothing: newer feedback dominates but a
/// single rating doesn't swing the factor to an extreme.
const EMA_ALPHA: f64 = 0.3;

#[derive(Debug, Clone, Copy)]
struct Stat {
    mean: f64,
    count: u64,
}

/// Observed per-entry satisfaction history. Read from many threads while
/// a request prioritizes candidates; written once per feedback event.
#[derive(Default)]
pub struct FeedbackStore {
    stats: DashMap<String, Stat>,
}

impl FeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Neutral (0.5) for entries with no recorded feedback yet.
    pub fn satisfaction_for(&self, entry_id: &str) -> f64 {
        self.stats.get(entry_id).map(|s| s.mean).unwrap_or(NEUTRAL_SATISFACTION)
    }

    pub fn record(&self, entry_id: &str, satisfaction: f64) {
        let satisfaction = satisfaction.clamp(0.0, 1.0);
        self.stats
            .entry(entry_id.to_string())
            .and_modify(|s| {
                s.mean = s.mean * (1.0 - EMA_ALPHA) + satisfaction * EMA_ALPHA;
                s.count += 1;
            })
            .or_insert(Stat { mean: satisfaction, count: 1 });
    }

    pub fn observation_count(&self, entry_id: &str) -> u64 {
        self.stats.get(entry_id).map(|s| s.count).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrated_entry_is_neutral() {
        let store = FeedbackStore::new();
        assert_eq!(store.satisfaction_for("unknown"), NEUTRAL_SATISFACTION);
    }

    #[test]
    fn record_moves_mean_toward_new_rating() {
        let store = FeedbackStore::new();
        store.record("e1", 1.0);
        let after_one = store.satisfaction_for("e1");
        assert!(after_one > NEUTRAL_SATISFACTION);
        store.record("e1", 1.0);
        let after_two = store.satisfaction_for("e1");
        assert!(after_two > after_one);
        assert_eq!(store.observation_count("e1"), 2);
    }
}
