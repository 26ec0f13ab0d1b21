//! Pure selection math, kept free of any shared-state type so it is
//! trivial to property-test in isolation (spec.md §4.4 algorithms).

use ircore_core::bandit::Strategy;

/// Decay `epsilon_0` toward `floor` by `decay^pulls`, per spec.md §4.4:
/// `ε_t = ε_0 · decay^t`, floored at a configurable minimum.
pub fn decayed_epsilon(epsilon_0: f64, decay: f64, pulls: u64, floor: f64) -> f64 {
    let decayed = epsilon_0 * decay.powi(pulls as i32);
    decayed.max(floor)
}

/// UCB1 score for one arm: `mean_reward + c·√(ln(T) / n_i)`. An arm with
/// zero pulls gets `f64::INFINITY` so every arm is tried at least once
/// before the bound is meaningful.
pub fn ucb1_score(mean_reward: f64, pull_count: u64, total_pulls: u64, exploration_constant: f64) -> f64 {
    if pull_count == 0 {
        return f64::INFINITY;
    }
    let exploration = exploration_constant * ((total_pulls.max(1) as f64).ln() / pull_count as f64).sqrt();
    mean_reward + exploration
}

/// Pick the arm with the highest score, breaking ties by [`Strategy::ALL`]
/// declaration order (stable, deterministic for tests).
pub fn argmax_strategy(scores: &[(Strategy, f64)]) -> Option<Strategy> {
    scores
        .iter()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(s, _)| *s)
}

/// Map a uniform draw in `[0, 1)` to one of `Strategy::ALL`, for
/// epsilon-greedy's exploration branch.
pub fn uniform_strategy(draw: f64) -> Strategy {
    let idx = ((draw.clamp(0.0, 0.999_999) * Strategy::ALL.len() as f64) as usize).min(Strategy::ALL.len() - 1);
    Strategy::ALL[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon_decays_toward_floor() {
        let e0 = decayed_epsilon(0.15, 0.995, 0, 0.01);
        let e100 = decayed_epsilon(0.15, 0.995, 100, 0.01);
        assert_eq!(e0, 0.15);
        assert!(e100 < e0);
        assert!(e100 >= 0.01);
    }

    #[test]
    fn epsilon_never_drops_below_floor() {
        let e = decayed_epsilon(0.15, 0.995, 100_000, 0.05);
        assert!(e >= 0.05);
    }

    #[test]
    fn unpulled_arm_has_infinite_ucb1_score() {
        assert_eq!(ucb1_score(0.0, 0, 10, 2.0), f64::INFINITY);
    }

    #[test]
    fn ucb1_rewards_higher_mean_when_pulls_equal() {
        let a = ucb1_score(0.8, 10, 100, 2.0);
        let b = ucb1_score(0.2, 10, 100, 2.0);
        assert!(a > b);
    }

    #[test]
    fn argmax_picks_highest_score() {
        let scores = vec![(Strategy::FtsHeavy, 0.1), (Strategy::Balanced, 0.9), (Strategy::VectorHeavy, 0.5)];
        assert_eq!(argmax_strategy(&scores), Some(Strategy::Balanced));
    }

    #[test]
    fn uniform_strategy_covers_full_range() {
        assert_eq!(uniform_strategy(0.0), Strategy::ALL[0]);
        assert_eq!(uniform_strategy(0.999), Strategy::ALL[Strategy::ALL.len() - 1]);
    }
}
