//! `BanditLearner`: the shared-state orchestrator around [`crate::algorithm`].
//! Arm statistics live in a [`DashMap`] so `select_arm` (read-mostly) and
//! `update_reward` (read-modify-write on one arm) don't contend across
//! strategies, matching the "read under shared discipline, write under
//! exclusive" policy of spec.md §5 (one `DashMap` entry is its own lock).

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use ircore_core::bandit::{BanditArm, Strategy};
use ircore_core::config::BanditConfig;

use crate::algorithm;
use crate::window::RewardWindow;

struct ArmState {
    arm: BanditArm,
    window: RewardWindow,
}

impl ArmState {
    fn new(window_size: usize) -> Self {
        Self { arm: BanditArm::default(), window: RewardWindow::new(window_size) }
    }
}

/// Selects a [`Strategy`] per request and learns from reward feedback.
/// One instance is shared across concurrent retrievals behind an `Arc`.
pub struct BanditLearner {
    config: BanditConfig,
    arms: DashMap<Strategy, ArmState>,
    total_pulls: AtomicU64,
}

impl BanditLearner {
    pub fn new(config: BanditConfig) -> Self {
        let arms = DashMap::new();
        for strategy in Strategy::ALL {
            arms.insert(strategy, ArmState::new(config.reward_window_size));
        }
        Self { config, arms, total_pulls: AtomicU64::new(0) }
    }

    /// Choose an arm. `context`, when given, blends in the arm's
    /// per-context windowed mean once that context has accumulated at
    /// least [`CONTEXT_BIAS_MIN_PULLS`] observations — the spec's "context
    /// may bias the arm... but the baseline is context-free".
    pub fn select_arm(&self, context: Option<&str>) -> Strategy {
        let total_pulls = self.total_pulls.load(Ordering::SeqCst);

        if self.config.use_ucb1 {
            let scores: Vec<(Strategy, f64)> = Strategy::ALL
                .iter()
                .map(|&s| {
                    let entry = self.arms.get(&s).expect("all strategies seeded");
                    let mean = self.biased_mean(&entry, context);
                    (s, algorithm::ucb1_score(mean, entry.arm.pull_count, total_pulls, self.config.ucb1_exploration_constant))
                })
                .collect();
            return algorithm::argmax_strategy(&scores).unwrap_or(Strategy::Balanced);
        }

        let epsilon = algorithm::decayed_epsilon(
            self.config.epsilon,
            self.config.epsilon_decay,
            total_pulls,
            self.config.epsilon_min,
        );
        let draw: f64 = rand::random();
        if draw < epsilon {
            let explore_draw: f64 = rand::random();
            return algorithm::uniform_strategy(explore_draw);
        }

        let scores: Vec<(Strategy, f64)> = Strategy::ALL
            .iter()
            .map(|&s| {
                let entry = self.arms.get(&s).expect("all strategies seeded");
                (s, self.biased_mean(&entry, context))
            })
            .collect();
        algorithm::argmax_strategy(&scores).unwrap_or(Strategy::Balanced)
    }

    /// Minimum per-context pulls before a context's windowed mean is
    /// blended into arm selection; below this the estimate is too noisy
    /// to trust over the arm's global mean.
    const CONTEXT_BIAS_MIN_PULLS: u64 = 5;

    fn biased_mean(&self, entry: &ArmState, context: Option<&str>) -> f64 {
        let global = entry.window.mean();
        let Some(ctx) = context else { return global };
        match entry.arm.context_stats.get(ctx) {
            Some(stats) if stats.pull_count >= Self::CONTEXT_BIAS_MIN_PULLS => {
                0.5 * global + 0.5 * stats.mean_reward()
            }
            _ => global,
        }
    }

    /// Record feedback-derived reward (clamped to `[0,1]`) for `arm` under
    /// the given context label.
    pub fn update_reward(&self, arm: Strategy, context: Option<&str>, reward: f64) {
        let reward = reward.clamp(0.0, 1.0);
        if let Some(mut entry) = self.arms.get_mut(&arm) {
            entry.arm.record(reward, context);
            entry.window.push(reward);
        }
        self.total_pulls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(strategy = arm.as_str(), reward, "bandit reward recorded");
    }

    pub fn arm_stats(&self, strategy: Strategy) -> BanditArm {
        self.arms.get(&strategy).map(|e| e.arm.clone()).unwrap_or_default()
    }

    /// Clear every arm's statistics back to zero, keeping the same
    /// configuration.
    pub fn reset(&self) {
        for mut entry in self.arms.iter_mut() {
            *entry.value_mut() = ArmState::new(self.config.reward_window_size);
        }
        self.total_pulls.store(0, Ordering::SeqCst);
    }

    /// Serialize all-time arm statistics for cross-restart persistence.
    /// Windowed (recent) history is intentionally not carried across
    /// restarts — it rebuilds from fresh observations.
    pub fn export(&self) -> serde_json::Value {
        let arms: std::collections::HashMap<&'static str, BanditArm> = Strategy::ALL
            .iter()
            .map(|&s| (s.as_str(), self.arms.get(&s).map(|e| e.arm.clone()).unwrap_or_default()))
            .collect();
        serde_json::json!({
            "total_pulls": self.total_pulls.load(Ordering::SeqCst),
            "arms": arms,
        })
    }

    /// Restore arm statistics from a prior [`Self::export`]. Unknown
    /// strategy names are ignored rather than rejected, so a config that
    /// drops an arm doesn't fail import.
    pub fn import(&self, snapshot: &serde_json::Value) {
        if let Some(total) = snapshot.get("total_pulls").and_then(|v| v.as_u64()) {
            self.total_pulls.store(total, Ordering::SeqCst);
        }
        let Some(arms) = snapshot.get("arms").and_then(|v| v.as_object()) else { return };
        for strategy in Strategy::ALL {
            if let Some(raw) = arms.get(strategy.as_str()) {
                if let Ok(arm) = serde_json::from_value::<BanditArm>(raw.clone()) {
                    if let Some(mut entry) = self.arms.get_mut(&strategy) {
                        entry.arm = arm;
                    }
                }
            }
        }
    }
}
