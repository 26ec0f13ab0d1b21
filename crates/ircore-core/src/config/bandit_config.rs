use serde::{Deserialize, Serialize};

use super::defaults;

/// Strategy selector configuration. `epsilon` decays multiplicatively by
/// `epsilon_decay` toward `epsilon_min` as pulls accumulate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BanditConfig {
    pub epsilon: f64,
    pub epsilon_decay: f64,
    pub epsilon_min: f64,
    pub ucb1_exploration_constant: f64,
    pub reward_window_size: usize,
    pub use_ucb1: bool,
}

impl Default for BanditConfig {
    fn default() -> Self {
        Self {
            epsilon: defaults::DEFAULT_EPSILON,
            epsilon_decay: defaults::DEFAULT_EPSILON_DECAY,
            epsilon_min: defaults::DEFAULT_EPSILON_MIN,
            ucb1_exploration_constant: defaults::DEFAULT_UCB1_EXPLORATION_CONSTANT,
            reward_window_size: defaults::DEFAULT_REWARD_WINDOW_SIZE,
            use_ucb1: false,
        }
    }
}

impl BanditConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(0.0..=1.0).contains(&self.epsilon) {
            errors.push("bandit.epsilon must be within 0..=1".to_string());
        }
        if !(0.0..=1.0).contains(&self.epsilon_min) {
            errors.push("bandit.epsilon_min must be within 0..=1".to_string());
        }
        if self.epsilon_min > self.epsilon {
            errors.push("bandit.epsilon_min must be <= bandit.epsilon".to_string());
        }
        if self.reward_window_size == 0 {
            errors.push("bandit.reward_window_size must be > 0".to_string());
        }
        errors
    }
}
