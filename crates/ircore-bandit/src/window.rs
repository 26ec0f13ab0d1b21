//! Bounded sliding window of recent rewards per arm (spec.md §4.4: "A
//! bounded sliding window of size W (default 1000) limits learning
//! history"). Kept separate from [`ircore_core::bandit::BanditArm`],
//! which remains an all-time audit counter exported verbatim by
//! [`crate::learner::BanditLearner::export`].

use std::collections::VecDeque;

/// Fixed-capacity FIFO of the most recent `capacity` rewards. Pushing past
/// capacity evicts the oldest entry first.
#[derive(Debug, Clone)]
pub struct RewardWindow {
    rewards: VecDeque<f64>,
    capacity: usize,
}

impl RewardWindow {
    pub fn new(capacity: usize) -> Self {
        Self { rewards: VecDeque::with_capacity(capacity.min(64)), capacity: capacity.max(1) }
    }

    pub fn push(&mut self, reward: f64) {
        if self.rewards.len() >= self.capacity {
            self.rewards.pop_front();
        }
        self.rewards.push_back(reward);
    }

    pub fn mean(&self) -> f64 {
        if self.rewards.is_empty() {
            0.0
        } else {
            self.rewards.iter().sum::<f64>() / self.rewards.len() as f64
        }
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut w = RewardWindow::new(3);
        w.push(1.0);
        w.push(0.0);
        w.push(1.0);
        w.push(0.0); // evicts the first 1.0
        assert_eq!(w.len(), 3);
        assert_eq!(w.mean(), 1.0 / 3.0);
    }

    #[test]
    fn empty_mean_is_zero() {
        assert_eq!(RewardWindow::new(10).mean(), 0.0);
    }
}
