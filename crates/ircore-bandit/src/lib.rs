//! # ircore-bandit
//!
//! Multi-armed bandit strategy selector (spec.md §4.4). Picks one of the
//! seven [`ircore_core::bandit::Strategy`] arms per retrieval and updates
//! arm statistics from feedback, using either epsilon-greedy (decayed
//! epsilon) or UCB1.

pub mod algorithm;
pub mod learner;
pub mod window;

pub use learner::BanditLearner;
