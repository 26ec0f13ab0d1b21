//! # ircore-prioritizer
//!
//! Content Prioritizer (§4.7): orders a candidate set by a seven-factor
//! weighted composite score, with weights learned online from feedback,
//! alongside a second ordering under an alternative strategy.

pub mod factors;
pub mod feedback;
pub mod prioritizer;
pub mod weights;

pub use factors::{FactorValues, PrioritizationContext};
pub use prioritizer::{ContentPrioritizer, PrioritizationOutcome, PrioritizedItem};
pub use weights::PrioritizerWeights;
