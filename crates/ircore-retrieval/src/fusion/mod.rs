//! Rank Fusion Engine: combine multiple ranked lists into one, then
//! apply post-fusion enhancements.

pub mod borda;
pub mod enhancements;
pub mod ltr;
pub mod rrf;
pub mod weighted;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionAlgorithm {
    Rrf,
    Borda,
    Weighted,
    LearningToRank,
}

impl Default for FusionAlgorithm {
    fn default() -> Self {
        FusionAlgorithm::Rrf
    }
}
