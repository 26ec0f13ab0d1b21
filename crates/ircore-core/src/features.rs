//! Feature vector computed per (query, entry) pair by the Feature
//! Extractor and consumed by the Rank Fusion Engine and the bandit's
//! reward model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicMatch {
    pub title: f64,
    pub content: f64,
    pub tag: f64,
    pub category: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecencyDecay {
    pub creation: f64,
    pub modification: f64,
    pub usage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    pub word_overlap: f64,
    pub cosine: f64,
    pub exact_phrase: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Affinity {
    pub agent_type: f64,
    pub project: f64,
    pub user_success_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Semantic {
    pub complexity: f64,
    pub readability: f64,
    pub code_presence: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub issue_relevance: f64,
    pub working_hours: f64,
    pub active_project: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Derived {
    pub overall_relevance: f64,
    pub uncertainty: f64,
    pub novelty: f64,
}

/// Full per-(query, entry) feature vector. Each nested group corresponds to
/// one signal family computed independently, then combined by `Derived`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub basic_match: BasicMatch,
    pub recency_decay: RecencyDecay,
    pub proximity: Proximity,
    pub affinity: Affinity,
    pub semantic: Semantic,
    pub context: Context,
    pub derived: Derived,
}

impl FeatureVector {
    /// Flatten into a fixed-order slice, used as the input to weighted
    /// fusion and to the bandit's linear reward approximation.
    pub fn as_array(&self) -> [f64; 19] {
        [
            self.basic_match.title,
            self.basic_match.content,
            self.basic_match.tag,
            self.basic_match.category,
            self.recency_decay.creation,
            self.recency_decay.modification,
            self.recency_decay.usage,
            self.proximity.word_overlap,
            self.proximity.cosine,
            self.proximity.exact_phrase,
            self.affinity.agent_type,
            self.affinity.project,
            self.affinity.user_success_rate,
            self.semantic.complexity,
            self.semantic.readability,
            self.semantic.code_presence,
            self.context.issue_relevance,
            self.context.working_hours,
            self.context.active_project,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_array_has_stable_length() {
        let fv = FeatureVector::default();
        assert_eq!(fv.as_array().len(), 19);
    }
}
