//! Relationship graph backing `Entry::related_ids` / `parent_id` /
//! `child_ids` and the retrieval engine's entity-expansion gathering.

use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;

/// Relationship types between entries. A subset of the teacher's full
/// memory-relationship taxonomy, narrowed to what entity expansion and
/// relationship-based gathering over indexed documents actually need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Supersedes,
    Supports,
    Contradicts,
    Related,
    DerivedFrom,
    References,
}

impl RelationshipType {
    pub const COUNT: usize = 6;

    pub const ALL: [RelationshipType; 6] = [
        Self::Supersedes,
        Self::Supports,
        Self::Contradicts,
        Self::Related,
        Self::DerivedFrom,
        Self::References,
    ];
}

/// An edge in the relationship graph between two entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub source_id: String,
    pub target_id: String,
    pub relationship_type: RelationshipType,
    pub strength: Confidence,
    pub evidence: Vec<String>,
}

impl RelationshipEdge {
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        relationship_type: RelationshipType,
        strength: f64,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            relationship_type,
            strength: Confidence::new(strength),
            evidence: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_count() {
        assert_eq!(RelationshipType::ALL.len(), RelationshipType::COUNT);
    }
}
