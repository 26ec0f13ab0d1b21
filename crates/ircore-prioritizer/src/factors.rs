//! Computes the seven raw, already-normalized-to-[0,1] factor values that
//! feed the composite score. Each `f_*` mirrors one arm of the teacher's
//! multi-factor scorer, adapted to the fields available on a
//! [`SearchResult`]/[`Entry`] pair instead of a memory graph.

use chrono::Utc;
use ircore_core::entry::Entry;
use ircore_core::search::SearchResult;
use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackStore;

/// Request-scoped context the factor computation needs but which isn't
/// carried on the candidate itself.
#[derive(Debug, Clone, Default)]
pub struct PrioritizationContext {
    pub agent_type: Option<String>,
    pub requested_tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorValues {
    pub recency: f64,
    pub relevance: f64,
    pub effectiveness: f64,
    pub frequency: f64,
    pub agent_preference: f64,
    pub context_similarity: f64,
    pub user_feedback: f64,
}

/// Logarithmic usage scaling, diminishing returns after ~100 uses —
/// the same shape as the teacher's `usage_factor`.
fn frequency_factor(usage_count: u64) -> f64 {
    (1.0 + usage_count as f64).ln() / (1.0 + 100.0_f64).ln()
}

fn agent_preference_factor(entry: &Entry, context: &PrioritizationContext) -> f64 {
    match &context.agent_type {
        Some(agent) if entry.metadata.agent_affinity.contains(agent) => 1.0,
        Some(_) if entry.metadata.agent_affinity.is_empty() => 0.5,
        Some(_) => 0.2,
        None => 0.5,
    }
}

/// Jaccard overlap between the entry's tags and the requested tags.
fn context_similarity_factor(entry: &Entry, context: &PrioritizationContext) -> f64 {
    if context.requested_tags.is_empty() {
        return 0.5;
    }
    let requested: std::collections::HashSet<&str> =
        context.requested_tags.iter().map(String::as_str).collect();
    let entry_tags: std::collections::HashSet<&str> =
        entry.metadata.tags.iter().map(String::as_str).collect();
    let intersection = requested.intersection(&entry_tags).count();
    let union = requested.union(&entry_tags).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

pub fn compute(
    result: &SearchResult,
    context: &PrioritizationContext,
    feedback: &FeedbackStore,
) -> FactorValues {
    let entry = &result.entry;
    let rf = &result.relevance_factors;

    let relevance = (rf.title_match * 0.4
        + rf.content_match * 0.35
        + rf.tag_match * 0.15
        + rf.category_match * 0.10)
        .clamp(0.0, 1.0);

    let recency = if rf.recency > 0.0 {
        rf.recency
    } else {
        let days_since = entry
            .metadata
            .last_used
            .map(|t| (Utc::now() - t).num_days().max(0) as f64)
            .unwrap_or_else(|| (Utc::now() - entry.last_modified).num_days().max(0) as f64);
        (-days_since / 90.0).exp()
    };

    FactorValues {
        recency,
        relevance,
        effectiveness: entry.metadata.effectiveness.value(),
        frequency: frequency_factor(entry.metadata.usage_count),
        agent_preference: agent_preference_factor(entry, context),
        context_similarity: context_similarity_factor(entry, context),
        user_feedback: feedback.satisfaction_for(&entry.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_factor_is_monotonic() {
        assert!(frequency_factor(0) < frequency_factor(10));
        assert!(frequency_factor(10) < frequency_factor(100));
    }

    #[test]
    fn context_similarity_with_no_requested_tags_is_neutral() {
        let entry = Entry::new(ircore_core::entry::EntryKind::Knowledge, "t", "b", "/a.md");
        let ctx = PrioritizationContext::default();
        assert_eq!(context_similarity_factor(&entry, &ctx), 0.5);
    }

    #[test]
    fn context_similarity_rewards_tag_overlap() {
        let mut entry = Entry::new(ircore_core::entry::EntryKind::Knowledge, "t", "b", "/a.md");
        entry.metadata.tags.insert("rust".to_string());
        entry.metadata.tags.insert("async".to_string());
        let ctx = PrioritizationContext {
            agent_type: None,
            requested_tags: vec!["rust".to_string()],
        };
        let score = context_similarity_factor(&entry, &ctx);
        assert!(score > 0.0 && score < 1.0);
    }
}
