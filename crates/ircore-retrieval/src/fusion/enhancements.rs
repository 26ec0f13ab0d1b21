//! Post-fusion enhancements applied in order after a fusion algorithm
//! produces its ranking: diversity penalty, query-specific boosts, and
//! strategy-specific near-tie breaking.

use ircore_core::bandit::Strategy;
use ircore_core::search::SearchResult;

const DIVERSITY_PENALTY_CAP: f64 = 0.1;
const DIVERSITY_PENALTY_PER_REPEAT: f64 = 0.02;
const PROJECT_MATCH_BOOST: f64 = 0.05;
const AGENT_TYPE_OVERLAP_BOOST: f64 = 0.03;
const URGENCY_RECENCY_BOOST: f64 = 0.04;
const URGENCY_RECENCY_WINDOW_DAYS: i64 = 7;
const NEAR_TIE_THRESHOLD: f64 = 0.1;

const URGENCY_KEYWORDS: &[&str] = &["urgent", "critical", "blocking", "asap", "production down"];

#[derive(Debug, Clone, Default)]
pub struct BoostContext<'a> {
    pub project_id: Option<&'a str>,
    pub agent_type: Option<&'a str>,
    pub query: &'a str,
}

/// (a) Penalize repeated `(category, kind)` pairs, cumulative penalty
/// capped at `DIVERSITY_PENALTY_CAP` per result.
pub fn apply_diversity_penalty(results: &mut [SearchResult]) {
    use std::collections::HashMap;
    let mut seen: HashMap<(String, &'static str), usize> = HashMap::new();

    for result in results.iter_mut() {
        let category = result.entry.metadata.category.clone().unwrap_or_default();
        let key = (category, result.entry.kind.as_str());
        let count = seen.entry(key).or_insert(0);
        let penalty = (*count as f64 * DIVERSITY_PENALTY_PER_REPEAT).min(DIVERSITY_PENALTY_CAP);
        result.score = (result.score - penalty).max(0.0);
        *count += 1;
    }
}

/// (b) Query-specific boosts: project match, agent-type overlap, and
/// urgency keywords paired with recent modification.
pub fn apply_query_boosts(results: &mut [SearchResult], ctx: &BoostContext) {
    let query_lower = ctx.query.to_lowercase();
    let is_urgent = URGENCY_KEYWORDS.iter().any(|kw| query_lower.contains(kw));
    let now = chrono::Utc::now();

    for result in results.iter_mut() {
        if let Some(project) = ctx.project_id {
            if result.entry.metadata.project_id.as_deref() == Some(project) {
                result.score += PROJECT_MATCH_BOOST;
            }
        }
        if let Some(agent) = ctx.agent_type {
            if result.entry.metadata.agent_affinity.contains(agent) {
                result.score += AGENT_TYPE_OVERLAP_BOOST;
            }
        }
        if is_urgent {
            let days_old = (now - result.entry.last_modified).num_days();
            if days_old < URGENCY_RECENCY_WINDOW_DAYS {
                result.score += URGENCY_RECENCY_BOOST;
            }
        }
    }
}

/// (c) Strategy-specific tie-break among results whose scores are within
/// `NEAR_TIE_THRESHOLD` of each other.
pub fn apply_strategy_tie_break(results: &mut [SearchResult], strategy: Strategy) {
    results.sort_by(|a, b| {
        let score_order = b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal);
        if (a.score - b.score).abs() >= NEAR_TIE_THRESHOLD {
            return score_order;
        }
        match strategy {
            Strategy::RecencyFocused => b.entry.last_modified.cmp(&a.entry.last_modified),
            Strategy::EffectivenessFocused => b
                .entry
                .metadata
                .effectiveness
                .value()
                .partial_cmp(&a.entry.metadata.effectiveness.value())
                .unwrap_or(std::cmp::Ordering::Equal),
            Strategy::PopularityFocused => b.entry.metadata.usage_count.cmp(&a.entry.metadata.usage_count),
            _ => score_order,
        }
    });
    ircore_core::search::reassign_ranks(results);
}
