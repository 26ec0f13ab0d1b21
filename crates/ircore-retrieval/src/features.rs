//! Feature Extractor: a pure function of `(query, entry)` pairs, batched
//! by design, grouped into the six feature categories the data model
//! carries (`ircore_core::features::FeatureVector`).

use std::collections::HashSet;

use chrono::Utc;
use ircore_core::entry::Entry;
use ircore_core::features::{Affinity, BasicMatch, Context, Derived, FeatureVector, Proximity, RecencyDecay, Semantic};

/// Which feature categories to compute. Disabling a category zeroes its
/// group in the resulting `FeatureVector` instead of skipping the field,
/// so downstream consumers never have to special-case an absent group.
#[derive(Debug, Clone, Copy)]
pub struct FeatureCategories {
    pub recency: bool,
    pub proximity: bool,
    pub affinity: bool,
    pub semantic: bool,
    pub context: bool,
    pub derived: bool,
}

impl Default for FeatureCategories {
    fn default() -> Self {
        Self { recency: true, proximity: true, affinity: true, semantic: true, context: true, derived: true }
    }
}

/// How to scale raw per-batch feature values before fusion/scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    MinMax,
    ZScore,
    None,
}

/// Caller-supplied context the extractor needs beyond the query string
/// itself: active files (proximity), the requesting agent type
/// (affinity), and the issue/project focus (context relevance).
#[derive(Debug, Clone, Default)]
pub struct ExtractionContext {
    pub active_files: Vec<String>,
    pub agent_type: Option<String>,
    pub project_id: Option<String>,
    pub issue_keywords: HashSet<String>,
}

pub struct FeatureExtractor {
    categories: FeatureCategories,
    normalization: Normalization,
}

impl FeatureExtractor {
    pub fn new(categories: FeatureCategories, normalization: Normalization) -> Self {
        Self { categories, normalization }
    }

    /// Extract one `FeatureVector` per entry, in order.
    pub fn extract_batch(&self, query: &str, entries: &[Entry], ctx: &ExtractionContext) -> Vec<FeatureVector> {
        let query_terms: HashSet<String> = tokenize(query);
        let mut vectors: Vec<FeatureVector> = entries.iter().map(|e| self.extract_one(&query_terms, e, ctx)).collect();
        self.normalize(&mut vectors);
        vectors
    }

    fn extract_one(&self, query_terms: &HashSet<String>, entry: &Entry, ctx: &ExtractionContext) -> FeatureVector {
        let basic_match = basic_match_scores(query_terms, entry);

        let recency_decay = if self.categories.recency { recency_scores(entry) } else { RecencyDecay::default() };

        let proximity = if self.categories.proximity { proximity_scores(query_terms, entry, ctx) } else { Proximity::default() };

        let affinity = if self.categories.affinity { affinity_scores(entry, ctx) } else { Affinity::default() };

        let semantic = if self.categories.semantic { semantic_scores(entry) } else { Semantic::default() };

        let context = if self.categories.context { context_scores(entry, ctx) } else { Context::default() };

        let mut vector = FeatureVector { basic_match, recency_decay, proximity, affinity, semantic, context, derived: Derived::default() };

        if self.categories.derived {
            vector.derived = derive(&vector);
        }
        vector
    }

    fn normalize(&self, vectors: &mut [FeatureVector]) {
        if self.normalization == Normalization::None || vectors.len() < 2 {
            return;
        }
        let mut columns: Vec<Vec<f64>> = (0..19).map(|_| Vec::with_capacity(vectors.len())).collect();
        for v in vectors.iter() {
            for (i, val) in v.as_array().into_iter().enumerate() {
                columns[i].push(val);
            }
        }
        let scales: Vec<(f64, f64)> = columns
            .iter()
            .map(|col| match self.normalization {
                Normalization::MinMax => {
                    let min = col.iter().copied().fold(f64::INFINITY, f64::min);
                    let max = col.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    (min, (max - min).max(f64::EPSILON))
                }
                Normalization::ZScore => {
                    let mean = col.iter().sum::<f64>() / col.len() as f64;
                    let variance = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / col.len() as f64;
                    (mean, variance.sqrt().max(f64::EPSILON))
                }
                Normalization::None => (0.0, 1.0),
            })
            .collect();

        for v in vectors.iter_mut() {
            apply_normalization(v, &scales);
        }
    }
}

fn apply_normalization(v: &mut FeatureVector, scales: &[(f64, f64)]) {
    let raw = v.as_array();
    let mut scaled = [0.0; 19];
    for (i, val) in raw.into_iter().enumerate() {
        let (shift, scale) = scales[i];
        scaled[i] = ((val - shift) / scale).clamp(-3.0, 3.0);
    }
    v.basic_match = BasicMatch { title: scaled[0], content: scaled[1], tag: scaled[2], category: scaled[3] };
    v.recency_decay = RecencyDecay { creation: scaled[4], modification: scaled[5], usage: scaled[6] };
    v.proximity = Proximity { word_overlap: scaled[7], cosine: scaled[8], exact_phrase: scaled[9] };
    v.affinity = Affinity { agent_type: scaled[10], project: scaled[11], user_success_rate: scaled[12] };
    v.semantic = Semantic { complexity: scaled[13], readability: scaled[14], code_presence: scaled[15] };
    v.context = Context { issue_relevance: scaled[16], working_hours: scaled[17], active_project: scaled[18] };
}

fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()).filter(|t| !t.is_empty()).collect()
}

fn overlap_ratio(query_terms: &HashSet<String>, haystack: &str) -> f64 {
    if query_terms.is_empty() {
        return 0.0;
    }
    let haystack_terms = tokenize(haystack);
    let hits = query_terms.intersection(&haystack_terms).count();
    hits as f64 / query_terms.len() as f64
}

fn basic_match_scores(query_terms: &HashSet<String>, entry: &Entry) -> BasicMatch {
    BasicMatch {
        title: overlap_ratio(query_terms, &entry.title),
        content: overlap_ratio(query_terms, &entry.body),
        tag: {
            let joined = entry.metadata.tags.iter().cloned().collect::<Vec<_>>().join(" ");
            overlap_ratio(query_terms, &joined)
        },
        category: entry.metadata.category.as_deref().map(|c| overlap_ratio(query_terms, c)).unwrap_or(0.0),
    }
}

/// Exponential decay with a 30-day half-life, applied to both creation
/// and modification timestamps.
fn recency_scores(entry: &Entry) -> RecencyDecay {
    let now = Utc::now();
    let days_since_modified = (now - entry.last_modified).num_days().max(0) as f64;
    let modification = (-days_since_modified / 30.0).exp();

    let usage = entry
        .metadata
        .last_used
        .map(|t| {
            let days = (now - t).num_days().max(0) as f64;
            (-days / 30.0).exp()
        })
        .unwrap_or(0.0);

    RecencyDecay { creation: modification, modification, usage }
}

fn proximity_scores(query_terms: &HashSet<String>, entry: &Entry, ctx: &ExtractionContext) -> Proximity {
    let word_overlap = overlap_ratio(query_terms, &entry.body);
    let exact_phrase = if !query_terms.is_empty() && entry.body.to_lowercase().contains(&query_terms.iter().cloned().collect::<Vec<_>>().join(" ")) {
        1.0
    } else {
        0.0
    };
    let cosine = if ctx.active_files.iter().any(|f| f == &entry.path) { 1.0 } else { word_overlap };
    Proximity { word_overlap, cosine, exact_phrase }
}

fn affinity_scores(entry: &Entry, ctx: &ExtractionContext) -> Affinity {
    let agent_type = ctx
        .agent_type
        .as_deref()
        .map(|a| if entry.metadata.agent_affinity.contains(a) { 1.0 } else { 0.0 })
        .unwrap_or(0.0);
    let project = ctx
        .project_id
        .as_deref()
        .map(|p| if entry.metadata.project_id.as_deref() == Some(p) { 1.0 } else { 0.0 })
        .unwrap_or(0.0);
    Affinity { agent_type, project, user_success_rate: entry.metadata.success_rate.value() }
}

fn semantic_scores(entry: &Entry) -> Semantic {
    let words = entry.body.split_whitespace().count().max(1);
    let avg_word_len = entry.body.chars().filter(|c| !c.is_whitespace()).count() as f64 / words as f64;
    let complexity = (avg_word_len / 10.0).clamp(0.0, 1.0);
    let readability = 1.0 - complexity;
    let code_markers = entry.body.matches("```").count() + entry.body.matches("fn ").count() + entry.body.matches('{').count();
    let code_presence = if matches!(entry.kind, ircore_core::entry::EntryKind::Code) {
        1.0
    } else {
        ((code_markers as f64) / 10.0).clamp(0.0, 1.0)
    };
    Semantic { complexity, readability, code_presence }
}

fn context_scores(entry: &Entry, ctx: &ExtractionContext) -> Context {
    let issue_relevance = if ctx.issue_keywords.is_empty() {
        0.0
    } else {
        overlap_ratio(&ctx.issue_keywords, &entry.body) * 0.5 + overlap_ratio(&ctx.issue_keywords, &entry.title) * 0.5
    };
    let hour = Utc::now().format("%H").to_string().parse::<u32>().unwrap_or(12);
    let working_hours = if (9..18).contains(&hour) { 1.0 } else { 0.3 };
    let active_project = ctx
        .project_id
        .as_deref()
        .map(|p| if entry.metadata.project_id.as_deref() == Some(p) { 1.0 } else { 0.0 })
        .unwrap_or(0.5);
    Context { issue_relevance, working_hours, active_project }
}

/// Roll the per-category factors into the three derived signals. These
/// are what the Rank Fusion Engine's Learning-to-Rank model and the
/// Content Prioritizer's "relevance" factor consume directly.
fn derive(v: &FeatureVector) -> Derived {
    let overall_relevance = 0.3 * v.basic_match.content
        + 0.2 * v.basic_match.title
        + 0.2 * v.proximity.word_overlap
        + 0.15 * v.recency_decay.modification
        + 0.15 * v.affinity.user_success_rate;

    let signals = [v.basic_match.content, v.proximity.word_overlap, v.recency_decay.modification, v.affinity.user_success_rate];
    let mean = signals.iter().sum::<f64>() / signals.len() as f64;
    let variance = signals.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / signals.len() as f64;
    let uncertainty = variance.sqrt();

    let novelty = 1.0 - v.recency_decay.usage;

    Derived { overall_relevance: overall_relevance.clamp(0.0, 1.0), uncertainty: uncertainty.clamp(0.0, 1.0), novelty: novelty.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ircore_core::entry::EntryKind;

    fn entry(title: &str, body: &str) -> Entry {
        Entry::new(EntryKind::Knowledge, title, body, "/docs/x.md")
    }

    #[test]
    fn basic_match_rewards_term_overlap() {
        let e = entry("rate limiting", "implements a token bucket rate limiter");
        let extractor = FeatureExtractor::new(FeatureCategories::default(), Normalization::None);
        let vectors = extractor.extract_batch("rate limiter", &[e], &ExtractionContext::default());
        assert!(vectors[0].basic_match.title > 0.0);
        assert!(vectors[0].basic_match.content > 0.0);
    }

    #[test]
    fn disabled_category_stays_zeroed() {
        let categories = FeatureCategories { recency: false, ..FeatureCategories::default() };
        let extractor = FeatureExtractor::new(categories, Normalization::None);
        let e = entry("t", "b");
        let vectors = extractor.extract_batch("t", &[e], &ExtractionContext::default());
        assert_eq!(vectors[0].recency_decay, RecencyDecay::default());
    }

    #[test]
    fn extract_batch_preserves_order_and_count() {
        let entries = vec![entry("a", "alpha"), entry("b", "beta"), entry("c", "gamma")];
        let extractor = FeatureExtractor::new(FeatureCategories::default(), Normalization::MinMax);
        let vectors = extractor.extract_batch("alpha beta", &entries, &ExtractionContext::default());
        assert_eq!(vectors.len(), 3);
    }

    #[test]
    fn min_max_normalization_bounds_values() {
        let entries: Vec<Entry> = (0..5).map(|i| entry(&format!("t{i}"), &"word ".repeat(i + 1))).collect();
        let extractor = FeatureExtractor::new(FeatureCategories::default(), Normalization::MinMax);
        let vectors = extractor.extract_batch("word", &entries, &ExtractionContext::default());
        for v in &vectors {
            for val in v.as_array() {
                assert!(val >= -3.0 && val <= 3.0);
            }
        }
    }
}
