//! Reciprocal Rank Fusion: score(d) = Σ_lists 1/(k + rank_list(d)),
//! generalized to an arbitrary number of labeled ranked lists.

use std::collections::HashMap;

/// One retrieval method's ranked output: entry IDs in rank order
/// (1-based positions are derived from index).
pub type RankedList<'a> = &'a [String];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FusedScore {
    pub score: f64,
    /// 1-based rank per contributing list, keyed by the list's label.
    pub source_ranks: HashMap<String, usize>,
}

/// Fuse labeled ranked lists with RRF. `k` is the smoothing constant
/// (60 is a common default). Returns entries sorted by descending fused
/// score.
pub fn fuse(lists: &[(&str, RankedList)], k: f64) -> Vec<(String, FusedScore)> {
    let mut scores: HashMap<String, FusedScore> = HashMap::new();

    for (label, list) in lists {
        for (idx, id) in list.iter().enumerate() {
            let rank = idx + 1;
            let entry = scores.entry(id.clone()).or_default();
            entry.score += 1.0 / (k + rank as f64);
            entry.source_ranks.insert((*label).to_string(), rank);
        }
    }

    let mut fused: Vec<(String, FusedScore)> = scores.into_iter().collect();
    fused.sort_by(|a, b| b.1.score.partial_cmp(&a.1.score).unwrap_or(std::cmp::Ordering::Equal));
    fused
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_list_preserves_order() {
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let fused = fuse(&[("fts", &ids)], 60.0);
        assert_eq!(fused[0].0, "a");
        assert_eq!(fused.len(), 3);
    }

    #[test]
    fn agreement_across_lists_boosts_score() {
        let fts = vec!["a".to_string(), "b".to_string()];
        let vector = vec!["b".to_string(), "a".to_string()];
        let fused = fuse(&[("fts", &fts), ("vector", &vector)], 60.0);
        let a_score = fused.iter().find(|(id, _)| id == "a").unwrap().1.score;
        let b_score = fused.iter().find(|(id, _)| id == "b").unwrap().1.score;
        // "a" ranks 1st in fts and 2nd in vector; "b" ranks 2nd and 1st.
        // Symmetric, so both scores should be equal.
        assert!((a_score - b_score).abs() < 1e-9);
    }

    #[test]
    fn union_of_ids_is_preserved() {
        let fts = vec!["a".to_string(), "b".to_string()];
        let vector = vec!["c".to_string()];
        let fused = fuse(&[("fts", &fts), ("vector", &vector)], 60.0);
        let ids: std::collections::HashSet<_> = fused.into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["a", "b", "c"].into_iter().map(String::from).collect());
    }
}
