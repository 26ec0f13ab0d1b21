//! Weighted Fusion: score(d) = Σ_lists weight_list · (1/(rank+1) +
//! original_score), weights normalized to sum to 1, deduplicated by ID.

use std::collections::HashMap;

/// One list's entries as `(id, rank, original_score)`, rank 1-based.
pub type WeightedList<'a> = &'a [(String, usize, f64)];

pub fn fuse(lists: &[(WeightedList, f64)]) -> Vec<(String, f64)> {
    let weight_sum: f64 = lists.iter().map(|(_, w)| w).sum();
    let weight_sum = if weight_sum > 0.0 { weight_sum } else { 1.0 };

    let mut scores: HashMap<String, f64> = HashMap::new();
    for (list, weight) in lists {
        let normalized_weight = weight / weight_sum;
        for (id, rank, original_score) in list.iter() {
            let contribution = normalized_weight * (1.0 / (*rank as f64 + 1.0) + original_score);
            *scores.entry(id.clone()).or_insert(0.0) += contribution;
        }
    }

    let mut fused: Vec<(String, f64)> = scores.into_iter().collect();
    fused.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    fused
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_weighted_list_dominates() {
        let fts: Vec<(String, usize, f64)> = vec![("a".into(), 1, 0.9)];
        let vector: Vec<(String, usize, f64)> = vec![("b".into(), 1, 0.9)];
        let fused = fuse(&[(&fts, 0.8), (&vector, 0.2)]);
        assert_eq!(fused[0].0, "a");
    }

    #[test]
    fn weights_are_normalized_regardless_of_input_scale() {
        let fts: Vec<(String, usize, f64)> = vec![("a".into(), 1, 0.5)];
        let fused_a = fuse(&[(&fts, 1.0)]);
        let fused_b = fuse(&[(&fts, 100.0)]);
        assert!((fused_a[0].1 - fused_b[0].1).abs() < 1e-9);
    }

    #[test]
    fn dedups_ids_appearing_in_multiple_lists() {
        let fts: Vec<(String, usize, f64)> = vec![("a".into(), 1, 0.5)];
        let vector: Vec<(String, usize, f64)> = vec![("a".into(), 2, 0.3)];
        let fused = fuse(&[(&fts, 0.5), (&vector, 0.5)]);
        assert_eq!(fused.len(), 1);
    }
}
