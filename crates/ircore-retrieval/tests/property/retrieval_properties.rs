use ircore_retrieval::fusion::borda;
use ircore_retrieval::fusion::rrf;
use proptest::prelude::*;

fn id_list(n: usize, prefix: &str) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{i}")).collect()
}

proptest! {
    #[test]
    fn rrf_fusion_preserves_union_of_ids(n_fts in 1usize..20, n_vector in 1usize..20) {
        let fts = id_list(n_fts, "f");
        let vector = id_list(n_vector, "v");
        let fused = rrf::fuse(&[("fts", &fts), ("vector", &vector)], 60.0);

        let mut expected: std::collections::HashSet<String> = fts.into_iter().collect();
        expected.extend(vector);
        let actual: std::collections::HashSet<String> = fused.into_iter().map(|(id, _)| id).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn rrf_scores_are_monotonically_non_increasing(n in 2usize..30) {
        let list = id_list(n, "x");
        let fused = rrf::fuse(&[("only", &list)], 60.0);
        for window in fused.windows(2) {
            prop_assert!(window[0].1.score >= window[1].1.score);
        }
    }

    #[test]
    fn rrf_score_is_always_positive(n in 1usize..30, k in 1.0f64..200.0) {
        let list = id_list(n, "x");
        let fused = rrf::fuse(&[("only", &list)], k);
        for (_, score) in &fused {
            prop_assert!(score.score > 0.0);
        }
    }

    #[test]
    fn borda_scores_are_bounded_by_list_length(n in 1usize..30) {
        let list = id_list(n, "x");
        let fused = borda::fuse(&[("only", &list)]);
        for (_, score) in &fused {
            prop_assert!(score.score <= n as f64);
            prop_assert!(score.score >= 0.0);
        }
    }

    #[test]
    fn borda_top_rank_scores_highest_in_single_list(n in 2usize..30) {
        let list = id_list(n, "x");
        let fused = borda::fuse(&[("only", &list)]);
        prop_assert_eq!(&fused[0].0, "x0");
    }
}
