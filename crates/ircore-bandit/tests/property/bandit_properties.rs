use ircore_bandit::algorithm::{decayed_epsilon, ucb1_score};
use ircore_bandit::window::RewardWindow;
use proptest::prelude::*;

proptest! {
    #[test]
    fn epsilon_never_exceeds_its_starting_value(
        epsilon_0 in 0.0f64..1.0,
        decay in 0.9f64..1.0,
        pulls in 0u64..10_000,
        floor in 0.0f64..0.1,
    ) {
        let e = decayed_epsilon(epsilon_0, decay, pulls, floor);
        prop_assert!(e <= epsilon_0.max(floor));
    }

    #[test]
    fn epsilon_is_never_below_its_floor(
        epsilon_0 in 0.0f64..1.0,
        decay in 0.9f64..1.0,
        pulls in 0u64..10_000,
        floor in 0.0f64..0.2,
    ) {
        let e = decayed_epsilon(epsilon_0, decay, pulls, floor);
        prop_assert!(e >= floor);
    }

    #[test]
    fn ucb1_score_is_finite_once_pulled(
        mean in 0.0f64..1.0,
        pull_count in 1u64..1000,
        total_pulls in 1u64..100_000,
        c in 0.0f64..5.0,
    ) {
        let score = ucb1_score(mean, pull_count, total_pulls, c);
        prop_assert!(score.is_finite());
        prop_assert!(score >= mean);
    }

    #[test]
    fn reward_window_mean_stays_within_pushed_bounds(
        rewards in prop::collection::vec(0.0f64..1.0, 1..200),
        capacity in 1usize..50,
    ) {
        let mut window = RewardWindow::new(capacity);
        for r in &rewards {
            window.push(*r);
        }
        let mean = window.mean();
        prop_assert!((0.0..=1.0).contains(&mean));
        prop_assert!(window.len() <= capacity);
    }

    #[test]
    fn reward_window_never_exceeds_capacity(
        rewards in prop::collection::vec(any::<f64>(), 0..500),
        capacity in 1usize..20,
    ) {
        let mut window = RewardWindow::new(capacity);
        for r in &rewards {
            window.push(*r);
        }
        prop_assert!(window.len() <= capacity);
    }
}
