use ircore_budget::compression::compress;
use ircore_budget::truncation::truncate;
use proptest::prelude::*;

proptest! {
    #[test]
    fn compress_never_grows_char_count(text in ".{0,300}") {
        let out = compress(&text);
        prop_assert!(out.chars().count() <= text.chars().count() + 1);
    }

    #[test]
    fn compress_is_idempotent(text in ".{0,300}") {
        let once = compress(&text);
        let twice = compress(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn truncate_never_exceeds_original_length(text in ".{0,300}", fraction in 0.0f64..=1.0) {
        let out = truncate(&text, fraction);
        prop_assert!(out.chars().count() <= text.chars().count() + 1);
    }

    #[test]
    fn truncate_full_fraction_is_unchanged(text in ".{0,300}") {
        prop_assert_eq!(truncate(&text, 1.0), text);
    }
}
