use ircore_tokens::methods;
use proptest::prelude::*;

proptest! {
    #[test]
    fn character_count_is_monotonic_in_length(a in "[a-zA-Z ]{0,200}", extra in "[a-zA-Z ]{1,50}") {
        let longer = format!("{a}{extra}");
        prop_assert!(methods::character_count(&longer) >= methods::character_count(&a));
    }

    #[test]
    fn word_count_never_exceeds_character_count_times_two(text in "[a-zA-Z ]{0,200}") {
        // A degenerate sanity bound: word-rate tokens shouldn't wildly
        // diverge from character-rate tokens for plain ASCII prose.
        let words = methods::word_count(&text);
        let chars = methods::character_count(&text);
        prop_assert!(words <= chars.max(1) * 6);
    }

    #[test]
    fn code_aware_count_is_subadditive(a in "[a-zA-Z0-9 ]{0,100}", b in "[a-zA-Z0-9 ]{0,100}") {
        let combined = format!("{a}{b}");
        let sum = methods::code_aware_count(&a) + methods::code_aware_count(&b);
        // Concatenation never counts for *more* than the parts counted
        // separately once rounding is accounted for.
        prop_assert!(methods::code_aware_count(&combined) <= sum + 2);
    }
}
