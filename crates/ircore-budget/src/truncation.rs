//! Step 5: truncate remaining non-essential sections to
//! `retain_fraction` of their length, ordered by ascending priority
//! (lowest-priority sections truncated first).

/// Truncate `text` to approximately `retain_fraction` of its character
/// length, backing off to the nearest preceding whitespace boundary so
/// words aren't split, and marking the cut with an ellipsis.
pub fn truncate(text: &str, retain_fraction: f64) -> String {
    let retain_fraction = retain_fraction.clamp(0.0, 1.0);
    let chars: Vec<char> = text.chars().collect();
    let target_len = ((chars.len() as f64) * retain_fraction).round() as usize;
    if target_len >= chars.len() {
        return text.to_string();
    }
    if target_len == 0 {
        return String::new();
    }
    let mut cut = target_len;
    while cut > 0 && !chars[cut - 1].is_whitespace() && !chars[cut].is_whitespace() {
        cut -= 1;
    }
    let truncated: String = chars[..cut].iter().collect();
    format!("{}…", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retains_requested_fraction_approximately() {
        let text = "a".repeat(100);
        let out = truncate(&text, 0.7);
        assert!(out.chars().count() <= 72);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn full_retention_is_unchanged() {
        let text = "hello world";
        assert_eq!(truncate(text, 1.0), text);
    }

    #[test]
    fn zero_retention_is_empty() {
        assert_eq!(truncate("hello world", 0.0), "");
    }

    #[test]
    fn does_not_split_a_word_boundary() {
        let text = "one two three four five";
        let out = truncate(text, 0.5);
        assert!(!out.trim_end_matches('…').ends_with("t"));
    }
}
