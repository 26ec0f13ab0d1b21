//! Step 3: collapse whitespace, de-dup empty lines, and canonicalize
//! common verbose idioms in every `compressible` section.

/// Compress `text` in place-equivalent fashion, returning the result.
/// Idempotent: compressing already-compressed text is a no-op.
pub fn compress(text: &str) -> String {
    let collapsed = collapse_internal_whitespace(text);
    let deduped = dedup_empty_lines(&collapsed);
    canonicalize_idioms(&deduped)
}

/// Collapse runs of horizontal whitespace within a line to a single
/// space, without touching line boundaries.
fn collapse_internal_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse runs of 2+ consecutive blank lines down to exactly one.
fn dedup_empty_lines(text: &str) -> String {
    let mut out = Vec::new();
    let mut prev_blank = false;
    for line in text.lines() {
        let blank = line.trim().is_empty();
        if blank && prev_blank {
            continue;
        }
        out.push(line);
        prev_blank = blank;
    }
    out.join("\n")
}

/// Common verbose phrasings collapsed to a shorter equivalent. Order
/// matters only in that longer phrases are matched before their
/// substrings would be.
const IDIOM_REPLACEMENTS: &[(&str, &str)] = &[
    ("in order to", "to"),
    ("due to the fact that", "because"),
    ("at this point in time", "now"),
    ("for the purpose of", "for"),
    ("in the event that", "if"),
    ("is able to", "can"),
    ("a large number of", "many"),
];

fn canonicalize_idioms(text: &str) -> String {
    let mut out = text.to_string();
    for (verbose, terse) in IDIOM_REPLACEMENTS {
        out = out.replace(verbose, terse);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_blank_lines() {
        let input = "hello    world\n\n\n\nsecond   line";
        let out = compress(input);
        assert_eq!(out, "hello world\n\nsecond line");
    }

    #[test]
    fn canonicalizes_verbose_idioms() {
        let out = compress("We did this in order to save tokens due to the fact that budgets are tight.");
        assert!(out.contains("to save"));
        assert!(out.contains("because budgets"));
    }

    #[test]
    fn compression_is_idempotent() {
        let input = "some   text\n\n\nhere";
        let once = compress(input);
        let twice = compress(&once);
        assert_eq!(once, twice);
    }
}
