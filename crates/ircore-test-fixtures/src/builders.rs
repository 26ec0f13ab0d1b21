//! Plain constructors for the core domain types, so every crate's tests
//! build an `Entry` or `SearchResult` the same way instead of
//! hand-rolling slightly different ones.

use ircore_core::entry::{Entry, EntryKind, EntryMetadata};
use ircore_core::search::SearchResult;

/// An `Entry` with a deterministic id (content-addressed from `path`) and
/// zeroed metadata, ready to be customized further by the caller.
pub fn entry(kind: EntryKind, title: &str, body: &str, path: &str) -> Entry {
    Entry::new(kind, title, body, path)
}

/// `entry` plus a few tags, the shape most retrieval/prioritizer tests need.
pub fn tagged_entry(kind: EntryKind, title: &str, body: &str, path: &str, tags: &[&str]) -> Entry {
    let mut e = entry(kind, title, body, path);
    e.metadata = EntryMetadata { tags: tags.iter().map(|t| t.to_string()).collect(), ..Default::default() };
    e
}

/// A `SearchResult` wrapping `entry` with the given score and rank and no
/// highlighting/snippets, the minimum shape the prioritizer and assembler
/// pipelines consume.
pub fn search_result(entry: Entry, score: f64, rank: usize) -> SearchResult {
    SearchResult::new(entry, score, rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_entry_carries_its_tags() {
        let e = tagged_entry(EntryKind::Knowledge, "t", "b", "/p.md", &["rust", "sqlite"]);
        assert!(e.metadata.tags.contains("rust"));
        assert!(e.metadata.tags.contains("sqlite"));
    }
}
