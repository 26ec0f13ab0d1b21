//! The indexed unit: one file on disk (or one logical record derived from
//! it) tracked by the Indexing Engine and returned by the Retrieval Engine.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;
use crate::constants::CONTENT_ID_BYTES;

/// What kind of document an [`Entry`] represents. Drives scoring weights
/// (`intent::weight_matrix` in the retrieval engine) and default TTLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Knowledge,
    Memory,
    DecisionRecord,
    Pitfall,
    Code,
    Config,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Knowledge => "knowledge",
            EntryKind::Memory => "memory",
            EntryKind::DecisionRecord => "decision_record",
            EntryKind::Pitfall => "pitfall",
            EntryKind::Code => "code",
            EntryKind::Config => "config",
        }
    }
}

/// Fields an `Entry`'s identity does not depend on: everything that can
/// change across revisions of the same logical document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub tags: HashSet<String>,
    pub agent_affinity: HashSet<String>,
    pub category: Option<String>,
    pub project_id: Option<String>,
    pub language: Option<String>,
    pub usage_count: u64,
    pub last_used: Option<DateTime<Utc>>,
    pub effectiveness: Confidence,
    pub success_rate: Confidence,
    pub related_ids: Vec<String>,
    pub parent_id: Option<String>,
    pub child_ids: Vec<String>,
    pub file_size: u64,
}

/// One indexed document.
///
/// `id` is a content-addressed identity derived from the canonical path
/// (stable across edits); `content_hash` changes on every revision so
/// callers can detect whether a given `id` has new content without
/// re-reading the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub kind: EntryKind,
    pub title: String,
    pub body: String,
    pub path: String,
    pub content_hash: String,
    pub last_modified: DateTime<Utc>,
    pub metadata: EntryMetadata,
}

/// Truncated-blake3 hex id, keyed off the canonical path so the same file
/// always maps to the same `Entry::id` across re-indexing passes.
pub fn content_addressed_id(canonical_path: &Path) -> String {
    let hash = blake3::hash(canonical_path.to_string_lossy().as_bytes());
    hash.to_hex()[..CONTENT_ID_BYTES * 2].to_string()
}

/// Hash of the body, used as `Entry::content_hash` to detect real content
/// changes independent of mtime noise (touch without edit, checkout churn).
pub fn content_hash(body: &str) -> String {
    let hash = blake3::hash(body.as_bytes());
    hash.to_hex()[..CONTENT_ID_BYTES * 2].to_string()
}

impl Entry {
    pub fn new(
        kind: EntryKind,
        title: impl Into<String>,
        body: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let body = body.into();
        let content_hash = content_hash(&body);
        Self {
            id: content_addressed_id(Path::new(&path)),
            kind,
            title: title.into(),
            body,
            path,
            content_hash,
            last_modified: Utc::now(),
            metadata: EntryMetadata::default(),
        }
    }

    /// Whether `self` is a new revision of `other` (same identity, different
    /// content).
    pub fn is_revision_of(&self, other: &Entry) -> bool {
        self.id == other.id && self.content_hash != other.content_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_same_id() {
        let a = Entry::new(EntryKind::Knowledge, "t", "body one", "/docs/a.md");
        let b = Entry::new(EntryKind::Knowledge, "t", "body two", "/docs/a.md");
        assert_eq!(a.id, b.id);
        assert_ne!(a.content_hash, b.content_hash);
        assert!(b.is_revision_of(&a));
    }

    #[test]
    fn different_path_different_id() {
        let a = Entry::new(EntryKind::Knowledge, "t", "body", "/docs/a.md");
        let b = Entry::new(EntryKind::Knowledge, "t", "body", "/docs/b.md");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn id_is_hex_of_expected_width() {
        let e = Entry::new(EntryKind::Code, "t", "body", "/src/main.rs");
        assert_eq!(e.id.len(), CONTENT_ID_BYTES * 2);
        assert!(e.id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
